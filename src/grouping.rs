//! Constant grouping for the "Constants" section.
//!
//! Labels come from the override table first, then from two heuristics: the
//! text before the first underscore, or a leading camel-case word. Grouping
//! only joins *adjacent* constants with equal labels, so declaration
//! locality survives; the groups are then ordered by the first character of
//! their label.

use crate::model::Constant;
use regex::Regex;
use std::sync::LazyLock;

/// How an override rule recognises its constants.
pub enum Matcher {
    Names(&'static [&'static str]),
    Pattern(Regex),
}

/// One entry of the override table. The first matching entry wins.
pub struct GroupRule {
    pub matcher: Matcher,
    pub label: &'static str,
}

impl GroupRule {
    fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Names(names) => names.contains(&name),
            Matcher::Pattern(re) => re.is_match(name),
        }
    }
}

fn pattern(label: &'static str, re: &str) -> GroupRule {
    GroupRule {
        matcher: Matcher::Pattern(Regex::new(re).unwrap()),
        label,
    }
}

fn names(label: &'static str, names: &'static [&'static str]) -> GroupRule {
    GroupRule {
        matcher: Matcher::Names(names),
        label,
    }
}

/// Override table, evaluated in declaration order.
pub static GROUP_RULES: LazyLock<Vec<GroupRule>> = LazyLock::new(|| {
    vec![
        names(
            "Message box results",
            &["IDABORT", "IDCANCEL", "IDIGNORE", "IDNO", "IDOK", "IDRETRY", "IDYES"],
        ),
        names(
            "Modifier keys",
            &[
                "ALT_MODIFIER_KEY",
                "ALT_MODIFIER_MASK",
                "CONSTRAIN_MODIFIER_KEY",
                "CONSTRAIN_MODIFIER_MASK",
                "COPY_MODIFIER_KEY",
                "COPY_MODIFIER_MASK",
            ],
        ),
        names("Virtual keys", &["VK_ALT", "VK_COMMAND", "VK_CONTROL", "VK_MENU", "VK_SHIFT"]),
        pattern("PAGE_USE", r"^PAGE_USE_"),
        pattern("DimensionArrow", r"^DimensionArrow"),
        pattern("SnapTo", r"^SnapTo"),
        pattern("TextAlign", r"^TextAlign"),
    ]
});

static RE_CAMEL_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]+[a-z]+").unwrap());

/// Consecutive constants sharing a label.
#[derive(Debug)]
pub struct ConstantGroup<'a> {
    pub label: String,
    pub constants: Vec<&'a Constant>,
}

/// Group label for a constant name using `rules` before the heuristics.
pub fn group_label_with(rules: &[GroupRule], name: &str) -> String {
    if let Some(rule) = rules.iter().find(|r| r.matches(name)) {
        return rule.label.to_string();
    }
    if let Some((prefix, _)) = name.split_once('_') {
        return prefix.to_string();
    }
    // `ROP` matches neither heuristic and ends up in its own group.
    match RE_CAMEL_WORD.find(name) {
        Some(m) => m.as_str().to_string(),
        None => name.to_string(),
    }
}

/// Chunk constants into runs of equal labels, sort each run by name, and
/// order runs by the first character of the label.
pub fn group_constants<'a>(constants: &[&'a Constant]) -> Vec<ConstantGroup<'a>> {
    group_constants_with(&GROUP_RULES, constants)
}

pub fn group_constants_with<'a>(
    rules: &[GroupRule],
    constants: &[&'a Constant],
) -> Vec<ConstantGroup<'a>> {
    let mut groups: Vec<ConstantGroup<'a>> = Vec::new();
    for &constant in constants {
        let label = group_label_with(rules, &constant.name);
        match groups.last_mut() {
            Some(last) if last.label == label => last.constants.push(constant),
            _ => groups.push(ConstantGroup {
                label,
                constants: vec![constant],
            }),
        }
    }

    for group in &mut groups {
        group.constants.sort_by(|a, b| a.name.cmp(&b.name));
    }
    // Stable: runs with the same leading character keep registry order.
    groups.sort_by_key(|g| g.label.trim_start().chars().next());
    groups
}

/// Render groups as `# label` headers followed by placeholder assignments,
/// with a blank line between groups.
pub fn render_groups(groups: &[ConstantGroup], indent: &str) -> String {
    groups
        .iter()
        .map(|group| {
            let mut block = format!("{}# {}\n", indent, group.label);
            for constant in &group.constants {
                block.push_str(&format!("{}{} = nil # Stub value.\n", indent, constant.name));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}
