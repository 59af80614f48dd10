//! YARD-style comment blocks.

use crate::model::{Docstring, Tag};
use crate::signature::render_signature;

/// Docstring as comment-free lines: the text, then one block per tag, with
/// an empty line between blocks.
pub fn docstring_lines(doc: &Docstring) -> Vec<String> {
    let mut blocks: Vec<Vec<String>> = Vec::new();

    let text = doc.text.trim_matches('\n').trim_end();
    if !text.is_empty() {
        blocks.push(text.lines().map(|l| l.trim_end().to_string()).collect());
    }
    for tag in &doc.tags {
        blocks.push(tag_lines(tag));
    }

    let mut lines = Vec::new();
    for (i, block) in blocks.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(block);
    }
    lines
}

fn tag_lines(tag: &Tag) -> Vec<String> {
    match tag.tag_name.as_str() {
        "example" => {
            let mut head = "@example".to_string();
            if let Some(title) = tag.name.as_deref().filter(|t| !t.is_empty()) {
                head.push(' ');
                head.push_str(title);
            }
            let body = tag.text.trim_matches('\n').lines().map(str::to_string);
            std::iter::once(head).chain(indent_lines(body)).collect()
        }
        "overload" => {
            let name = tag.name.as_deref().unwrap_or_default();
            let head = format!("@overload {}", render_signature(name, &tag.parameters));
            let nested = Docstring {
                text: tag.text.clone(),
                tags: tag.tags.clone(),
            };
            std::iter::once(head)
                .chain(indent_lines(docstring_lines(&nested)))
                .collect()
        }
        _ => {
            let mut head = format!("@{}", tag.tag_name);
            if let Some(name) = tag.name.as_deref().filter(|n| !n.is_empty()) {
                head.push(' ');
                head.push_str(name);
            }
            if !tag.types.is_empty() {
                head.push_str(&format!(" [{}]", tag.types.join(", ")));
            }
            let mut text = tag.text.trim().lines();
            if let Some(first) = text.next() {
                head.push(' ');
                head.push_str(first);
            }
            let rest = text.map(|l| l.trim().to_string());
            std::iter::once(head).chain(indent_lines(rest)).collect()
        }
    }
}

fn indent_lines(lines: impl IntoIterator<Item = String>) -> impl Iterator<Item = String> {
    lines.into_iter().map(|l| {
        if l.is_empty() {
            l
        } else {
            format!("  {}", l)
        }
    })
}

/// Docstring as `# ` comment lines at `indent`, or an empty string when the
/// docstring is empty.
pub fn comment_block(doc: &Docstring, indent: &str) -> String {
    if doc.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for line in docstring_lines(doc) {
        if line.is_empty() {
            out.push_str(&format!("{}#\n", indent));
        } else {
            out.push_str(&format!("{}# {}\n", indent, line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parameter;

    fn tag(tag_name: &str, name: Option<&str>, types: &[&str], text: &str) -> Tag {
        Tag {
            tag_name: tag_name.to_string(),
            name: name.map(str::to_string),
            types: types.iter().map(|t| t.to_string()).collect(),
            text: text.to_string(),
            ..Tag::default()
        }
    }

    #[test]
    fn empty_docstring_renders_nothing() {
        assert_eq!(comment_block(&Docstring::default(), "  "), "");
    }

    #[test]
    fn text_then_tags_with_blank_separators() {
        let doc = Docstring {
            text: "Spins the gear.\n\nFast.".to_string(),
            tags: vec![
                tag("param", Some("count"), &["Integer"], "how many turns"),
                tag("return", None, &["Boolean", "nil"], ""),
                tag("version", None, &[], "SketchUp 6.0"),
            ],
        };
        assert_eq!(
            comment_block(&doc, "  "),
            "  # Spins the gear.\n  #\n  # Fast.\n  #\n  # @param count [Integer] how many turns\n  #\n  # @return [Boolean, nil]\n  #\n  # @version SketchUp 6.0\n"
        );
    }

    #[test]
    fn example_body_is_indented() {
        let doc = Docstring {
            text: String::new(),
            tags: vec![tag("example", Some("Basic"), &[], "gear = Gear.new\ngear.spin")],
        };
        assert_eq!(
            docstring_lines(&doc),
            vec!["@example Basic", "  gear = Gear.new", "  gear.spin"]
        );
    }

    #[test]
    fn multiline_tag_text_continues_indented() {
        let doc = Docstring {
            text: String::new(),
            tags: vec![tag("note", None, &[], "first line\nsecond line")],
        };
        assert_eq!(docstring_lines(&doc), vec!["@note first line", "  second line"]);
    }

    #[test]
    fn overload_renders_signature_and_nested_tags() {
        let overload = Tag {
            tag_name: "overload".to_string(),
            name: Some("add".to_string()),
            text: "Adds a point.".to_string(),
            parameters: vec![Parameter::new("point", None)],
            tags: vec![tag("param", Some("point"), &["Geom::Point3d"], "")],
            ..Tag::default()
        };
        let doc = Docstring {
            text: String::new(),
            tags: vec![overload],
        };
        assert_eq!(
            docstring_lines(&doc),
            vec![
                "@overload add(point)",
                "  Adds a point.",
                "",
                "  @param point [Geom::Point3d]",
            ]
        );
    }
}
