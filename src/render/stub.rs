//! Per-namespace stub file rendering.

use crate::grouping::{group_constants, render_groups};
use crate::model::{Namespace, NamespaceKind, Scope};
use crate::registry::{Filter, Registry};
use crate::render::docstring::comment_block;
use crate::signature::resolve;

/// Boilerplate at the top of every stub file.
pub const HEADER: &str = "# Copyright:: Copyright 2024 Trimble Inc.\n# License:: The MIT License (MIT)\n";

/// Superclass that is implied and never written out.
const BASE_CLASS: &str = "Object";

pub struct StubRenderer<'r> {
    registry: &'r dyn Registry,
    filter: &'r dyn Filter,
}

impl<'r> StubRenderer<'r> {
    pub fn new(registry: &'r dyn Registry, filter: &'r dyn Filter) -> Self {
        StubRenderer { registry, filter }
    }

    /// Render the complete stub file for `ns`.
    ///
    /// Blocks are separated by one blank line: header, documentation with
    /// the declaration line, each non-empty section, and the closing `end`.
    /// The root namespace has no declaration, no indentation and no `end`.
    pub fn render(&self, ns: &Namespace) -> String {
        let indent = if ns.is_root() { "" } else { "  " };
        let mut blocks: Vec<String> = vec![HEADER.to_string()];

        let mut intro = comment_block(&ns.docstring, "");
        if !ns.is_root() {
            intro.push_str(&declaration(ns));
            intro.push('\n');
        }
        if !intro.is_empty() {
            blocks.push(intro);
        }

        let sections = [
            ("Extends", self.render_mixins(ns, Scope::Class, indent)),
            ("Includes", self.render_mixins(ns, Scope::Instance, indent)),
            ("Constants", self.render_constants(ns, indent)),
            ("Class Methods", self.render_methods(ns, Scope::Class, indent)),
            ("Instance Methods", self.render_methods(ns, Scope::Instance, indent)),
        ];
        for (title, body) in sections {
            if body.trim().is_empty() {
                continue;
            }
            blocks.push(format!("{}# {}\n\n{}", indent, title, body));
        }

        if !ns.is_root() {
            blocks.push("end\n".to_string());
        }
        blocks.join("\n")
    }

    fn render_mixins(&self, ns: &Namespace, scope: Scope, indent: &str) -> String {
        let keyword = match scope {
            Scope::Class => "extend",
            Scope::Instance => "include",
        };
        let mut mixins = self.registry.mixins(ns, scope, self.filter);
        mixins.sort_by(|a, b| a.path.cmp(&b.path));
        mixins
            .iter()
            .map(|m| format!("{}{} {}\n", indent, keyword, m.path))
            .collect()
    }

    fn render_constants(&self, ns: &Namespace, indent: &str) -> String {
        let constants = self.registry.constants(ns, self.filter);
        render_groups(&group_constants(&constants), indent)
    }

    fn render_methods(&self, ns: &Namespace, scope: Scope, indent: &str) -> String {
        let prefix = match scope {
            Scope::Class => "self.",
            Scope::Instance => "",
        };
        let mut methods: Vec<_> = self
            .registry
            .methods(ns, self.filter)
            .into_iter()
            .filter(|m| m.scope == scope)
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
            .iter()
            .map(|m| {
                let resolved = resolve(m);
                format!(
                    "{}{}def {}{}\n{}end\n",
                    comment_block(&resolved.docstring, indent),
                    indent,
                    prefix,
                    resolved.signature(),
                    indent
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `class A::B < C` or `module A::B`.
pub fn declaration(ns: &Namespace) -> String {
    let mut line = format!("{} {}", ns.kind.keyword(), ns.path);
    if ns.kind == NamespaceKind::Class {
        if let Some(superclass) = ns
            .superclass
            .as_deref()
            .filter(|s| s.trim_start_matches("::") != BASE_CLASS)
        {
            line.push_str(" < ");
            line.push_str(superclass);
        }
    }
    line
}
