//! Read-only access to the documentation registry.
//!
//! The registry is handed to the generator explicitly; every query takes a
//! [`Filter`] that decides which items are visible.

use crate::model::*;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Anything a filter can look at.
pub trait Item {
    /// Namespace path, constant name, method name or mixin path.
    fn name(&self) -> &str;
    fn docstring(&self) -> Option<&Docstring>;
}

impl Item for Namespace {
    fn name(&self) -> &str {
        &self.path
    }

    fn docstring(&self) -> Option<&Docstring> {
        Some(&self.docstring)
    }
}

impl Item for Constant {
    fn name(&self) -> &str {
        &self.name
    }

    fn docstring(&self) -> Option<&Docstring> {
        Some(&self.docstring)
    }
}

impl Item for Method {
    fn name(&self) -> &str {
        &self.name
    }

    fn docstring(&self) -> Option<&Docstring> {
        Some(&self.docstring)
    }
}

impl Item for Mixin {
    fn name(&self) -> &str {
        &self.path
    }

    fn docstring(&self) -> Option<&Docstring> {
        None
    }
}

/// Inclusion predicate applied to every registry query.
pub trait Filter {
    fn matches(&self, item: &dyn Item) -> bool;
}

/// Lets everything through.
#[allow(dead_code)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    fn matches(&self, _item: &dyn Item) -> bool {
        true
    }
}

/// Filter configured from the command line.
///
/// Private items (`@private`, or `@api private`) are hidden unless
/// `show_private` is set. Items whose name matches any `excludes` pattern are
/// always hidden.
#[derive(Debug, Default)]
pub struct Verifier {
    pub show_private: bool,
    pub excludes: Vec<Regex>,
}

impl Verifier {
    pub fn new(show_private: bool, patterns: &[String]) -> Result<Self> {
        let excludes = patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid --exclude pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Verifier {
            show_private,
            excludes,
        })
    }
}

fn is_private(doc: &Docstring) -> bool {
    doc.has_tag("private")
        || doc
            .tags
            .iter()
            .any(|t| t.tag_name == "api" && t.text.trim() == "private")
}

impl Filter for Verifier {
    fn matches(&self, item: &dyn Item) -> bool {
        if !self.show_private && item.docstring().is_some_and(is_private) {
            return false;
        }
        !self.excludes.iter().any(|re| re.is_match(item.name()))
    }
}

/// Registry queries. Results keep registration order; sorting is the
/// renderer's business.
///
/// Only [`Registry::namespaces`] is required; the per-namespace queries read
/// the namespace's own collections by default.
pub trait Registry {
    fn namespaces(&self, filter: &dyn Filter) -> Vec<&Namespace>;

    fn constants<'a>(&self, ns: &'a Namespace, filter: &dyn Filter) -> Vec<&'a Constant> {
        ns.constants.iter().filter(|c| filter.matches(*c)).collect()
    }

    fn methods<'a>(&self, ns: &'a Namespace, filter: &dyn Filter) -> Vec<&'a Method> {
        ns.methods.iter().filter(|m| filter.matches(*m)).collect()
    }

    fn mixins<'a>(&self, ns: &'a Namespace, scope: Scope, filter: &dyn Filter) -> Vec<&'a Mixin> {
        ns.mixins
            .iter()
            .filter(|m| m.scope == scope && filter.matches(*m))
            .collect()
    }
}

/// Registry held entirely in memory, usually loaded from JSON.
#[derive(Debug, Default, Deserialize)]
pub struct MemoryRegistry {
    #[serde(default)]
    namespaces: Vec<Namespace>,
}

impl MemoryRegistry {
    #[allow(dead_code)]
    pub fn new(namespaces: Vec<Namespace>) -> Self {
        MemoryRegistry { namespaces }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("failed to parse registry JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }
}

impl Registry for MemoryRegistry {
    fn namespaces(&self, filter: &dyn Filter) -> Vec<&Namespace> {
        self.namespaces.iter().filter(|ns| filter.matches(*ns)).collect()
    }
}
