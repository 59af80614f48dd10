//! Data model for the documentation registry, format-agnostic.
//!
//! Everything here is built once by whoever produced the registry and is
//! read-only while stubs are generated.

use serde::Deserialize;

/// Whether a namespace is a class, a module, or the top-level pseudo-namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    Class,
    Module,
    Root,
}

impl NamespaceKind {
    /// Ruby keyword used on the declaration line.
    pub fn keyword(self) -> &'static str {
        match self {
            NamespaceKind::Class => "class",
            NamespaceKind::Module | NamespaceKind::Root => "module",
        }
    }
}

/// Class-level (`extend`, `def self.`) or instance-level (`include`, `def`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Class,
    #[default]
    Instance,
}

/// A documented class or module.
#[derive(Debug, Clone, Deserialize)]
pub struct Namespace {
    /// Fully-qualified path, e.g. `Sketchup::Model`. Empty for the root.
    #[serde(default)]
    pub path: String,
    pub kind: NamespaceKind,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub docstring: Docstring,
    #[serde(default)]
    pub constants: Vec<Constant>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub mixins: Vec<Mixin>,
}

impl Namespace {
    pub fn is_root(&self) -> bool {
        self.kind == NamespaceKind::Root || self.path.is_empty()
    }
}

/// A constant. Its real value is never rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct Constant {
    pub name: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub value: Option<String>,
    #[serde(default)]
    pub docstring: Docstring,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub docstring: Docstring,
}

/// A declared parameter. `default` is an opaque Ruby expression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawParameter")]
pub struct Parameter {
    pub name: String,
    pub default: Option<String>,
}

impl Parameter {
    #[cfg(test)]
    pub fn new(name: &str, default: Option<&str>) -> Self {
        Parameter {
            name: name.to_string(),
            default: default.map(str::to_string),
        }
    }
}

/// Accepts both `{"name": .., "default": ..}` and `[name, default]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawParameter {
    Pair(String, Option<String>),
    Named {
        name: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl From<RawParameter> for Parameter {
    fn from(raw: RawParameter) -> Self {
        match raw {
            RawParameter::Pair(name, default) | RawParameter::Named { name, default } => {
                Parameter { name, default }
            }
        }
    }
}

/// `extend`/`include` reference. Never resolved against the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct Mixin {
    pub path: String,
    #[serde(default)]
    pub scope: Scope,
}

/// Free text plus structured tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Docstring {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Docstring {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.tags.is_empty()
    }

    pub fn has_tag(&self, tag_name: &str) -> bool {
        self.tags.iter().any(|t| t.tag_name == tag_name)
    }

    pub fn overloads(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|t| t.is_overload())
    }
}

/// A documentation tag such as `@param`, `@return` or `@overload`.
///
/// For `@overload`, `name` is the method name, `parameters` the overload's
/// parameter list, `text` its own description and `tags` its nested tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Tag {
    #[cfg(test)]
    pub fn new(tag_name: &str, text: &str) -> Self {
        Tag {
            tag_name: tag_name.to_string(),
            text: text.to_string(),
            ..Tag::default()
        }
    }

    pub fn is_overload(&self) -> bool {
        self.tag_name == "overload"
    }
}
