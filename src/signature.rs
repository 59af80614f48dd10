//! Method signatures and overload promotion.

use crate::model::{Docstring, Method, Parameter};

/// A method ready for rendering: effective parameters plus the docstring to
/// print above it. Built from a [`Method`] without touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub docstring: Docstring,
}

impl ResolvedMethod {
    pub fn signature(&self) -> String {
        render_signature(&self.name, &self.parameters)
    }
}

/// Resolve the effective parameters and docstring of `method`.
///
/// With exactly one `@overload`, that overload's parameters become the
/// method's, its tags are appended to the method's own tags and the overload
/// tag itself is dropped. With zero or several overloads the method's own
/// parameters and docstring are used unchanged.
pub fn resolve(method: &Method) -> ResolvedMethod {
    let mut overloads = method.docstring.overloads();
    let single = match (overloads.next(), overloads.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    };

    match single {
        Some(overload) => {
            let mut tags: Vec<_> = method
                .docstring
                .tags
                .iter()
                .filter(|t| !t.is_overload())
                .cloned()
                .collect();
            tags.extend(overload.tags.iter().cloned());
            ResolvedMethod {
                name: method.name.clone(),
                parameters: overload.parameters.clone(),
                docstring: Docstring {
                    text: method.docstring.text.clone(),
                    tags,
                },
            }
        }
        None => ResolvedMethod {
            name: method.name.clone(),
            parameters: method.parameters.clone(),
            docstring: method.docstring.clone(),
        },
    }
}

/// `(a, b = 5)`, or an empty string when there are no parameters.
pub fn render_parameters(params: &[Parameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|p| match &p.default {
            Some(default) => format!("{} = {}", p.name, default),
            None => p.name.clone(),
        })
        .collect();
    format!("({})", rendered.join(", "))
}

pub fn render_signature(name: &str, params: &[Parameter]) -> String {
    format!("{}{}", name, render_parameters(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scope, Tag};

    fn overload(params: Vec<Parameter>, tags: Vec<Tag>) -> Tag {
        Tag {
            tag_name: "overload".to_string(),
            name: Some("foo".to_string()),
            parameters: params,
            tags,
            ..Tag::default()
        }
    }

    fn method(params: Vec<Parameter>, tags: Vec<Tag>) -> Method {
        Method {
            name: "foo".to_string(),
            scope: Scope::Instance,
            parameters: params,
            docstring: Docstring {
                text: "Does foo.".to_string(),
                tags,
            },
        }
    }

    #[test]
    fn no_parameters_no_parens() {
        assert_eq!(render_signature("spin", &[]), "spin");
    }

    #[test]
    fn defaults_rendered_verbatim() {
        let params = vec![
            Parameter::new("count", Some("1")),
            Parameter::new("mode", Some("Sketchup::Model::VERSION_2020")),
            Parameter::new("rest", None),
        ];
        assert_eq!(
            render_signature("spin", &params),
            "spin(count = 1, mode = Sketchup::Model::VERSION_2020, rest)"
        );
    }

    #[test]
    fn single_overload_is_promoted() {
        let m = method(
            vec![],
            vec![
                Tag::new("version", "SketchUp 6.0"),
                overload(
                    vec![Parameter::new("a", None), Parameter::new("b", Some("5"))],
                    vec![Tag::new("return", "the result")],
                ),
            ],
        );
        let resolved = resolve(&m);
        assert_eq!(resolved.signature(), "foo(a, b = 5)");
        let tag_names: Vec<&str> = resolved
            .docstring
            .tags
            .iter()
            .map(|t| t.tag_name.as_str())
            .collect();
        assert_eq!(tag_names, vec!["version", "return"]);
        assert_eq!(resolved.docstring.text, "Does foo.");
    }

    #[test]
    fn promotion_leaves_method_untouched() {
        let m = method(vec![], vec![overload(vec![Parameter::new("a", None)], vec![])]);
        let _ = resolve(&m);
        assert_eq!(m.docstring.overloads().count(), 1);
        assert!(m.parameters.is_empty());
    }

    #[test]
    fn multiple_overloads_use_own_parameters() {
        let m = method(
            vec![Parameter::new("args", None)],
            vec![
                overload(vec![Parameter::new("a", None)], vec![]),
                overload(vec![Parameter::new("b", None)], vec![]),
            ],
        );
        let resolved = resolve(&m);
        assert_eq!(resolved.signature(), "foo(args)");
        assert_eq!(resolved.docstring, m.docstring);
    }

    #[test]
    fn no_overloads_use_own_parameters() {
        let m = method(vec![Parameter::new("x", Some("nil"))], vec![Tag::new("return", "")]);
        let resolved = resolve(&m);
        assert_eq!(resolved.signature(), "foo(x = nil)");
        assert_eq!(resolved.docstring, m.docstring);
    }
}
