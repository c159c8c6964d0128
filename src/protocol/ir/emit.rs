//! TypeScript declaration emission via the Emit trait.
//!
//! This module provides a trait-based approach to converting TypeScript IR nodes
//! to string representations. Inline nodes (types, parameters) implement `Emit`;
//! block nodes (interfaces, namespaces, members) additionally expose
//! `emit_indented` so callers place them at the right nesting level.

use super::types::{TsInterface, TsMember, TsMethod, TsNamespace, TsParam, TsPrimitive, TsProp, TsType};
use super::utils::{doc_block, escape_js_string, indent, quote_if_needed};

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the IR node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Any => "any".to_string(),
            TsPrimitive::Void => "void".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Function types bind looser than the array suffix
                if matches!(**inner, TsType::Function { .. }) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(|p| p.emit()).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => {
                let args_str = args.iter().map(|a| a.emit()).collect::<Vec<_>>().join(", ");
                format!("{name}<{args_str}>")
            }
            TsType::Function { params, ret } => {
                let params_str = params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");
                format!("({params_str}) => {}", ret.emit())
            }
            TsType::StringLiteral(value) => format!("\"{}\"", escape_js_string(value)),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {}", self.ty.emit())
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{opt}: {}", self.name, self.ty.emit())
    }
}

impl Emit for TsMethod {
    fn emit(&self) -> String {
        let params_str = self.params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");
        format!("{}({params_str}): {}", self.name, self.return_type.emit())
    }
}

// =============================================================================
// Blocks
// =============================================================================

impl TsMember {
    /// Emit the member as one line (preceded by its doc block) at `level`.
    pub fn emit_indented(&self, level: usize) -> String {
        let (doc, line) = match self {
            TsMember::Property(prop) => (prop.doc.as_deref(), prop.emit()),
            TsMember::Method(method) => (method.doc.as_deref(), method.emit()),
        };
        let mut output = doc.map(|d| doc_block(d, level)).unwrap_or_default();
        output.push_str(&format!("{}{line};\n", indent(level)));
        output
    }
}

impl Emit for TsInterface {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl TsInterface {
    /// Emit with the declaration line at `level` and members one level deeper.
    pub fn emit_indented(&self, level: usize) -> String {
        let prefix = indent(level);
        let mut output = self.doc.as_deref().map(|d| doc_block(d, level)).unwrap_or_default();
        let export = if self.is_export { "export " } else { "" };
        output.push_str(&format!("{prefix}{export}interface {} {{\n", self.name));
        for member in &self.members {
            output.push_str(&member.emit_indented(level + 1));
        }
        output.push_str(&format!("{prefix}}}\n"));
        output
    }
}

impl Emit for TsNamespace {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl TsNamespace {
    /// Emit with the namespace line at `level` and interfaces one level deeper.
    pub fn emit_indented(&self, level: usize) -> String {
        let prefix = indent(level);
        let mut output = format!("{prefix}namespace {} {{\n", self.name);
        for interface in &self.interfaces {
            output.push_str(&interface.emit_indented(level + 1));
        }
        output.push_str(&format!("{prefix}}}\n"));
        output
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, ty: TsType, optional: bool) -> TsProp {
        TsProp {
            name: name.into(),
            ty,
            optional,
            doc: None,
        }
    }

    #[test]
    fn test_emit_primitive() {
        assert_eq!(TsPrimitive::String.emit(), "string");
        assert_eq!(TsPrimitive::Number.emit(), "number");
        assert_eq!(TsPrimitive::Boolean.emit(), "boolean");
        assert_eq!(TsPrimitive::Any.emit(), "any");
        assert_eq!(TsPrimitive::Void.emit(), "void");
    }

    #[test]
    fn test_emit_nested_array_type() {
        let ty = TsType::array_of(TsType::array_of(TsType::Primitive(TsPrimitive::Number)));
        assert_eq!(ty.emit(), "number[][]");
    }

    #[test]
    fn test_emit_function_array_needs_parens() {
        let ty = TsType::array_of(TsType::Function {
            params: vec![],
            ret: Box::new(TsType::void()),
        });
        assert_eq!(ty.emit(), "(() => void)[]");
    }

    #[test]
    fn test_emit_object_type() {
        let ty = TsType::Object(vec![
            prop("body", TsType::Primitive(TsPrimitive::String), false),
            prop("base64Encoded", TsType::Primitive(TsPrimitive::Boolean), true),
        ]);
        assert_eq!(ty.emit(), "{ body: string; base64Encoded?: boolean }");
        assert_eq!(TsType::Object(vec![]).emit(), "{}");
    }

    #[test]
    fn test_emit_generic_and_literal() {
        let ty = TsType::Generic {
            name: "Callback".into(),
            args: vec![TsType::any()],
        };
        assert_eq!(ty.emit(), "Callback<any>");
        assert_eq!(TsType::StringLiteral("say \"hi\"".into()).emit(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_emit_method() {
        let method = TsMethod {
            name: "on".into(),
            params: vec![
                TsParam {
                    name: "event".into(),
                    ty: TsType::StringLiteral("loadEventFired".into()),
                    optional: false,
                },
                TsParam {
                    name: "cb".into(),
                    ty: TsType::Function {
                        params: vec![TsParam {
                            name: "payload".into(),
                            ty: TsType::Ref("Page.ILoadEventFiredEvent".into()),
                            optional: false,
                        }],
                        ret: Box::new(TsType::void()),
                    },
                    optional: false,
                },
            ],
            return_type: TsType::Ref("NodeJS.EventEmitter".into()),
            doc: None,
        };
        assert_eq!(
            method.emit(),
            "on(event: \"loadEventFired\", cb: (payload: Page.ILoadEventFiredEvent) => void): NodeJS.EventEmitter"
        );
    }

    #[test]
    fn test_emit_interface_with_docs() {
        let interface = TsInterface {
            name: "Frame".into(),
            doc: Some("Information about the Frame on the page.".into()),
            is_export: true,
            members: vec![
                TsMember::Property(TsProp {
                    name: "id".into(),
                    ty: TsType::Primitive(TsPrimitive::String),
                    optional: false,
                    doc: Some("Frame unique identifier.".into()),
                }),
                TsMember::Property(prop("parentId", TsType::Primitive(TsPrimitive::String), true)),
            ],
        };
        let expected = "/**\n * Information about the Frame on the page.\n */\nexport interface Frame {\n    /**\n     * Frame unique identifier.\n     */\n    id: string;\n    parentId?: string;\n}\n";
        assert_eq!(interface.emit(), expected);
    }

    #[test]
    fn test_emit_empty_interface() {
        let interface = TsInterface {
            name: "IDomContentEventFiredEvent".into(),
            doc: None,
            is_export: true,
            members: vec![],
        };
        assert_eq!(
            interface.emit_indented(2),
            "        export interface IDomContentEventFiredEvent {\n        }\n"
        );
    }

    #[test]
    fn test_emit_namespace() {
        let ns = TsNamespace {
            name: "Network".into(),
            interfaces: vec![TsInterface {
                name: "IRequestWillBeSentEvent".into(),
                doc: None,
                is_export: true,
                members: vec![TsMember::Property(prop(
                    "requestId",
                    TsType::Primitive(TsPrimitive::String),
                    false,
                ))],
            }],
        };
        let expected = "    namespace Network {\n        export interface IRequestWillBeSentEvent {\n            requestId: string;\n        }\n    }\n";
        assert_eq!(ns.emit_indented(1), expected);
    }
}
