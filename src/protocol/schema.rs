//! Protocol description structs for serde deserialization.
//!
//! This module models the subset of the DevTools `protocol.json` format that
//! the generator needs: domains with their commands, events and named types.
//! Unknown keys (`enum`, `experimental`, `hidden`, ...) are ignored.

use serde::Deserialize;

/// Root protocol description.
#[derive(Debug, Clone, Deserialize)]
pub struct Protocol {
    pub domains: Vec<Domain>,
}

/// A named grouping of commands, events and types.
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    #[serde(rename = "domain")]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// An invocable operation.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub returns: Vec<Parameter>,
}

/// An unsolicited notification.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A named reusable type declared within a domain.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
    pub id: String,
    /// Type tag: "object" or a primitive tag.
    #[serde(rename = "type")]
    pub tag: String,
    pub description: Option<String>,
    /// Fields, only meaningful for object-tagged types.
    #[serde(default)]
    pub properties: Vec<Parameter>,
    /// Element type for array-tagged types.
    pub items: Option<Box<RawDescriptor>>,
}

impl TypeDef {
    /// Only object-tagged types produce a generated interface.
    pub fn is_object(&self) -> bool {
        self.tag == "object"
    }

    /// The descriptor this type stands for when it is inlined.
    pub fn inline_descriptor(&self) -> TypeDescriptor {
        RawDescriptor {
            type_tag: Some(self.tag.clone()),
            ref_path: None,
            items: self.items.clone(),
        }
        .descriptor()
    }
}

/// A named, typed field of a command, event or object type.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub ty: RawDescriptor,
}

impl Parameter {
    pub fn descriptor(&self) -> TypeDescriptor {
        self.ty.descriptor()
    }
}

/// Type descriptor exactly as it appears in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDescriptor {
    #[serde(rename = "type")]
    pub type_tag: Option<String>,
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    pub items: Option<Box<RawDescriptor>>,
}

impl RawDescriptor {
    /// Normalize into exactly one descriptor kind. A reference wins over a
    /// type tag; a descriptor with neither is the catch-all primitive.
    pub fn descriptor(&self) -> TypeDescriptor {
        if let Some(reference) = &self.ref_path {
            return TypeDescriptor::Reference(reference.clone());
        }
        match self.type_tag.as_deref() {
            Some("array") => {
                TypeDescriptor::Array(self.items.as_ref().map(|items| Box::new(items.descriptor())))
            }
            Some(tag) => TypeDescriptor::Primitive(PrimitiveTag::from_tag(tag)),
            None => TypeDescriptor::Primitive(PrimitiveTag::Other),
        }
    }
}

/// Normalized type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveTag),
    /// `T` (same domain) or `D.T` (qualified).
    Reference(String),
    /// Array with an optional element descriptor.
    Array(Option<Box<TypeDescriptor>>),
}

/// Primitive tags with a fixed mapping. Arrays are handled by
/// [`TypeDescriptor::Array`]; `Array` here only appears for a bare tag that
/// never reached the descriptor normalization (e.g. built in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTag {
    Boolean,
    String,
    Integer,
    Array,
    Other,
}

impl PrimitiveTag {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "boolean" => PrimitiveTag::Boolean,
            "string" => PrimitiveTag::String,
            "integer" => PrimitiveTag::Integer,
            "array" => PrimitiveTag::Array,
            _ => PrimitiveTag::Other,
        }
    }
}

impl Protocol {
    /// Parse a protocol description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain_with_defaults() {
        let protocol = Protocol::from_json(
            r#"{ "domains": [ { "domain": "Inspector", "experimental": true } ] }"#,
        )
        .unwrap();
        let domain = &protocol.domains[0];
        assert_eq!(domain.name, "Inspector");
        assert!(domain.description.is_none());
        assert!(domain.commands.is_empty());
        assert!(domain.events.is_empty());
        assert!(domain.types.is_empty());
    }

    #[test]
    fn test_descriptor_ref_wins_over_type() {
        let param: Parameter = serde_json::from_str(
            r#"{ "name": "frame", "type": "object", "$ref": "Page.Frame" }"#,
        )
        .unwrap();
        assert_eq!(
            param.descriptor(),
            TypeDescriptor::Reference("Page.Frame".into())
        );
    }

    #[test]
    fn test_descriptor_nested_array() {
        let param: Parameter = serde_json::from_str(
            r#"{ "name": "grid", "type": "array", "items": { "type": "array", "items": { "type": "integer" } } }"#,
        )
        .unwrap();
        let expected = TypeDescriptor::Array(Some(Box::new(TypeDescriptor::Array(Some(
            Box::new(TypeDescriptor::Primitive(PrimitiveTag::Integer)),
        )))));
        assert_eq!(param.descriptor(), expected);
    }

    #[test]
    fn test_descriptor_without_type_is_other() {
        let param: Parameter = serde_json::from_str(r#"{ "name": "value" }"#).unwrap();
        assert_eq!(
            param.descriptor(),
            TypeDescriptor::Primitive(PrimitiveTag::Other)
        );
        assert!(!param.optional);
    }

    #[test]
    fn test_typedef_inline_descriptor() {
        let def: TypeDef = serde_json::from_str(
            r#"{ "id": "Headers", "type": "array", "items": { "$ref": "Header" } }"#,
        )
        .unwrap();
        assert!(!def.is_object());
        assert_eq!(
            def.inline_descriptor(),
            TypeDescriptor::Array(Some(Box::new(TypeDescriptor::Reference("Header".into()))))
        );
    }
}
