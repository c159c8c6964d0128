//! TypeScript IR types for declaration generation.
//!
//! This module defines the TypeScript declaration representation:
//! - TsType: Type expressions (primitives, arrays, inline objects, references)
//! - TsProp / TsParam / TsMethod: Interface members and their parts
//! - TsInterface / TsNamespace: Top-level declaration blocks

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, any, void
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Inline object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Named type reference, possibly qualified: "Frame", "Page.Frame"
    Ref(String),
    /// Generic instantiation: Callback<T>
    Generic { name: String, args: Vec<TsType> },
    /// Function type: (payload: T) => void
    Function {
        params: Vec<TsParam>,
        ret: Box<TsType>,
    },
    /// String literal type: "requestWillBeSent"
    StringLiteral(String),
}

impl TsType {
    pub fn any() -> Self {
        TsType::Primitive(TsPrimitive::Any)
    }

    pub fn void() -> Self {
        TsType::Primitive(TsPrimitive::Void)
    }

    pub fn array_of(inner: TsType) -> Self {
        TsType::Array(Box::new(inner))
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Any,
    Void,
}

/// Object or interface property
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
    /// Documentation reproduced verbatim above the property
    pub doc: Option<String>,
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// Method signature inside an interface
#[derive(Debug, Clone, PartialEq)]
pub struct TsMethod {
    pub name: String,
    pub params: Vec<TsParam>,
    pub return_type: TsType,
    pub doc: Option<String>,
}

/// Interface member
#[derive(Debug, Clone, PartialEq)]
pub enum TsMember {
    Property(TsProp),
    Method(TsMethod),
}

/// interface Foo { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct TsInterface {
    pub name: String,
    pub doc: Option<String>,
    pub is_export: bool,
    pub members: Vec<TsMember>,
}

/// namespace Foo { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct TsNamespace {
    pub name: String,
    pub interfaces: Vec<TsInterface>,
}
