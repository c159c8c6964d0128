//! Intermediate Representation for protocol to TypeScript declaration generation.
//!
//! This module defines a three-layer architecture:
//! 1. Resolution: protocol descriptors -> TypeScript types (explicit owning domain)
//! 2. TypeScript IR: Types, interface members, interfaces, namespaces
//! 3. Emission: IR to TypeScript code strings via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: TypeScript IR (TsType, TsProp, TsMethod, TsInterface, TsNamespace)
//! - `resolve`: descriptor -> TsType resolution against the whole protocol
//! - `codegen`: domains -> TypeScript IR
//! - `emit`: TypeScript IR -> code strings (via Emit trait)
//! - `utils`: Naming and formatting helpers shared across modules

mod codegen;
mod emit;
mod resolve;
mod types;
pub mod utils;

// Re-export the main entry points
pub use codegen::{codegen_domain, codegen_interface, codegen_protocol, CodegenOptions, DomainIR, ProtocolIR};
pub use emit::Emit;
pub use resolve::{primitive_type, TypeResolver};
pub use types::{TsInterface, TsMember, TsMethod, TsNamespace, TsParam, TsPrimitive, TsProp, TsType};
