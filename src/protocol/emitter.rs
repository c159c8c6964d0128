//! TypeScript declaration emitter for protocol descriptions.
//!
//! This module is a thin wrapper around the IR-based code generation.
//! The pipeline is:
//! 1. Parse: protocol JSON -> Protocol, template text -> Template
//! 2. Codegen: Protocol -> ProtocolIR (all references resolved)
//! 3. Emit: ProtocolIR -> Fragments (via Emit trait)
//! 4. Merge: Template + Fragments -> document

use tracing::debug;

use crate::config::EmitConfig;
use crate::error::Result;
use crate::protocol::ir::utils::indent;
use crate::protocol::ir::{codegen_protocol, Emit, ProtocolIR};
use crate::protocol::merge::{Fragments, Template};
use crate::protocol::schema::Protocol;

/// Generate the typings document from a protocol JSON string and a template.
pub fn generate(protocol_json: &str, template: &str, options: &EmitConfig) -> Result<String> {
    // Parse both inputs before doing any work
    let protocol = Protocol::from_json(protocol_json)?;
    let template = Template::parse(template, &options.merge_options())?;
    debug!(
        domains = protocol.domains.len(),
        imports = template.imports().len(),
        "Parsed protocol and template."
    );

    // Resolve everything up front; any failure aborts the whole run
    let ir = codegen_protocol(&protocol, &options.codegen_options())?;

    Ok(template.render(&emit_fragments(&ir)))
}

/// Emit the class properties (inside the host class, two levels deep) and
/// the surface interfaces followed by the namespaces (one level deep).
pub fn emit_fragments(ir: &ProtocolIR) -> Fragments {
    let class_members = ir
        .properties
        .iter()
        .map(|prop| format!("{}{};\n", indent(2), prop.emit()))
        .collect();

    let mut declarations = String::new();
    for surface in &ir.surfaces {
        declarations.push_str(&surface.emit_indented(1));
    }
    for namespace in &ir.namespaces {
        declarations.push_str(&namespace.emit_indented(1));
    }

    Fragments {
        class_members,
        declarations,
    }
}
