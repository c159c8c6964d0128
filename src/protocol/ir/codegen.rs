//! Code generation from the protocol description to TypeScript IR.
//!
//! This module transforms domains (commands, events, types) into TypeScript
//! declaration nodes (interfaces, namespaces, class properties). Every
//! function here is pure; fragments are collected in schema order by
//! `codegen_protocol` and emitted afterwards via the `Emit` trait.

use crate::error::GenerateError;
use crate::protocol::schema::{Command, Domain, Event, Parameter, Protocol};

use super::resolve::TypeResolver;
use super::types::{
    TsInterface, TsMember, TsMethod, TsNamespace, TsParam, TsPrimitive, TsProp, TsType,
};
use super::utils::{event_interface_name, params_interface_name, surface_interface_name};

/// Names of the template-provided types the command surface refers to.
#[derive(Debug, Clone, Copy)]
pub struct CodegenOptions<'o> {
    /// Generic result wrapper for command callbacks: `Callback<T>`
    pub callback_type: &'o str,
    /// Return type of the event subscription overloads
    pub emitter_type: &'o str,
}

/// Declarations generated for one domain.
#[derive(Debug, Clone)]
pub struct DomainIR {
    /// `Network: INetwork` entry for the host class body
    pub property: TsProp,
    /// `interface INetwork { ... }`
    pub surface: TsInterface,
    /// `namespace Network { ... }`
    pub namespace: TsNamespace,
}

/// Declarations generated for a whole protocol, each list in schema order.
#[derive(Debug, Clone, Default)]
pub struct ProtocolIR {
    pub properties: Vec<TsProp>,
    pub surfaces: Vec<TsInterface>,
    pub namespaces: Vec<TsNamespace>,
}

/// Generate the declarations for every domain of the protocol.
pub fn codegen_protocol(
    protocol: &Protocol,
    options: &CodegenOptions<'_>,
) -> Result<ProtocolIR, GenerateError> {
    let resolver = TypeResolver::new(protocol);
    let mut ir = ProtocolIR::default();

    for domain in &protocol.domains {
        let DomainIR {
            property,
            surface,
            namespace,
        } = codegen_domain(domain, &resolver, options)?;
        ir.properties.push(property);
        ir.surfaces.push(surface);
        ir.namespaces.push(namespace);
    }

    Ok(ir)
}

/// Generate the namespace block, command surface and class property for a domain.
pub fn codegen_domain(
    domain: &Domain,
    resolver: &TypeResolver<'_>,
    options: &CodegenOptions<'_>,
) -> Result<DomainIR, GenerateError> {
    let surface_name = surface_interface_name(&domain.name);

    Ok(DomainIR {
        property: TsProp {
            name: domain.name.clone(),
            ty: TsType::Ref(surface_name.clone()),
            optional: false,
            doc: None,
        },
        surface: codegen_surface(&surface_name, domain, resolver, options)?,
        namespace: codegen_namespace(domain, resolver)?,
    })
}

/// Generate the namespace holding every interface declared by a domain.
///
/// Order: command parameters, object types, event payloads.
fn codegen_namespace(domain: &Domain, resolver: &TypeResolver<'_>) -> Result<TsNamespace, GenerateError> {
    let mut interfaces = Vec::new();

    for command in domain.commands.iter().filter(|c| !c.parameters.is_empty()) {
        interfaces.push(codegen_interface(
            &params_interface_name(&command.name),
            None,
            &command.parameters,
            domain,
            resolver,
            &format!("{}.{} parameter", domain.name, command.name),
        )?);
    }

    for def in domain.types.iter().filter(|t| t.is_object()) {
        interfaces.push(codegen_interface(
            &def.id,
            def.description.as_deref(),
            &def.properties,
            domain,
            resolver,
            &format!("{}.{} property", domain.name, def.id),
        )?);
    }

    for event in &domain.events {
        interfaces.push(codegen_interface(
            &event_interface_name(&event.name),
            event.description.as_deref(),
            &event.parameters,
            domain,
            resolver,
            &format!("{}.{} event field", domain.name, event.name),
        )?);
    }

    Ok(TsNamespace {
        name: domain.name.clone(),
        interfaces,
    })
}

/// Generate an exported interface from an ordered list of fields.
///
/// The interface lives inside the owner's namespace, so references to the
/// owner's own object types stay unqualified.
pub fn codegen_interface(
    name: &str,
    doc: Option<&str>,
    fields: &[Parameter],
    owner: &Domain,
    resolver: &TypeResolver<'_>,
    location: &str,
) -> Result<TsInterface, GenerateError> {
    let members = codegen_props(fields, owner, resolver, false, location)?
        .into_iter()
        .map(TsMember::Property)
        .collect();

    Ok(TsInterface {
        name: name.to_string(),
        doc: doc.map(str::to_string),
        is_export: true,
        members,
    })
}

fn codegen_props(
    fields: &[Parameter],
    owner: &Domain,
    resolver: &TypeResolver<'_>,
    qualify: bool,
    location: &str,
) -> Result<Vec<TsProp>, GenerateError> {
    fields
        .iter()
        .map(|field| {
            let ty = resolver
                .resolve(&field.descriptor(), owner, qualify)
                .map_err(|source| GenerateError {
                    location: format!("{location} '{}'", field.name),
                    source,
                })?;
            Ok(TsProp {
                name: field.name.clone(),
                ty,
                optional: field.optional,
                doc: field.description.clone(),
            })
        })
        .collect()
}

/// Generate the `I<Domain>` interface: one method per command, plus the
/// `on` overloads when the domain has events.
fn codegen_surface(
    name: &str,
    domain: &Domain,
    resolver: &TypeResolver<'_>,
    options: &CodegenOptions<'_>,
) -> Result<TsInterface, GenerateError> {
    let mut members = Vec::new();

    for command in &domain.commands {
        members.push(TsMember::Method(codegen_command(
            command, domain, resolver, options,
        )?));
    }

    if !domain.events.is_empty() {
        for event in &domain.events {
            members.push(TsMember::Method(codegen_subscription(
                Some(event),
                domain,
                options,
            )));
        }
        members.push(TsMember::Method(codegen_subscription(None, domain, options)));
    }

    Ok(TsInterface {
        name: name.to_string(),
        doc: domain.description.clone(),
        is_export: false,
        members,
    })
}

/// `name(params?: Domain.INameParams, cb?: Callback<{ ... }>): void`
fn codegen_command(
    command: &Command,
    domain: &Domain,
    resolver: &TypeResolver<'_>,
    options: &CodegenOptions<'_>,
) -> Result<TsMethod, GenerateError> {
    let mut params = Vec::new();

    if !command.parameters.is_empty() {
        params.push(TsParam {
            name: "params".into(),
            ty: TsType::Ref(format!(
                "{}.{}",
                domain.name,
                params_interface_name(&command.name)
            )),
            optional: command.parameters.iter().any(|p| p.optional),
        });
    }

    // The surface sits outside the namespace, so every object type is qualified
    let result = if command.returns.is_empty() {
        TsType::any()
    } else {
        let mut props = codegen_props(
            &command.returns,
            domain,
            resolver,
            true,
            &format!("{}.{} return", domain.name, command.name),
        )?;
        // Inline object types carry no docs
        for prop in &mut props {
            prop.doc = None;
        }
        TsType::Object(props)
    };

    params.push(TsParam {
        name: "cb".into(),
        ty: TsType::Generic {
            name: options.callback_type.to_string(),
            args: vec![result],
        },
        optional: true,
    });

    Ok(TsMethod {
        name: command.name.clone(),
        params,
        return_type: TsType::void(),
        doc: command.description.clone(),
    })
}

/// `on(event: "name", cb: (payload: Domain.INameEvent) => void): Emitter`, or
/// the catch-all string overload when `event` is `None`.
fn codegen_subscription(
    event: Option<&Event>,
    domain: &Domain,
    options: &CodegenOptions<'_>,
) -> TsMethod {
    let (event_ty, payload_ty) = match event {
        Some(event) => (
            TsType::StringLiteral(event.name.clone()),
            TsType::Ref(format!(
                "{}.{}",
                domain.name,
                event_interface_name(&event.name)
            )),
        ),
        None => (TsType::Primitive(TsPrimitive::String), TsType::any()),
    };

    TsMethod {
        name: "on".into(),
        params: vec![
            TsParam {
                name: "event".into(),
                ty: event_ty,
                optional: false,
            },
            TsParam {
                name: "cb".into(),
                ty: TsType::Function {
                    params: vec![TsParam {
                        name: "payload".into(),
                        ty: payload_ty,
                        optional: false,
                    }],
                    ret: Box::new(TsType::void()),
                },
                optional: false,
            },
        ],
        return_type: TsType::Ref(options.emitter_type.to_string()),
        doc: None,
    }
}
