//! Type resolution from protocol descriptors to TypeScript types.
//!
//! Resolution is a pure function of (descriptor, owning domain, protocol,
//! qualify). The owning domain is passed explicitly at every step; when a
//! reference expands a primitive-tagged type, that type's own element
//! descriptors are looked up in the domain that declares it.

use crate::error::ResolveError;
use crate::protocol::schema::{Domain, PrimitiveTag, Protocol, TypeDef, TypeDescriptor};

use super::types::{TsPrimitive, TsType};

/// Fixed mapping for primitive tags.
pub fn primitive_type(tag: PrimitiveTag) -> TsType {
    match tag {
        PrimitiveTag::Boolean => TsType::Primitive(TsPrimitive::Boolean),
        PrimitiveTag::String => TsType::Primitive(TsPrimitive::String),
        PrimitiveTag::Integer => TsType::Primitive(TsPrimitive::Number),
        PrimitiveTag::Array => TsType::array_of(TsType::any()),
        PrimitiveTag::Other => TsType::any(),
    }
}

/// Where the resolved type is going to be emitted.
#[derive(Debug, Clone, Copy)]
struct Scope<'s> {
    /// Domain whose namespace (or surface) the type is emitted for.
    owner: &'s str,
    /// Emitting outside the owner's namespace.
    qualify: bool,
}

/// Resolves descriptors against a whole protocol.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    protocol: &'a Protocol,
}

impl<'a> TypeResolver<'a> {
    pub fn new(protocol: &'a Protocol) -> Self {
        Self { protocol }
    }

    /// Resolve `descriptor`, declared in `owner`, to a TypeScript type.
    ///
    /// Object types declared in another domain are always emitted qualified
    /// (`Page.Frame`); object types of `owner` itself are qualified only when
    /// `qualify` is set.
    pub fn resolve(
        &self,
        descriptor: &TypeDescriptor,
        owner: &Domain,
        qualify: bool,
    ) -> Result<TsType, ResolveError> {
        let scope = Scope {
            owner: &owner.name,
            qualify,
        };
        self.resolve_in(descriptor, owner, scope, &mut Vec::new())
    }

    fn resolve_in(
        &self,
        descriptor: &TypeDescriptor,
        lookup: &Domain,
        scope: Scope<'_>,
        expanding: &mut Vec<String>,
    ) -> Result<TsType, ResolveError> {
        match descriptor {
            TypeDescriptor::Primitive(tag) => Ok(primitive_type(*tag)),
            TypeDescriptor::Array(None) => Ok(TsType::array_of(TsType::any())),
            TypeDescriptor::Array(Some(items)) => {
                let inner = self.resolve_in(items, lookup, scope, expanding)?;
                Ok(TsType::array_of(inner))
            }
            TypeDescriptor::Reference(reference) => {
                let (declaring, def) = self.lookup_reference(reference, lookup)?;
                if def.is_object() {
                    return Ok(object_ref(declaring, def, scope));
                }

                // Primitive-tagged types are inlined
                let key = format!("{}.{}", declaring.name, def.id);
                if expanding.contains(&key) {
                    return Err(ResolveError::ReferenceCycle {
                        reference: reference.clone(),
                        from: lookup.name.clone(),
                    });
                }
                expanding.push(key);
                let resolved = self.resolve_in(&def.inline_descriptor(), declaring, scope, expanding);
                expanding.pop();
                resolved
            }
        }
    }

    /// Find the single type a reference names, starting from `lookup`.
    fn lookup_reference<'s>(
        &'s self,
        reference: &str,
        lookup: &'s Domain,
    ) -> Result<(&'s Domain, &'s TypeDef), ResolveError> {
        let parts: Vec<&str> = reference.split('.').collect();
        match parts.as_slice() {
            [id] if !id.is_empty() => Ok((lookup, find_type(lookup, id, reference, &lookup.name)?)),
            [domain_name, id] if !domain_name.is_empty() && !id.is_empty() => {
                let domain = self.find_domain(domain_name, reference, &lookup.name)?;
                Ok((domain, find_type(domain, id, reference, &lookup.name)?))
            }
            _ => Err(ResolveError::MalformedReference {
                reference: reference.to_string(),
                domain: lookup.name.clone(),
            }),
        }
    }

    fn find_domain(&self, name: &str, reference: &str, from: &str) -> Result<&'a Domain, ResolveError> {
        let mut matches = self.protocol.domains.iter().filter(|d| d.name == name);
        match (matches.next(), matches.count()) {
            (Some(domain), 0) => Ok(domain),
            (None, _) => Err(ResolveError::UnknownDomain {
                reference: reference.to_string(),
                from: from.to_string(),
                domain: name.to_string(),
            }),
            (Some(_), rest) => Err(ResolveError::AmbiguousDomain {
                reference: reference.to_string(),
                from: from.to_string(),
                domain: name.to_string(),
                count: rest + 1,
            }),
        }
    }
}

fn find_type<'d>(
    domain: &'d Domain,
    id: &str,
    reference: &str,
    from: &str,
) -> Result<&'d TypeDef, ResolveError> {
    let mut matches = domain.types.iter().filter(|t| t.id == id);
    match (matches.next(), matches.count()) {
        (Some(def), 0) => Ok(def),
        (None, _) => Err(ResolveError::UnknownType {
            reference: reference.to_string(),
            from: from.to_string(),
            domain: domain.name.clone(),
            id: id.to_string(),
        }),
        (Some(_), rest) => Err(ResolveError::AmbiguousType {
            reference: reference.to_string(),
            from: from.to_string(),
            domain: domain.name.clone(),
            id: id.to_string(),
            count: rest + 1,
        }),
    }
}

fn object_ref(declaring: &Domain, def: &TypeDef, scope: Scope<'_>) -> TsType {
    if scope.qualify || declaring.name != scope.owner {
        TsType::Ref(format!("{}.{}", declaring.name, def.id))
    } else {
        TsType::Ref(def.id.clone())
    }
}
