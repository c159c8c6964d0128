//! Error types for typings generation.

use std::path::PathBuf;

use thiserror::Error;

/// A type reference that cannot be resolved against the protocol.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed reference '{reference}' in domain {domain} (expected 'Type' or 'Domain.Type')")]
    MalformedReference { reference: String, domain: String },

    #[error("reference '{reference}' from domain {from} names unknown domain {domain}")]
    UnknownDomain {
        reference: String,
        from: String,
        domain: String,
    },

    #[error("reference '{reference}' from domain {from} is ambiguous: domain {domain} is declared {count} times")]
    AmbiguousDomain {
        reference: String,
        from: String,
        domain: String,
        count: usize,
    },

    #[error("reference '{reference}' from domain {from}: type {id} is not declared in domain {domain}")]
    UnknownType {
        reference: String,
        from: String,
        domain: String,
        id: String,
    },

    #[error("reference '{reference}' from domain {from} is ambiguous: type {id} is declared {count} times in domain {domain}")]
    AmbiguousType {
        reference: String,
        from: String,
        domain: String,
        id: String,
        count: usize,
    },

    #[error("reference '{reference}' from domain {from} expands into itself")]
    ReferenceCycle { reference: String, from: String },
}

/// Failure while building the declarations for one protocol entity.
#[derive(Debug, Error)]
#[error("{location}: {source}")]
pub struct GenerateError {
    /// Where the failing descriptor lives, e.g. `Network.getResponseBody parameter 'requestId'`.
    pub location: String,
    #[source]
    pub source: ResolveError,
}

/// The template does not have the shape the merger expects.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template has no declaration of class {class_name} closed by a brace at the same indentation")]
    MissingClass { class_name: String },

    #[error("template has no 'declare module {namespace} {{' line")]
    MissingModuleDeclaration { namespace: String },

    #[error("template anchors overlap near byte {offset}")]
    OverlappingAnchors { offset: usize },

    #[error("invalid anchor pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Top-level error for a generator run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse protocol description: {0}")]
    Schema(#[from] serde_json::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is out of date; run generate to refresh it")]
    OutOfDate { path: PathBuf, diff: String },
}

pub type Result<T> = std::result::Result<T, Error>;
