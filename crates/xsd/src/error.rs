//! Error types for schema loading and XML encoding.
//!
//! Every error is fatal to the encode call that produced it. Errors bubble up
//! through the recursion unchanged so the caller sees exactly which reference,
//! element or write failed.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::path::Path;

/// The error type for all encoding and loading operations.
#[derive(Error, Debug)]
pub enum XsdError {
    /// A `type` attribute is not of the form `prefix:localName`.
    #[error("malformed type '{reference}' in path {path}")]
    MalformedTypeReference { reference: String, path: Path },

    /// A restriction `base` attribute is not of the form `prefix:localName`.
    #[error("invalid restriction format '{base}' in path {path}")]
    MalformedRestriction { base: String, path: Path },

    /// A namespace prefix is not declared on the schema that uses it.
    #[error("prefix '{prefix}' is not declared in schema '{schema}'")]
    UnresolvedAlias { prefix: String, schema: String },

    /// The repository holds no schema for the namespace.
    #[error("schema not found for namespace '{namespace}'")]
    SchemaNotFound { namespace: String },

    /// No top-level element with this name exists in the schema.
    #[error("did not find element '{name}' in schema '{schema}'")]
    ElementNotFound { schema: String, name: String },

    /// No complex or simple type with this name exists in the schema.
    #[error("did not find type '{name}' in schema '{schema}'")]
    TypeNotFound { schema: String, name: String },

    /// A simple type restriction chain leads back to a type already on the chain.
    #[error("cyclic restriction chain: {}", chain.join(" -> "))]
    CyclicRestriction { chain: Vec<String> },

    /// Element nesting went deeper than the configured limit.
    #[error("maximum depth of {limit} exceeded in path {path}")]
    DepthExceeded { limit: usize, path: Path },

    /// A primitive-typed element received an object or array value.
    #[error("expected a scalar value in path {path}")]
    NonScalarValue { path: Path },

    /// The schema document does not have the expected shape.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The encoder configuration failed validation.
    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Reading a schema file or writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// Result type alias for encoding and loading operations.
pub type Result<T> = std::result::Result<T, XsdError>;
