//! Lookup of loaded schemas by target namespace.

use std::collections::BTreeMap;
use std::io::Write;

use serde_json::Value;
use tracing::debug;

use crate::config::EncoderConfig;
use crate::encode::encode_to_writer;
use crate::error::{Result, XsdError};
use crate::model::Schema;

/// Maps a target namespace URI to its schema.
///
/// Implementations must not change the schemas they hand out while an encode
/// pass is running.
pub trait SchemaRepository {
    /// Returns the schema whose target namespace is `namespace`.
    fn get_schema(&self, namespace: &str) -> Result<&Schema>;
}

/// A repository backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemorySchemaRepository {
    schemas: BTreeMap<String, Schema>,
}

impl MemorySchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from schemas; a later schema replaces an earlier
    /// one with the same target namespace.
    pub fn from_schemas<I>(schemas: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        let mut repository = Self::new();
        for schema in schemas {
            repository.insert(schema);
        }
        repository
    }

    /// Adds a schema, returning the one it replaced.
    pub fn insert(&mut self, schema: Schema) -> Option<Schema> {
        debug!(namespace = %schema.target_namespace, "Registering schema");
        self.schemas.insert(schema.target_namespace.clone(), schema)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered target namespaces in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Encodes the top-level element `name` of the schema for `namespace`.
    pub fn encode_element<W: Write>(
        &self,
        namespace: &str,
        name: &str,
        params: &Value,
        config: &EncoderConfig,
        writer: W,
    ) -> Result<W> {
        let schema = self.get_schema(namespace)?;
        encode_to_writer(schema, self, name, params, config, writer)
    }
}

impl SchemaRepository for MemorySchemaRepository {
    fn get_schema(&self, namespace: &str) -> Result<&Schema> {
        self.schemas
            .get(namespace)
            .ok_or_else(|| XsdError::SchemaNotFound {
                namespace: namespace.to_string(),
            })
    }
}
