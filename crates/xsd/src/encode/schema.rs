use std::io::Write;

use tracing::trace;

use super::{Encode, XmlEncoder};
use crate::config::NamespaceControl;
use crate::error::{Result, XsdError};
use crate::model::{Schema, TypeDefinition};
use crate::namespace::Aliaser;
use crate::path::Path;

impl Encode for TypeDefinition<'_> {
    fn encode<W: Write>(
        &self,
        encoder: &mut XmlEncoder<'_, W>,
        aliases: &dyn Aliaser,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        match self {
            TypeDefinition::Complex(t) => t.encode(encoder, aliases, path, namespace),
            TypeDefinition::Simple(t) => t.encode(encoder, aliases, path, namespace),
        }
    }
}

impl Schema {
    /// Encodes the top-level element `name` declared by this schema.
    pub fn encode_element<W: Write>(
        &self,
        name: &str,
        encoder: &mut XmlEncoder<'_, W>,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        let element = self
            .find_element(name)
            .ok_or_else(|| XsdError::ElementNotFound {
                schema: self.target_namespace.clone(),
                name: name.to_string(),
            })?;
        element.encode(encoder, self, path, namespace)
    }

    /// Encodes the named complex or simple type declared by this schema.
    ///
    /// The type's members resolve their own references through this schema's
    /// alias table.
    pub fn encode_type<W: Write>(
        &self,
        name: &str,
        encoder: &mut XmlEncoder<'_, W>,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        let definition = self.find_type(name).ok_or_else(|| XsdError::TypeNotFound {
            schema: self.target_namespace.clone(),
            name: name.to_string(),
        })?;
        trace!(schema = %self.namespace(), type_name = %definition.name(), "Dispatching type");
        definition.encode(encoder, self, path, namespace)
    }
}
