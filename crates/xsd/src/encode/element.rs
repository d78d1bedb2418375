use std::io::Write;

use serde_json::Value;
use tracing::{debug, trace};

use super::{Encode, XmlEncoder};
use crate::config::NamespaceControl;
use crate::error::{Result, XsdError};
use crate::model::Element;
use crate::namespace::{Aliaser, QualifiedRef};
use crate::path::{Path, has_value, lookup};

impl Encode for Element {
    fn encode<W: Write>(
        &self,
        encoder: &mut XmlEncoder<'_, W>,
        aliases: &dyn Aliaser,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        let path = path.child(&self.name);
        let params = encoder.params();

        // Nothing submitted for an optional element: leave it out entirely
        if self.is_optional() && !has_value(params, &path) {
            debug!(path = %path, "Skipping optional element without a value");
            return Ok(());
        }

        let limit = encoder.config().max_depth;
        if path.len() > limit {
            return Err(XsdError::DepthExceeded { limit, path });
        }

        let reference = if self.type_ref.is_empty() {
            None
        } else {
            let parsed = QualifiedRef::parse(&self.type_ref).ok_or_else(|| {
                XsdError::MalformedTypeReference {
                    reference: self.type_ref.clone(),
                    path: path.clone(),
                }
            })?;
            Some(parsed)
        };

        trace!(path = %path, type_ref = %self.type_ref, "Encoding element");

        let qualified = if namespace.use_namespace {
            Some(aliases.namespace()).filter(|uri| !uri.is_empty())
        } else {
            None
        };
        let nil = self.nillable && matches!(lookup(params, &path), Some(Value::Null));

        let open = encoder.start_element(&self.name, qualified, nil)?;

        if !nil {
            let children = namespace.descend();
            let chain = encoder.take_restriction_chain();
            let result = match (reference, &self.complex_type) {
                (Some(reference), _) => {
                    encoder.encode_reference(aliases, reference, &path, children)
                }
                (None, Some(inline)) => inline.encode(encoder, aliases, &path, children),
                (None, None) => Ok(()),
            };
            encoder.restore_restriction_chain(chain);
            result?;
        }

        encoder.end_element(open)
    }
}
