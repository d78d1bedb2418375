use std::io::Write;

use tracing::trace;

use super::{Encode, XmlEncoder};
use crate::config::NamespaceControl;
use crate::error::{Result, XsdError};
use crate::model::SimpleType;
use crate::namespace::{Aliaser, QualifiedRef};
use crate::path::Path;

impl Encode for SimpleType {
    /// Delegates to the restriction base. Enumerations are not checked.
    fn encode<W: Write>(
        &self,
        encoder: &mut XmlEncoder<'_, W>,
        aliases: &dyn Aliaser,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        let base = &self.restriction.base;
        let reference = QualifiedRef::parse(base).ok_or_else(|| XsdError::MalformedRestriction {
            base: base.clone(),
            path: path.clone(),
        })?;

        trace!(path = %path, type_name = %self.name, base = %base, "Encoding simple type");

        encoder.enter_restriction(format!("{{{}}}{}", aliases.namespace(), self.name))?;
        let result = encoder.encode_reference(aliases, reference, path, namespace.descend());
        encoder.leave_restriction();
        result
    }
}
