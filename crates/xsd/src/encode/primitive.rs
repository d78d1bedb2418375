//! Content for XML Schema built-in types.

use std::io::Write;

use tracing::trace;

use super::XmlEncoder;
use crate::error::Result;
use crate::path::{Path, lookup, scalar_text};

/// Writes the scalar submitted at `path` as text. Missing and `null` values
/// write nothing.
pub(super) fn encode<W: Write>(
    encoder: &mut XmlEncoder<'_, W>,
    type_name: &str,
    path: &Path,
) -> Result<()> {
    trace!(path = %path, type_name = %type_name, "Encoding primitive");

    let Some(value) = lookup(encoder.params(), path) else {
        return Ok(());
    };

    match scalar_text(value, path)? {
        Some(text) => encoder.write_text(&text),
        None => Ok(()),
    }
}
