//! Element paths and lookups into the submitted params tree.
//!
//! A [`Path`] is the chain of element names from the encoding root to the
//! current element. The params tree is a `serde_json::Value` shaped like the
//! document: objects keyed by element name, scalars at the leaves. Arrays may
//! appear anywhere along the way; a lookup through an array matches the first
//! item that has the rest of the path.
//!
//! ```rust
//! use serde_json::json;
//! use soapxml_xsd::path::{Path, has_value, lookup};
//!
//! let params = json!({"Order": {"Id": "42"}});
//! let id = Path::root().child("Order").child("Id");
//! assert!(has_value(&params, &id));
//! assert_eq!(lookup(&params, &id), Some(&json!("42")));
//! assert!(!has_value(&params, &Path::root().child("Order").child("Note")));
//! ```

use serde_json::Value;
use std::fmt;

use crate::error::{Result, XsdError};

/// Separator used when a path is rendered as text.
pub const PATH_SEPARATOR: char = '.';

/// Ordered element names from the root to the current element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path, above the root element.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from element names.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path extended by `name`; `self` is left untouched.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name of the innermost element, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Reports whether a value was submitted at `path` or anywhere beneath it.
///
/// An explicit `null` counts as submitted.
pub fn has_value(params: &Value, path: &Path) -> bool {
    lookup(params, path).is_some()
}

/// Returns the value submitted at `path`, if any.
pub fn lookup<'a>(params: &'a Value, path: &Path) -> Option<&'a Value> {
    lookup_segments(params, path.segments())
}

fn lookup_segments<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(value);
    };

    match value {
        Value::Object(map) => map
            .get(head)
            .and_then(|child| lookup_segments(child, rest)),
        Value::Array(items) => items
            .iter()
            .find_map(|item| lookup_segments(item, segments)),
        _ => None,
    }
}

/// Renders the scalar submitted at `path` as element text.
///
/// Returns `Ok(None)` for `null`. Objects and arrays have no text form.
pub fn scalar_text(value: &Value, path: &Path) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(bool_to_string(*b).to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Object(_) | Value::Array(_) => Err(XsdError::NonScalarValue { path: path.clone() }),
    }
}

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}
