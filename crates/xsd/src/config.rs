//! Encoder configuration.
//!
//! # Example
//!
//! ```rust
//! use soapxml_xsd::EncoderConfig;
//!
//! // Qualify every element, not just the root
//! let config = EncoderConfig {
//!     keep_using_namespace: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::namespace::XSI_PREFIX;

/// Prefix bound to the owning schema's target namespace on qualified tags.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "ns0";

/// Default bound on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for one encode pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncoderConfig {
    /// Prefix written on namespace-qualified tags.
    pub namespace_prefix: String,

    /// Qualify the root element with its schema's target namespace.
    pub use_namespace: bool,

    /// Pass namespace qualification on to descendants.
    pub keep_using_namespace: bool,

    /// Maximum element path length, root included.
    pub max_depth: usize,

    /// Write an `<?xml ...?>` declaration before the root element.
    pub write_declaration: bool,

    /// Indent nested elements by this many spaces.
    pub indent: Option<usize>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            use_namespace: true,
            keep_using_namespace: false,
            max_depth: DEFAULT_MAX_DEPTH,
            write_declaration: false,
            indent: None,
        }
    }
}

impl EncoderConfig {
    /// Returns the namespace flags for the root element.
    pub fn namespace_control(&self) -> NamespaceControl {
        NamespaceControl {
            use_namespace: self.use_namespace,
            keep_using_namespace: self.keep_using_namespace,
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.namespace_prefix.is_empty() {
            errors.push("Namespace prefix cannot be empty".to_string());
        }

        if self.namespace_prefix.contains(':') {
            errors.push("Namespace prefix cannot contain ':'".to_string());
        }

        // xsi is bound by nil elements; xml* prefixes are reserved
        if self.namespace_prefix == XSI_PREFIX
            || self
                .namespace_prefix
                .get(..3)
                .is_some_and(|head| head.eq_ignore_ascii_case("xml"))
        {
            errors.push(format!(
                "Namespace prefix '{}' is reserved",
                self.namespace_prefix
            ));
        }

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Per-call namespace qualification flags.
///
/// `use_namespace` applies to the element being written. Its children are
/// called with `keep_using_namespace` in both positions, so the pair
/// `(true, false)` qualifies only the outermost element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NamespaceControl {
    pub use_namespace: bool,
    pub keep_using_namespace: bool,
}

impl NamespaceControl {
    /// Flags handed to recursive calls.
    pub fn descend(self) -> Self {
        Self {
            use_namespace: self.keep_using_namespace,
            keep_using_namespace: self.keep_using_namespace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.namespace_prefix, "ns0");
        assert!(config.use_namespace);
        assert!(!config.keep_using_namespace);
        assert_eq!(config.max_depth, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EncoderConfig {
            namespace_prefix: String::new(),
            max_depth: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_rejects_reserved_prefixes() {
        for prefix in ["xsi", "xml", "xmlns", "XmlFoo"] {
            let config = EncoderConfig {
                namespace_prefix: prefix.to_string(),
                ..Default::default()
            };
            let errors = config.validate().unwrap_err();
            assert_eq!(errors, [format!("Namespace prefix '{}' is reserved", prefix)]);
        }

        let config = EncoderConfig {
            namespace_prefix: "tns".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_descend_only_keeps_second_flag() {
        let root = NamespaceControl {
            use_namespace: true,
            keep_using_namespace: false,
        };
        assert_eq!(root.descend(), NamespaceControl::default());

        let all = NamespaceControl {
            use_namespace: true,
            keep_using_namespace: true,
        };
        assert_eq!(all.descend(), all);
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"keepUsingNamespace": true, "indent": 2}"#).unwrap();
        assert!(config.keep_using_namespace);
        assert_eq!(config.indent, Some(2));
        assert_eq!(config.namespace_prefix, "ns0");
    }
}
