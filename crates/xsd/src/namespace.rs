//! Namespace constants, qualified references and prefix resolution.

use crate::model::Schema;

/// XML Schema namespace URI; references into it are built-in primitives.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema instance namespace URI, used for `xsi:nil`.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const XSI_PREFIX: &str = "xsi";

/// Resolves namespace prefixes the way the declaring schema does.
pub trait Aliaser {
    /// Namespace URI bound to `prefix`, if the document declared one.
    fn alias(&self, prefix: &str) -> Option<&str>;

    /// The document's own target namespace.
    fn namespace(&self) -> &str;
}

impl Aliaser for Schema {
    fn alias(&self, prefix: &str) -> Option<&str> {
        self.aliases.get(prefix).map(String::as_str)
    }

    fn namespace(&self) -> &str {
        &self.target_namespace
    }
}

/// A `prefix:localName` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedRef<'a> {
    pub prefix: &'a str,
    pub local: &'a str,
}

impl<'a> QualifiedRef<'a> {
    /// Splits a reference into exactly two colon-delimited parts.
    ///
    /// Returns `None` for anything else, including empty parts.
    pub fn parse(reference: &'a str) -> Option<Self> {
        let mut parts = reference.split(':');
        let prefix = parts.next()?;
        let local = parts.next()?;
        if parts.next().is_some() || prefix.is_empty() || local.is_empty() {
            return None;
        }
        Some(Self { prefix, local })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let r = QualifiedRef::parse("tns:Order").unwrap();
        assert_eq!(r.prefix, "tns");
        assert_eq!(r.local, "Order");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(QualifiedRef::parse("Order").is_none());
        assert!(QualifiedRef::parse("a:b:c").is_none());
        assert!(QualifiedRef::parse(":Order").is_none());
        assert!(QualifiedRef::parse("tns:").is_none());
        assert!(QualifiedRef::parse("").is_none());
    }

    #[test]
    fn test_schema_aliases() {
        let schema = Schema::new("urn:a").with_alias("b", "urn:b");
        assert_eq!(schema.alias("b"), Some("urn:b"));
        assert_eq!(schema.alias("c"), None);
        assert_eq!(schema.namespace(), "urn:a");
    }
}
