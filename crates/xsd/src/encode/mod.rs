//! Schema-driven XML encoding.
//!
//! Encoding is a depth-first walk over already-loaded schema metadata. Each
//! schema construct implements [`Encode`]:
//!
//! - [`Element`](crate::model::Element) writes its own tags and resolves its
//!   declared type, or recurses into its anonymous complex type.
//! - [`ComplexType`](crate::model::ComplexType) encodes its sequence, choice
//!   and sequence-choice members in that order.
//! - [`SimpleType`](crate::model::SimpleType) never writes a tag; it hands off
//!   to its restriction base.
//! - [`TypeDefinition`](crate::model::TypeDefinition) dispatches to one of the
//!   two above.
//!
//! Type references are resolved in two explicit steps: the prefix goes
//! through the alias table of the schema that declared the reference, and the
//! resulting namespace URI goes through the [`SchemaRepository`]. References
//! into the XML Schema namespace are primitives and write the submitted scalar
//! as text.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use soapxml_xsd::{ComplexType, Element, EncoderConfig, MemorySchemaRepository, Schema};
//! use soapxml_xsd::encode::encode_to_string;
//! use soapxml_xsd::namespace::XSD_NAMESPACE;
//!
//! let schema = Schema::new("urn:orders")
//!     .with_alias("xs", XSD_NAMESPACE)
//!     .with_element(Element::new("Order").with_complex_type(ComplexType::anonymous(vec![
//!         Element::new("Id").with_type("xs:string"),
//!         Element::new("Note").with_type("xs:string").optional(),
//!     ])));
//! let repository = MemorySchemaRepository::from_schemas([schema.clone()]);
//! let config = EncoderConfig { use_namespace: false, ..Default::default() };
//!
//! let xml = encode_to_string(&schema, &repository, "Order", &json!({"Order": {"Id": "42"}}), &config)?;
//! assert_eq!(xml, "<Order><Id>42</Id></Order>");
//! # Ok::<(), soapxml_xsd::XsdError>(())
//! ```

mod complex_type;
mod element;
mod primitive;
mod schema;
mod simple_type;

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{EncoderConfig, NamespaceControl};
use crate::error::{Result, XsdError};
use crate::model::Schema;
use crate::namespace::{Aliaser, QualifiedRef, XSD_NAMESPACE, XSI_NAMESPACE, XSI_PREFIX};
use crate::path::Path;
use crate::repository::SchemaRepository;

/// The shared encode contract of every schema construct.
pub trait Encode {
    /// Encodes `self` at `path`.
    ///
    /// `aliases` is the schema that declared `self`; its prefixes and target
    /// namespace apply to any reference made from here.
    fn encode<W: Write>(
        &self,
        encoder: &mut XmlEncoder<'_, W>,
        aliases: &dyn Aliaser,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()>;
}

/// Encodes the top-level element `root` of `schema` into `writer`.
///
/// The writer is handed back unflushed and unclosed.
pub fn encode_to_writer<W: Write>(
    schema: &Schema,
    repository: &dyn SchemaRepository,
    root: &str,
    params: &Value,
    config: &EncoderConfig,
    writer: W,
) -> Result<W> {
    let mut encoder = XmlEncoder::new(writer, repository, params, config);
    encoder.encode_root(schema, root)?;
    Ok(encoder.into_inner())
}

/// Encodes the top-level element `root` of `schema` to an XML string.
pub fn encode_to_string(
    schema: &Schema,
    repository: &dyn SchemaRepository,
    root: &str,
    params: &Value,
    config: &EncoderConfig,
) -> Result<String> {
    let buffer = encode_to_writer(schema, repository, root, params, config, Vec::new())?;
    String::from_utf8(buffer)
        .map_err(|e| XsdError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// A namespace binding declared by an open element.
#[derive(Debug)]
struct Binding {
    prefix: String,
    namespace: String,
}

/// An element whose start tag has been written.
#[derive(Debug)]
#[must_use = "an open element must be closed with end_element"]
pub(crate) struct OpenElement {
    name: String,
    bindings: usize,
}

/// Writes XML tokens for one encode pass.
pub struct XmlEncoder<'r, W: Write> {
    writer: Writer<W>,
    repository: &'r dyn SchemaRepository,
    params: &'r Value,
    config: &'r EncoderConfig,
    /// Namespace bindings in scope, innermost last.
    bindings: Vec<Binding>,
    /// Simple types being resolved, as `{namespace}name`.
    restriction_chain: Vec<String>,
}

impl<'r, W: Write> XmlEncoder<'r, W> {
    pub fn new(
        writer: W,
        repository: &'r dyn SchemaRepository,
        params: &'r Value,
        config: &'r EncoderConfig,
    ) -> Self {
        let writer = match config.indent {
            Some(width) if width > 0 => Writer::new_with_indent(writer, b' ', width),
            _ => Writer::new(writer),
        };
        Self {
            writer,
            repository,
            params,
            config,
            bindings: Vec::new(),
            restriction_chain: Vec::new(),
        }
    }

    /// Encodes the top-level element `name` of `schema`.
    ///
    /// Fails with [`XsdError::InvalidConfig`] before writing anything if the
    /// configuration does not validate.
    pub fn encode_root(&mut self, schema: &Schema, name: &str) -> Result<()> {
        self.config.validate().map_err(XsdError::InvalidConfig)?;
        debug!(namespace = %schema.target_namespace, element = %name, "Encoding root element");
        if self.config.write_declaration {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        let namespace = self.config.namespace_control();
        schema.encode_element(name, self, &Path::root(), namespace)
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    pub fn params(&self) -> &'r Value {
        self.params
    }

    pub fn config(&self) -> &'r EncoderConfig {
        self.config
    }

    pub fn repository(&self) -> &'r dyn SchemaRepository {
        self.repository
    }

    /// Resolves `reference` as declared by `aliases` and encodes the target type.
    pub(crate) fn encode_reference(
        &mut self,
        aliases: &dyn Aliaser,
        reference: QualifiedRef<'_>,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        let uri = aliases
            .alias(reference.prefix)
            .ok_or_else(|| XsdError::UnresolvedAlias {
                prefix: reference.prefix.to_string(),
                schema: aliases.namespace().to_string(),
            })?;

        if uri == XSD_NAMESPACE {
            return primitive::encode(self, reference.local, path);
        }

        let repository = self.repository;
        let schema = repository.get_schema(uri)?;
        if schema.target_namespace != aliases.namespace() {
            debug!(
                from = %aliases.namespace(),
                to = %schema.target_namespace,
                type_name = %reference.local,
                path = %path,
                "Resolving type in another schema"
            );
        }
        schema.encode_type(reference.local, self, path, namespace)
    }

    /// Writes a start tag, qualified with `namespace` when given.
    pub(crate) fn start_element(
        &mut self,
        local: &str,
        namespace: Option<&str>,
        nil: bool,
    ) -> Result<OpenElement> {
        let config = self.config;
        let mut pushed = 0;

        let name = match namespace {
            Some(_) => format!("{}:{}", config.namespace_prefix, local),
            None => local.to_string(),
        };
        let mut start = BytesStart::new(name.as_str());

        if let Some(uri) = namespace {
            if !self.is_bound(&config.namespace_prefix, uri) {
                let attr = format!("xmlns:{}", config.namespace_prefix);
                start.push_attribute((attr.as_str(), uri));
                self.bind(&config.namespace_prefix, uri);
                pushed += 1;
            }
        }

        if nil {
            if !self.is_bound(XSI_PREFIX, XSI_NAMESPACE) {
                start.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
                self.bind(XSI_PREFIX, XSI_NAMESPACE);
                pushed += 1;
            }
            start.push_attribute(("xsi:nil", "true"));
        }

        trace!(element = %name, "Start tag");
        self.writer.write_event(Event::Start(start))?;

        Ok(OpenElement {
            name,
            bindings: pushed,
        })
    }

    /// Writes the end tag matching `open` and drops its namespace bindings.
    pub(crate) fn end_element(&mut self, open: OpenElement) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(open.name.as_str())))?;
        let keep = self.bindings.len() - open.bindings;
        self.bindings.truncate(keep);
        Ok(())
    }

    /// Writes escaped character data.
    pub(crate) fn write_text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Puts a simple type on the restriction chain, failing if it is already there.
    pub(crate) fn enter_restriction(&mut self, key: String) -> Result<()> {
        if self.restriction_chain.contains(&key) {
            let mut chain = self.restriction_chain.clone();
            chain.push(key);
            return Err(XsdError::CyclicRestriction { chain });
        }
        self.restriction_chain.push(key);
        Ok(())
    }

    pub(crate) fn leave_restriction(&mut self) {
        self.restriction_chain.pop();
    }

    /// Starts a fresh restriction chain for an element's content.
    pub(crate) fn take_restriction_chain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.restriction_chain)
    }

    pub(crate) fn restore_restriction_chain(&mut self, chain: Vec<String>) {
        self.restriction_chain = chain;
    }

    fn is_bound(&self, prefix: &str, namespace: &str) -> bool {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.prefix == prefix)
            .is_some_and(|b| b.namespace == namespace)
    }

    fn bind(&mut self, prefix: &str, namespace: &str) {
        self.bindings.push(Binding {
            prefix: prefix.to_string(),
            namespace: namespace.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemorySchemaRepository;
    use serde_json::json;

    fn encoder_output<F>(config: &EncoderConfig, f: F) -> String
    where
        F: FnOnce(&mut XmlEncoder<'_, Vec<u8>>) -> Result<()>,
    {
        let repository = MemorySchemaRepository::new();
        let params = json!({});
        let mut encoder = XmlEncoder::new(Vec::new(), &repository, &params, config);
        f(&mut encoder).unwrap();
        String::from_utf8(encoder.into_inner()).unwrap()
    }

    #[test]
    fn test_binding_declared_once_per_scope() {
        let config = EncoderConfig::default();
        let xml = encoder_output(&config, |enc| {
            let outer = enc.start_element("A", Some("urn:a"), false)?;
            let inner = enc.start_element("B", Some("urn:a"), false)?;
            enc.end_element(inner)?;
            let other = enc.start_element("C", Some("urn:c"), false)?;
            enc.end_element(other)?;
            enc.end_element(outer)?;
            let again = enc.start_element("D", Some("urn:a"), false)?;
            enc.end_element(again)
        });
        assert_eq!(
            xml,
            "<ns0:A xmlns:ns0=\"urn:a\"><ns0:B></ns0:B>\
             <ns0:C xmlns:ns0=\"urn:c\"></ns0:C></ns0:A>\
             <ns0:D xmlns:ns0=\"urn:a\"></ns0:D>"
        );
    }

    #[test]
    fn test_nil_declares_xsi() {
        let config = EncoderConfig::default();
        let xml = encoder_output(&config, |enc| {
            let open = enc.start_element("Note", None, true)?;
            enc.end_element(open)
        });
        assert_eq!(
            xml,
            "<Note xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:nil=\"true\"></Note>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let config = EncoderConfig::default();
        let xml = encoder_output(&config, |enc| {
            let open = enc.start_element("Q", None, false)?;
            enc.write_text("a < b & c")?;
            enc.end_element(open)
        });
        assert_eq!(xml, "<Q>a &lt; b &amp; c</Q>");
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let schema = Schema::new("urn:a").with_element(crate::model::Element::new("Ping"));
        let repository = MemorySchemaRepository::from_schemas([schema.clone()]);
        let config = EncoderConfig {
            namespace_prefix: String::new(),
            ..Default::default()
        };
        let params = json!({});

        let mut encoder = XmlEncoder::new(Vec::new(), &repository, &params, &config);
        let err = encoder.encode_root(&schema, "Ping").unwrap_err();
        assert!(matches!(err, XsdError::InvalidConfig(ref errors) if errors.len() == 1));
        assert!(encoder.into_inner().is_empty());
    }

    #[test]
    fn test_restriction_chain_detects_repeat() {
        let config = EncoderConfig::default();
        let repository = MemorySchemaRepository::new();
        let params = json!({});
        let mut enc = XmlEncoder::new(Vec::new(), &repository, &params, &config);
        enc.enter_restriction("{urn:a}A".to_string()).unwrap();
        enc.enter_restriction("{urn:a}B".to_string()).unwrap();
        let err = enc.enter_restriction("{urn:a}A".to_string()).unwrap_err();
        match err {
            XsdError::CyclicRestriction { chain } => {
                assert_eq!(chain, ["{urn:a}A", "{urn:a}B", "{urn:a}A"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        enc.leave_restriction();
        enc.leave_restriction();
        assert!(enc.enter_restriction("{urn:a}A".to_string()).is_ok());
    }
}
