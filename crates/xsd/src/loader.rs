//! Builds [`Schema`] models from XSD documents.
//!
//! Only the constructs the encoder uses are read: top-level elements, named
//! complex and simple types, anonymous complex types on elements, `sequence`
//! and `choice` groups, and restriction bases with their enumerations.
//! Everything else in the document is ignored.
//!
//! ```rust
//! use soapxml_xsd::loader::parse_schema;
//!
//! let schema = parse_schema(r#"
//!     <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                xmlns:tns="urn:orders" targetNamespace="urn:orders">
//!       <xs:element name="Order" type="tns:Order"/>
//!       <xs:complexType name="Order">
//!         <xs:sequence>
//!           <xs:element name="Id" type="xs:string"/>
//!         </xs:sequence>
//!       </xs:complexType>
//!     </xs:schema>"#)?;
//! assert_eq!(schema.target_namespace, "urn:orders");
//! assert_eq!(schema.aliases["tns"], "urn:orders");
//! # Ok::<(), soapxml_xsd::XsdError>(())
//! ```

use std::path::Path as FsPath;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::{Result, XsdError};
use crate::model::{ComplexType, Element, Enumeration, Schema, SimpleType, SimpleTypeRestriction};
use crate::namespace::XSD_NAMESPACE;

/// Parses an XSD document.
pub fn parse_schema(xsd: &str) -> Result<Schema> {
    let document = Document::parse(xsd)?;
    let root = document.root_element();

    if !is_xsd(&root, "schema") {
        return Err(XsdError::InvalidSchema(format!(
            "expected xs:schema root element, found '{}'",
            root.tag_name().name()
        )));
    }

    let mut schema = Schema {
        target_namespace: root.attribute("targetNamespace").unwrap_or_default().to_string(),
        element_form_default: root
            .attribute("elementFormDefault")
            .unwrap_or_default()
            .to_string(),
        version: root.attribute("version").unwrap_or_default().to_string(),
        ..Default::default()
    };

    for ns in root.namespaces() {
        let prefix = ns.name().unwrap_or_default();
        schema.aliases.insert(prefix.to_string(), ns.uri().to_string());
    }

    for child in xsd_children(root) {
        match child.tag_name().name() {
            "element" => schema.elements.extend(parse_element(child)?),
            "complexType" => schema.complex_types.push(parse_complex_type(child)?),
            "simpleType" => schema.simple_types.push(parse_simple_type(child)?),
            _ => {}
        }
    }

    debug!(
        namespace = %schema.target_namespace,
        elements = schema.elements.len(),
        complex_types = schema.complex_types.len(),
        simple_types = schema.simple_types.len(),
        "Parsed schema"
    );

    Ok(schema)
}

/// Reads and parses an XSD file.
pub fn load_schema_file(path: impl AsRef<FsPath>) -> Result<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    debug!(file = %path.display(), "Loading schema file");
    parse_schema(&content)
}

fn is_xsd(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XSD_NAMESPACE)
        && node.tag_name().name() == name
}

fn xsd_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|n| n.is_element() && n.tag_name().namespace() == Some(XSD_NAMESPACE))
}

/// Parses an element declaration. `ref` particles are not followed and yield
/// `None`.
fn parse_element(node: Node) -> Result<Option<Element>> {
    let Some(name) = node.attribute("name") else {
        if let Some(reference) = node.attribute("ref") {
            debug!(reference = %reference, "Skipping element reference");
            return Ok(None);
        }
        return Err(XsdError::InvalidSchema(
            "element declaration without a name or ref".to_string(),
        ));
    };

    let complex_type = xsd_children(node)
        .find(|n| n.tag_name().name() == "complexType")
        .map(parse_complex_type)
        .transpose()?
        .map(Box::new);

    Ok(Some(Element {
        name: name.to_string(),
        type_ref: node.attribute("type").unwrap_or_default().to_string(),
        nillable: matches!(node.attribute("nillable"), Some("true" | "1")),
        min_occurs: node.attribute("minOccurs").unwrap_or_default().to_string(),
        max_occurs: node.attribute("maxOccurs").unwrap_or_default().to_string(),
        form: node.attribute("form").unwrap_or_default().to_string(),
        complex_type,
    }))
}

fn parse_complex_type(node: Node) -> Result<ComplexType> {
    let mut complex = ComplexType::new(node.attribute("name").unwrap_or_default());

    for group in xsd_children(node) {
        match group.tag_name().name() {
            "sequence" => {
                for member in xsd_children(group) {
                    match member.tag_name().name() {
                        "element" => complex.sequence.extend(parse_element(member)?),
                        "choice" => complex.sequence_choice.extend(parse_group(member)?),
                        _ => {}
                    }
                }
            }
            "choice" => complex.choice.extend(parse_group(group)?),
            _ => {}
        }
    }

    Ok(complex)
}

fn parse_group(node: Node) -> Result<Vec<Element>> {
    xsd_children(node)
        .filter(|n| n.tag_name().name() == "element")
        .filter_map(|n| parse_element(n).transpose())
        .collect()
}

fn parse_simple_type(node: Node) -> Result<SimpleType> {
    let name = node.attribute("name").unwrap_or_default().to_string();
    let restriction = match xsd_children(node).find(|n| n.tag_name().name() == "restriction") {
        Some(restriction) => SimpleTypeRestriction {
            base: restriction.attribute("base").unwrap_or_default().to_string(),
            enumerations: xsd_children(restriction)
                .filter(|n| n.tag_name().name() == "enumeration")
                .map(|n| Enumeration {
                    value: n.attribute("value").unwrap_or_default().to_string(),
                })
                .collect(),
        },
        None => SimpleTypeRestriction::default(),
    };

    Ok(SimpleType { name, restriction })
}
