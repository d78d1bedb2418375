//! # soapxml XSD encoding
//!
//! This crate turns a tree of submitted values into XML that follows an XML
//! Schema. It is the serialization core of a SOAP client: given a set of
//! loaded schemas, a root element name and a params tree, it writes
//! namespace-qualified XML, following type references across schemas by
//! their namespace aliases.
//!
//! ## Architecture
//!
//! - **Model** ([`model`]): `Schema`, `Element`, `ComplexType` and
//!   `SimpleType`, loaded once and read-only afterwards.
//! - **Loader** ([`loader`]): builds the model from XSD text with `roxmltree`.
//! - **Repository** ([`repository`]): finds a schema by target namespace.
//! - **Encoder** ([`encode`]): a depth-first walk that writes quick-xml events.
//!   Optional elements without a submitted value are left out; everything
//!   else is written with matching start and end tags.
//!
//! ## Params mapping
//!
//! | Params (JSON) | XML |
//! |---------------|-----|
//! | `{"Order": {"Id": "42"}}` | `<Order><Id>42</Id></Order>` |
//! | `{"Order": {"Id": 42}}` | `<Order><Id>42</Id></Order>` |
//! | `{"Order": {"Note": null}}` (nillable) | `<Note xsi:nil="true"></Note>` |
//! | `{"Order": {}}` (optional `Note`) | no `Note` element |
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use soapxml_xsd::{EncoderConfig, MemorySchemaRepository, loader};
//!
//! let orders = loader::parse_schema(r#"
//!     <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                xmlns:tns="urn:orders" targetNamespace="urn:orders">
//!       <xs:element name="Order" type="tns:Order"/>
//!       <xs:complexType name="Order">
//!         <xs:sequence>
//!           <xs:element name="Id" type="xs:string"/>
//!         </xs:sequence>
//!       </xs:complexType>
//!     </xs:schema>"#)?;
//! let repository = MemorySchemaRepository::from_schemas([orders]);
//!
//! let params = json!({"Order": {"Id": "42"}});
//! let config = EncoderConfig::default();
//! let out = repository.encode_element("urn:orders", "Order", &params, &config, Vec::new())?;
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     r#"<ns0:Order xmlns:ns0="urn:orders"><Id>42</Id></ns0:Order>"#
//! );
//! # Ok::<(), soapxml_xsd::XsdError>(())
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod loader;
pub mod model;
pub mod namespace;
pub mod path;
pub mod repository;

pub use config::{EncoderConfig, NamespaceControl};
pub use encode::{Encode, XmlEncoder, encode_to_string, encode_to_writer};
pub use error::{Result, XsdError};
pub use model::{
    ComplexType, Element, Enumeration, Schema, SimpleType, SimpleTypeRestriction, TypeDefinition,
};
pub use namespace::Aliaser;
pub use path::Path;
pub use repository::{MemorySchemaRepository, SchemaRepository};
