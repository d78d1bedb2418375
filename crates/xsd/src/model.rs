//! In-memory model of an XSD document.
//!
//! These types are populated once by the loader (or deserialized from a JSON
//! fixture) and are read-only during encoding. Sharing a loaded set of schemas
//! across threads is sound as long as nothing mutates them after load; the
//! encoder takes no locks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One XSD document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    pub target_namespace: String,
    pub element_form_default: String,
    pub version: String,
    pub complex_types: Vec<ComplexType>,
    pub simple_types: Vec<SimpleType>,
    pub elements: Vec<Element>,

    /// Namespace prefixes declared on the `<xs:schema>` tag, prefix to URI.
    pub aliases: BTreeMap<String, String>,
}

impl Schema {
    /// Creates an empty schema for `target_namespace`.
    pub fn new(target_namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            ..Default::default()
        }
    }

    /// Registers a namespace prefix.
    pub fn with_alias(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.aliases.insert(prefix.into(), namespace.into());
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_complex_type(mut self, complex_type: ComplexType) -> Self {
        self.complex_types.push(complex_type);
        self
    }

    pub fn with_simple_type(mut self, simple_type: SimpleType) -> Self {
        self.simple_types.push(simple_type);
        self
    }

    /// Finds a top-level element by exact name.
    pub fn find_element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Finds a named type, complex types first.
    pub fn find_type(&self, name: &str) -> Option<TypeDefinition<'_>> {
        if let Some(complex) = self.complex_types.iter().find(|t| t.name == name) {
            return Some(TypeDefinition::Complex(complex));
        }
        self.simple_types
            .iter()
            .find(|t| t.name == name)
            .map(TypeDefinition::Simple)
    }
}

/// A named type declared in a schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeDefinition<'a> {
    Complex(&'a ComplexType),
    Simple(&'a SimpleType),
}

impl TypeDefinition<'_> {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Complex(t) => &t.name,
            TypeDefinition::Simple(t) => &t.name,
        }
    }
}

/// An element particle.
///
/// Exactly one of these drives encoding: a non-empty `type_ref`, an inline
/// `complex_type`, or neither (a leaf with no further structure).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    pub name: String,

    /// Qualified type reference such as `tns:Order`; empty when absent.
    #[serde(rename = "type")]
    pub type_ref: String,

    pub nillable: bool,

    /// Raw `minOccurs`; only `"0"` is interpreted.
    pub min_occurs: String,

    /// Raw `maxOccurs`, carried as metadata.
    pub max_occurs: String,

    pub form: String,

    /// Anonymous type declared inside the element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_type: Option<Box<ComplexType>>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = type_ref.into();
        self
    }

    /// Marks the element `minOccurs="0"`.
    pub fn optional(mut self) -> Self {
        self.min_occurs = "0".to_string();
        self
    }

    pub fn nillable(mut self) -> Self {
        self.nillable = true;
        self
    }

    pub fn with_complex_type(mut self, complex_type: ComplexType) -> Self {
        self.complex_type = Some(Box::new(complex_type));
        self
    }

    /// True when the element may be left out entirely.
    pub fn is_optional(&self) -> bool {
        self.min_occurs == "0"
    }
}

/// Structural content of a complex type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplexType {
    /// Empty for anonymous types.
    pub name: String,
    pub sequence: Vec<Element>,
    pub choice: Vec<Element>,

    /// Members of a `choice` nested inside the outer `sequence`.
    pub sequence_choice: Vec<Element>,
}

impl ComplexType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// An anonymous type with the given sequence.
    pub fn anonymous(sequence: Vec<Element>) -> Self {
        Self {
            sequence,
            ..Default::default()
        }
    }

    pub fn with_sequence(mut self, sequence: Vec<Element>) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_choice(mut self, choice: Vec<Element>) -> Self {
        self.choice = choice;
        self
    }

    pub fn with_sequence_choice(mut self, sequence_choice: Vec<Element>) -> Self {
        self.sequence_choice = sequence_choice;
        self
    }
}

/// A named restriction of a base type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleType {
    pub name: String,
    pub restriction: SimpleTypeRestriction,
}

impl SimpleType {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            restriction: SimpleTypeRestriction {
                base: base.into(),
                enumerations: Vec::new(),
            },
        }
    }

    pub fn with_enumerations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restriction.enumerations = values
            .into_iter()
            .map(|value| Enumeration {
                value: value.into(),
            })
            .collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleTypeRestriction {
    /// Qualified base type reference such as `xs:string`.
    pub base: String,

    /// Allowed values. Descriptive only; the encoder does not enforce them.
    pub enumerations: Vec<Enumeration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    pub value: String,
}
