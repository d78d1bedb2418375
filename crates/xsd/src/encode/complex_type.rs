use std::io::Write;

use serde_json::Value;
use tracing::{trace, warn};

use super::{Encode, XmlEncoder};
use crate::config::NamespaceControl;
use crate::error::Result;
use crate::model::{ComplexType, Element};
use crate::namespace::Aliaser;
use crate::path::{Path, has_value};

impl Encode for ComplexType {
    /// Encodes the members under `path`, which already ends with the
    /// containing element's name.
    ///
    /// Choice groups are not checked for exclusivity: every member with a
    /// submitted value (or a required one) is written.
    fn encode<W: Write>(
        &self,
        encoder: &mut XmlEncoder<'_, W>,
        aliases: &dyn Aliaser,
        path: &Path,
        namespace: NamespaceControl,
    ) -> Result<()> {
        trace!(path = %path, type_name = %self.name, "Encoding complex type");

        for element in &self.sequence {
            element.encode(encoder, aliases, path, namespace)?;
        }

        warn_on_multiple_choices(&self.choice, encoder.params(), path);
        for element in &self.choice {
            element.encode(encoder, aliases, path, namespace)?;
        }

        warn_on_multiple_choices(&self.sequence_choice, encoder.params(), path);
        for element in &self.sequence_choice {
            element.encode(encoder, aliases, path, namespace)?;
        }

        Ok(())
    }
}

fn warn_on_multiple_choices(members: &[Element], params: &Value, path: &Path) {
    let submitted: Vec<&str> = members
        .iter()
        .filter(|e| has_value(params, &path.child(&e.name)))
        .map(|e| e.name.as_str())
        .collect();

    if submitted.len() > 1 {
        warn!(
            path = %path,
            members = ?submitted,
            "Values submitted for more than one choice member; encoding all of them"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncoderConfig;
    use crate::error::XsdError;
    use crate::model::Schema;
    use crate::namespace::XSD_NAMESPACE;
    use crate::repository::MemorySchemaRepository;
    use serde_json::json;

    fn encode(complex: &ComplexType, params: Value) -> Result<String> {
        let schema = Schema::new("urn:a").with_alias("xs", XSD_NAMESPACE);
        let repository = MemorySchemaRepository::from_schemas([schema.clone()]);
        let config = EncoderConfig {
            use_namespace: false,
            ..Default::default()
        };
        let mut encoder = XmlEncoder::new(Vec::new(), &repository, &params, &config);
        complex.encode(
            &mut encoder,
            &schema,
            &Path::from_segments(["Pay"]),
            config.namespace_control(),
        )?;
        Ok(String::from_utf8(encoder.into_inner()).unwrap())
    }

    fn payment() -> ComplexType {
        ComplexType::new("Payment")
            .with_sequence(vec![Element::new("Amount").with_type("xs:decimal")])
            .with_choice(vec![
                Element::new("Card").with_type("xs:string").optional(),
                Element::new("Iban").with_type("xs:string").optional(),
            ])
            .with_sequence_choice(vec![Element::new("Memo").with_type("xs:string").optional()])
    }

    #[test]
    fn test_groups_in_fixed_order() {
        let xml = encode(
            &payment(),
            json!({"Pay": {"Memo": "m", "Iban": "DE00", "Amount": 10}}),
        )
        .unwrap();
        assert_eq!(xml, "<Amount>10</Amount><Iban>DE00</Iban><Memo>m</Memo>");
    }

    #[test]
    fn test_choice_members_not_exclusive() {
        let xml = encode(
            &payment(),
            json!({"Pay": {"Amount": 1, "Card": "4111", "Iban": "DE00"}}),
        )
        .unwrap();
        assert_eq!(xml, "<Amount>1</Amount><Card>4111</Card><Iban>DE00</Iban>");
    }

    #[test]
    fn test_first_failure_stops_members() {
        let complex = ComplexType::new("Broken").with_sequence(vec![
            Element::new("Ok").with_type("xs:string"),
            Element::new("Bad").with_type("nocolon"),
            Element::new("Never").with_type("xs:string"),
        ]);
        let err = encode(&complex, json!({})).unwrap_err();
        assert!(matches!(err, XsdError::MalformedTypeReference { .. }));
    }
}
