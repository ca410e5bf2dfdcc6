use std::{cmp::Ordering, collections::BTreeMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::validation::{
    check_decimal, check_max_len, check_percentage, ValidationErrors,
};

const FIELD: &str = "payment_terms";

/// One milestone of a payment schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub milestone: String,
    pub percentage: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Caller-facing shape of a job card's payment terms: ordinal -> term.
pub type PaymentTermsMap = BTreeMap<String, PaymentTerm>;

/// Every shape a payment-terms payload may arrive in.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PaymentTermsInput {
    KeyedMapping(PaymentTermsMap),
    OrderedList(Vec<PaymentTerm>),
    RawText(String),
}

impl PaymentTermsInput {
    /// Normalized ordered list. Mapping entries are ordered by ordinal and
    /// lose their `id`, since the ordinal is their identity.
    pub fn terms(&self) -> Result<Vec<PaymentTerm>, serde_json::Error> {
        match self {
            Self::KeyedMapping(mapping) => {
                let mut entries: Vec<(&String, &PaymentTerm)> = mapping.iter().collect();
                entries.sort_by(|(a, _), (b, _)| ordinal_cmp(a, b));
                Ok(entries
                    .into_iter()
                    .map(|(_, term)| PaymentTerm {
                        id: None,
                        ..term.clone()
                    })
                    .collect())
            }
            Self::OrderedList(terms) => Ok(terms.clone()),
            Self::RawText(text) => serde_json::from_str(text),
        }
    }

    /// Stored text form. Raw text is kept verbatim.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::RawText(text) => Ok(text.clone()),
            _ => serde_json::to_string(&self.terms()?),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::KeyedMapping(mapping) => mapping.is_empty(),
            Self::OrderedList(terms) => terms.is_empty(),
            Self::RawText(text) => text.trim().is_empty(),
        }
    }
}

/// Numeric ordinals first in numeric order, anything else after them.
fn ordinal_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Stored list -> keyed mapping `"1".."n"`. Missing or malformed text gives
/// an empty mapping.
pub fn decode_keyed(stored: Option<&str>) -> PaymentTermsMap {
    decode_list(stored)
        .into_iter()
        .enumerate()
        .map(|(i, term)| {
            (
                (i + 1).to_string(),
                PaymentTerm {
                    id: None,
                    ..term
                },
            )
        })
        .collect()
}

/// Stored list as-is. Missing or malformed text gives an empty list.
pub fn decode_list(stored: Option<&str>) -> Vec<PaymentTerm> {
    match stored {
        Some(text) if !text.trim().is_empty() => {
            serde_json::from_str(text).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

/// Per-term checks plus the 100% total rule. An empty schedule is accepted.
pub fn validate_terms(terms: &[PaymentTerm]) -> Result<(), ValidationErrors> {
    if terms.is_empty() {
        return Ok(());
    }

    let mut errors = ValidationErrors::new();
    for term in terms {
        if term.milestone.trim().is_empty() {
            errors.add(FIELD, "Milestone may not be blank.");
        }
        check_max_len(&mut errors, FIELD, &term.milestone, 100);
        check_max_len(&mut errors, FIELD, &term.description, 255);
        check_percentage(&mut errors, FIELD, term.percentage);
        check_decimal(&mut errors, FIELD, term.percentage, 5, 2);
    }

    let total: Decimal = terms.iter().map(|term| term.percentage).sum();
    let lower = Decimal::new(9999, 2);
    let upper = Decimal::new(10001, 2);
    if total < lower || total > upper {
        errors.add(FIELD, "Total percentage must equal 100%");
    }

    errors.into_result()
}

/// Write boundary: validates the payload and produces the text to persist.
/// `None` clears the stored value.
pub fn prepare_for_write(
    input: Option<&PaymentTermsInput>,
) -> Result<Option<String>, ValidationErrors> {
    let Some(input) = input else {
        return Ok(None);
    };

    let terms = input
        .terms()
        .map_err(|_| ValidationErrors::single(FIELD, "Invalid payment terms payload."))?;
    validate_terms(&terms)?;

    input
        .encode()
        .map(Some)
        .map_err(|_| ValidationErrors::single(FIELD, "Invalid payment terms payload."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn term(milestone: &str, percentage: Decimal) -> PaymentTerm {
        PaymentTerm {
            id: None,
            milestone: milestone.to_string(),
            percentage,
            description: String::new(),
        }
    }

    #[test]
    fn keyed_mapping_roundtrips_with_default_descriptions() {
        let input: PaymentTermsInput = serde_json::from_str(
            r#"{"1": {"milestone": "Design", "percentage": 40},
                "2": {"milestone": "Build", "percentage": 60}}"#,
        )
        .unwrap();
        assert!(matches!(input, PaymentTermsInput::KeyedMapping(_)));

        let stored = prepare_for_write(Some(&input)).unwrap();
        let decoded = decode_keyed(stored.as_deref());

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["1"], term("Design", dec!(40)));
        assert_eq!(decoded["2"], term("Build", dec!(60)));
        assert_eq!(decoded["1"].description, "");
    }

    #[test]
    fn ordinals_are_ordered_numerically() {
        let mut mapping = PaymentTermsMap::new();
        for i in 1..=10 {
            mapping.insert(i.to_string(), term(&format!("M{}", i), dec!(10)));
        }
        let terms = PaymentTermsInput::KeyedMapping(mapping).terms().unwrap();
        let milestones: Vec<&str> = terms.iter().map(|t| t.milestone.as_str()).collect();
        assert_eq!(
            milestones,
            vec!["M1", "M2", "M3", "M4", "M5", "M6", "M7", "M8", "M9", "M10"]
        );

        let decoded = decode_keyed(Some(&serde_json::to_string(&terms).unwrap()));
        assert_eq!(decoded["10"].milestone, "M10");
    }

    #[test]
    fn total_must_be_one_hundred_within_tolerance() {
        assert!(validate_terms(&[term("A", dec!(33.33)), term("B", dec!(66.67))]).is_ok());
        assert!(validate_terms(&[term("A", dec!(50)), term("B", dec!(49.99))]).is_ok());
        assert!(validate_terms(&[term("A", dec!(50)), term("B", dec!(50.01))]).is_ok());

        let errors = validate_terms(&[term("A", dec!(30)), term("B", dec!(40))]).unwrap_err();
        assert_eq!(
            errors.get("payment_terms").unwrap(),
            &vec!["Total percentage must equal 100%".to_string()]
        );
        assert!(validate_terms(&[term("A", dec!(50)), term("B", dec!(50.02))]).is_err());
    }

    #[test]
    fn empty_schedule_skips_total_rule() {
        assert!(validate_terms(&[]).is_ok());
        let input = PaymentTermsInput::OrderedList(Vec::new());
        assert_eq!(prepare_for_write(Some(&input)).unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn none_clears_stored_value() {
        assert_eq!(prepare_for_write(None).unwrap(), None);
    }

    #[test]
    fn raw_text_is_stored_verbatim_after_validation() {
        let raw = r#"[{"milestone":"Advance","percentage":100}]"#;
        let input: PaymentTermsInput = serde_json::from_str(&serde_json::to_string(raw).unwrap()).unwrap();
        assert!(matches!(input, PaymentTermsInput::RawText(_)));
        assert_eq!(prepare_for_write(Some(&input)).unwrap(), Some(raw.to_string()));

        let garbage = PaymentTermsInput::RawText("not json".to_string());
        assert!(prepare_for_write(Some(&garbage)).unwrap_err().has_error("payment_terms"));
    }

    #[test]
    fn list_input_keeps_ids() {
        let input: PaymentTermsInput = serde_json::from_str(
            r#"[{"id": 7, "milestone": "Advance", "percentage": "25.50"},
                {"milestone": "Handover", "percentage": 74.5, "description": "on site"}]"#,
        )
        .unwrap();
        let stored = prepare_for_write(Some(&input)).unwrap();
        let decoded = decode_list(stored.as_deref());
        assert_eq!(decoded[0].id, Some(7));
        assert_eq!(decoded[0].percentage, dec!(25.5));
        assert_eq!(decoded[1].description, "on site");
    }

    #[test]
    fn malformed_stored_text_decodes_to_empty() {
        assert!(decode_keyed(Some("{not json")).is_empty());
        assert!(decode_keyed(Some(r#"[{"percentage": 10}]"#)).is_empty());
        assert!(decode_keyed(None).is_empty());
        assert!(decode_list(Some("")).is_empty());
        assert!(decode_list(Some("42")).is_empty());
    }

    #[test]
    fn term_percentages_keep_two_decimal_places() {
        let errors =
            validate_terms(&[term("A", dec!(33.333)), term("B", dec!(66.667))]).unwrap_err();
        let messages = errors.get("payment_terms").unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages
            .iter()
            .all(|m| m == "Ensure that there are no more than 2 decimal places."));
        assert!(validate_terms(&[term("A", dec!(33.330)), term("B", dec!(66.67))]).is_ok());
    }

    #[test]
    fn out_of_range_term_is_rejected() {
        let errors = validate_terms(&[term("A", dec!(120)), term("B", dec!(-20))]).unwrap_err();
        assert!(errors.has_error("payment_terms"));
    }
}
