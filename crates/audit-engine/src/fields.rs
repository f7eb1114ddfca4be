//! Document-level metadata extraction.
//!
//! Regex-only extraction is brittle and locale-specific, so each field
//! is an independent matcher behind the [`FieldMatcher`] trait; new
//! matchers can be appended to the chain without touching existing
//! ones.

use audit_types::DocumentFields;
use lazy_static::lazy_static;
use regex::Regex;

/// Heuristic-only certainty; fixed, not computed.
const EXTRACTION_CONFIDENCE: f64 = 0.85;

/// Confidence used when the assembled structure fails validation and
/// extraction degrades to the detected type alone.
const DEGRADED_CONFIDENCE: f64 = 0.5;

/// One independent pattern matcher in the extraction chain.
pub trait FieldMatcher: Send + Sync {
    /// Field name this matcher populates.
    fn field(&self) -> &'static str;

    /// First-match search over the full text.
    fn try_match(&self, text: &str) -> Option<String>;
}

lazy_static! {
    // Separators stay on one line so a bare keyword at a line's end
    // cannot capture the first token of the next line.
    static ref IDENTIFIER: Regex = Regex::new(
        r"(?i)\b(?:invoice|claim|account|statement)[ \t]*(?:#|no\.?|num)?[ \t]*:?[ \t]*([A-Za-z0-9][A-Za-z0-9-]*)",
    )
    .unwrap();
    static ref DATE: Regex = Regex::new(
        r"(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4})|(?:[A-Za-z]{3,9}\s\d{1,2},?\s\d{4})",
    )
    .unwrap();
}

/// Invoice/claim/account/statement identifier: label keyword, optional
/// `#`/`No.`/`Num`, then an alphanumeric token.
pub struct InvoiceNumberMatcher;

impl FieldMatcher for InvoiceNumberMatcher {
    fn field(&self) -> &'static str {
        "invoice_number"
    }

    fn try_match(&self, text: &str) -> Option<String> {
        IDENTIFIER
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Slash/dash-delimited numeric date or long-form month-day-year.
pub struct DateMatcher;

impl FieldMatcher for DateMatcher {
    fn field(&self) -> &'static str {
        "date"
    }

    fn try_match(&self, text: &str) -> Option<String> {
        DATE.find(text).map(|m| m.as_str().to_string())
    }
}

/// Fixed priority chain over the lower-cased full text.
pub fn classify_document_type(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("explanation of benefits") {
        "Explanation of Benefits"
    } else if lower.contains("statement") {
        "Medical Statement"
    } else if lower.contains("invoice") {
        "Medical Invoice"
    } else {
        "Medical Document"
    }
}

/// Extracts structured metadata from the full document text. Never
/// fails: if the assembled structure does not validate, falls back to
/// the detected type with low confidence and no entities.
pub fn extract_fields(text: &str) -> DocumentFields {
    let document_type = classify_document_type(text);

    let matchers: [&dyn FieldMatcher; 2] = [&InvoiceNumberMatcher, &DateMatcher];
    let mut invoice_number = None;
    let mut date = None;
    for matcher in matchers {
        let value = matcher.try_match(text);
        match matcher.field() {
            "invoice_number" => invoice_number = value,
            "date" => date = value,
            _ => {}
        }
    }

    let fields = DocumentFields {
        document_type: document_type.to_string(),
        confidence: EXTRACTION_CONFIDENCE,
        invoice_number,
        date,
    };

    if validate(&fields) {
        fields
    } else {
        DocumentFields {
            document_type: document_type.to_string(),
            confidence: DEGRADED_CONFIDENCE,
            invoice_number: None,
            date: None,
        }
    }
}

/// Schema-level sanity check on the assembled structure.
fn validate(fields: &DocumentFields) -> bool {
    !fields.document_type.is_empty()
        && (0.0..=1.0).contains(&fields.confidence)
        && fields
            .invoice_number
            .as_deref()
            .map_or(true, |v| !v.is_empty())
        && fields.date.as_deref().map_or(true, |v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_invoice_number() {
        let fields = extract_fields("Invoice #A-4471 for services rendered");
        assert_eq!(fields.invoice_number.as_deref(), Some("A-4471"));
    }

    #[test]
    fn test_extracts_claim_number() {
        let fields = extract_fields("Claim No. 88213X processed");
        assert_eq!(fields.invoice_number.as_deref(), Some("88213X"));
    }

    #[test]
    fn test_extracts_numeric_date() {
        let fields = extract_fields("Service date 03/14/2024 at clinic");
        assert_eq!(fields.date.as_deref(), Some("03/14/2024"));
    }

    #[test]
    fn test_extracts_long_form_date() {
        let fields = extract_fields("Billed on March 14, 2024");
        assert_eq!(fields.date.as_deref(), Some("March 14, 2024"));
    }

    #[test]
    fn test_missing_fields_stay_unset() {
        let fields = extract_fields("no identifiers here");
        assert_eq!(fields.invoice_number, None);
        assert_eq!(fields.date, None);
    }

    #[test]
    fn test_type_priority_eob_over_statement() {
        let fields = extract_fields("Explanation of Benefits statement for invoice 12");
        assert_eq!(fields.document_type, "Explanation of Benefits");
    }

    #[test]
    fn test_type_statement_over_invoice() {
        let fields = extract_fields("Billing statement with invoice reference");
        assert_eq!(fields.document_type, "Medical Statement");
    }

    #[test]
    fn test_type_generic_fallback() {
        let fields = extract_fields("visit summary");
        assert_eq!(fields.document_type, "Medical Document");
        assert_eq!(fields.confidence, 0.85);
    }
}
