//! PHI redaction for reconstructed document text.
//!
//! A fixed, ordered set of pattern classes is applied over the working
//! string, each match replaced with a literal placeholder. Patterns are
//! independent; overlapping matches across classes are acceptable
//! collateral redaction. This is a heuristic privacy net, not a
//! guarantee of completeness.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Social Security numbers: 123-45-6789.
    static ref SSN: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap();

    /// Bare 9-12 digit identifiers (member ids, account numbers).
    /// Billing codes are 5 digits or 4 digits + letter, so digit runs
    /// of this length are never code-shaped.
    static ref BARE_ID: Regex = Regex::new(r"\b\d{9,12}\b").unwrap();

    /// Short-form dates: 1/2/24, 01/02/2024.
    static ref SHORT_DATE: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap();

    /// Label-prefixed fields: the label plus the token run that follows
    /// it on the same line.
    static ref LABELED: Regex = Regex::new(
        r"(?i)\b(ACCOUNT|PATIENT|MEMBER[ \t]+ID)[ \t]*:[ \t]*[A-Za-z0-9#-]+(?:[ \t][A-Za-z0-9#-]+)*",
    )
    .unwrap();

    /// US phone numbers: (555) 123-4567, 555-123-4567, 555.123.4567.
    static ref PHONE: Regex =
        Regex::new(r"\(?\b\d{3}\)?[-. ]\d{3}[-. ]\d{4}\b").unwrap();

    /// Email addresses.
    static ref EMAIL: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();

    /// ZIP+4 codes: 19103-1234.
    static ref ZIP4: Regex = Regex::new(r"\b\d{5}-\d{4}\b").unwrap();
}

/// Scrubs identifiable patterns from `text`. Pure and idempotent:
/// placeholders contain nothing any pattern class can re-match.
pub fn redact(text: &str) -> String {
    let mut out = SSN.replace_all(text, "[SSN REDACTED]").into_owned();
    out = BARE_ID.replace_all(&out, "[ID REDACTED]").into_owned();
    out = SHORT_DATE.replace_all(&out, "[DATE REDACTED]").into_owned();
    out = LABELED.replace_all(&out, "$1: [REDACTED]").into_owned();
    out = PHONE.replace_all(&out, "[PHONE REDACTED]").into_owned();
    out = EMAIL.replace_all(&out, "[EMAIL REDACTED]").into_owned();
    out = ZIP4.replace_all(&out, "[ZIP REDACTED]").into_owned();
    out
}
