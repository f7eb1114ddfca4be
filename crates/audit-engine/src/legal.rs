//! Patient-advocacy helpers: the statutory reference attached to
//! severe findings, financial-assistance screening, and dispute-letter
//! generation.

use audit_types::{AuditResult, FapEligibility, LegalReference, VarianceStatus};

/// Advisory note attached to severe findings.
pub const FINANCIAL_ASSISTANCE_NOTE: &str =
    "Charges this far above the regional benchmark may qualify for income-based \
     financial assistance under PA Act 102; request a Financial Assistance Policy \
     application before paying.";

/// 2024 Federal Poverty Level guidelines (annual, contiguous US),
/// indexed by household size 1-8. Source: ASPE / HHS.
const FPL_2024: [f64; 8] = [
    15_060.0, 20_440.0, 25_820.0, 31_200.0, 36_580.0, 41_960.0, 47_340.0, 52_720.0,
];

/// Added for each household member beyond eight.
const FPL_2024_EXTRA: f64 = 5_380.0;

/// Mandatory-assistance ceiling as a percentage of FPL (PA Act 102 §1423).
const FAP_THRESHOLD_PERCENT: i64 = 300;

/// The fixed reference cited on severe overcharges.
pub fn act_102_reference() -> LegalReference {
    LegalReference {
        authority: "Pennsylvania General Assembly".to_string(),
        citation: "PA Act 102 §1423 (Financial Assistance Disclosure)".to_string(),
        violation: "Charge exceeds regional fair-market benchmark by more than 50%".to_string(),
        remedy: "Request itemized review and adjustment to the regional benchmark; \
                 hospitals must disclose financial assistance before collection."
            .to_string(),
        complaint_path: Some(
            "PA Attorney General Health Care Section complaint form".to_string(),
        ),
    }
}

/// Screens a household for mandatory financial assistance under
/// PA Act 102 §1423 (families up to 300% of FPL).
pub fn check_fap_eligibility(household_size: u32, annual_income: f64) -> FapEligibility {
    let size = household_size.max(1);
    let mut base_fpl = FPL_2024[(size.min(8) - 1) as usize];
    if size > 8 {
        base_fpl += f64::from(size - 8) * FPL_2024_EXTRA;
    }

    let fpl_percentage = annual_income / base_fpl * 100.0;
    let eligible = fpl_percentage <= FAP_THRESHOLD_PERCENT as f64;

    FapEligibility {
        eligible,
        fpl_percentage: fpl_percentage.round() as i64,
        threshold: FAP_THRESHOLD_PERCENT,
        citation: "PA Act 102 §1423 (Financial Assistance Disclosure)".to_string(),
        recommendation: if eligible {
            "You qualify for mandatory financial assistance. The hospital must provide \
             an application before seeking payment."
                .to_string()
        } else {
            "You exceed the 300% FPL threshold for mandatory assistance, but may still \
             qualify for hospital-specific sliding scales."
                .to_string()
        },
    }
}

/// Generates a formal dispute letter covering every overpriced or
/// severe finding in the audit.
pub fn generate_dispute_letter(result: &AuditResult) -> String {
    let date = chrono::Utc::now().format("%B %-d, %Y");
    let overcharged: Vec<_> = result
        .findings
        .iter()
        .filter(|f| matches!(f.status, VarianceStatus::Severe | VarianceStatus::Overpriced))
        .collect();

    let mut items = String::new();
    for finding in &overcharged {
        items.push_str(&format!(
            "- CPT {} ({}): Charged ${:.2} (Benchmark: ${:.2}, Variance: {}%)\n",
            finding.code, finding.label, finding.charged, finding.benchmark,
            finding.variance_percent
        ));
    }

    let benchmark_total: f64 = overcharged.iter().map(|f| f.benchmark).sum();
    let reference = result
        .fields
        .invoice_number
        .as_deref()
        .unwrap_or("[INVOICE NUMBER]");

    format!(
        "Date: {date}\n\
         To: Billing Department / Patient Advocate\n\
         Reference: Invoice/Claim {reference}\n\
         Subject: FORMAL DISPUTE - FAIR PRICING VIOLATION (PA ACT 102)\n\
         \n\
         To whom it may concern,\n\
         \n\
         I am writing to formally dispute the charges on the above-referenced medical \
         statement for {file_name}. After auditing these charges against Pennsylvania \
         fair market benchmarks, I have identified significant pricing variances that \
         appear to violate standard consumer protection expectations and PA Act 102 \
         guidelines.\n\
         \n\
         The following line items were identified as significantly exceeding regional \
         averages:\n\
         {items}\
         \n\
         Under PA Act 102, patients are entitled to transparent pricing and access to \
         Financial Assistance Policies (FAP). Furthermore, excessive markups on \
         essential medical services may constitute unfair trade practices.\n\
         \n\
         I request the following actions:\n\
         1. A formal review of the \"Charged Amount\" for the CPT codes listed above.\n\
         2. Adjustment of these charges to align with the regional fair market \
         benchmarks (${benchmark_total:.2} total for these items).\n\
         3. A written explanation for why these charges exceeded the benchmark by more \
         than 30%.\n\
         4. Confirmation that my account will not be sent to collections while this \
         dispute is active.\n\
         \n\
         Please provide a response within 30 days.\n\
         \n\
         Sincerely,\n\
         [YOUR NAME]\n\
         [YOUR PHONE NUMBER]\n\
         [YOUR ADDRESS]",
        date = date,
        reference = reference,
        file_name = result.file_name,
        items = items,
        benchmark_total = benchmark_total,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_types::{ConfidenceInfo, CostFinding, DocumentFields, ExtractionMethod};

    fn finding(code: &str, charged: f64, benchmark: f64, status: VarianceStatus) -> CostFinding {
        CostFinding {
            id: "test".to_string(),
            code: code.to_string(),
            label: "Test procedure".to_string(),
            charged,
            benchmark,
            variance_percent: ((charged - benchmark) / benchmark * 100.0).round() as i64,
            status,
            citation: None,
            note: None,
        }
    }

    fn result_with(findings: Vec<CostFinding>) -> AuditResult {
        AuditResult {
            id: "r1".to_string(),
            file_name: "statement.pdf".to_string(),
            raw_text: String::new(),
            redacted_text: String::new(),
            fields: DocumentFields {
                document_type: "Medical Statement".to_string(),
                confidence: 0.85,
                invoice_number: Some("INV-100".to_string()),
                date: None,
            },
            findings,
            tables: vec![],
            page_count: 1,
            page_snapshots: vec![],
            confidence: ConfidenceInfo {
                score: 0.95,
                flagged_reasons: vec![],
                method: ExtractionMethod::Native,
            },
            extracted_at: chrono::Utc::now(),
            fingerprint: String::new(),
        }
    }

    #[test]
    fn test_fap_eligible_household() {
        let result = check_fap_eligibility(4, 60_000.0);
        assert!(result.eligible);
        assert_eq!(result.fpl_percentage, 192);
        assert_eq!(result.threshold, 300);
    }

    #[test]
    fn test_fap_ineligible_household() {
        let result = check_fap_eligibility(1, 90_000.0);
        assert!(!result.eligible);
        assert!(result.fpl_percentage > 300);
    }

    #[test]
    fn test_fap_household_above_eight_extends_base() {
        // Size 10: 52,720 + 2 * 5,380 = 63,480. 300% = 190,440.
        let result = check_fap_eligibility(10, 190_000.0);
        assert!(result.eligible);
    }

    #[test]
    fn test_fap_zero_household_clamps_to_one() {
        let result = check_fap_eligibility(0, 15_060.0);
        assert_eq!(result.fpl_percentage, 100);
    }

    #[test]
    fn test_dispute_letter_lists_overcharged_items_only() {
        let letter = generate_dispute_letter(&result_with(vec![
            finding("99213", 200.0, 75.0, VarianceStatus::Severe),
            finding("93000", 27.0, 25.0, VarianceStatus::Normal),
        ]));
        assert!(letter.contains("CPT 99213"));
        assert!(!letter.contains("CPT 93000"));
        assert!(letter.contains("Invoice/Claim INV-100"));
        assert!(letter.contains("$75.00 total"));
    }

    #[test]
    fn test_dispute_letter_placeholder_without_invoice() {
        let mut result = result_with(vec![]);
        result.fields.invoice_number = None;
        let letter = generate_dispute_letter(&result);
        assert!(letter.contains("[INVOICE NUMBER]"));
    }
}
