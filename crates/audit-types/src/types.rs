use chrono::{DateTime, Utc};

/// One positioned text token produced by PDF text extraction.
///
/// Coordinates follow the PDF convention: (0,0) at the bottom-left of
/// the page, so higher `y` means closer to the top.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Best-effort structured metadata for a document. Always present on a
/// result; fields the extractor could not find stay `None`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocumentFields {
    pub document_type: String,
    pub confidence: f64,
    pub invoice_number: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub confidence: f64,
}

/// Static benchmark table entry keyed by billing code.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkEntry {
    pub code: &'static str,
    pub average_cost: f64,
    pub label: &'static str,
}

/// A statutory reference attached to severe pricing findings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LegalReference {
    pub authority: String,
    pub citation: String, // e.g. "PA Act 102 §1423"
    pub violation: String,
    pub remedy: String,
    pub complaint_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VarianceStatus {
    Normal,
    Overpriced,
    Severe,
}

/// One audited line item: a recognized billing code with a nearby
/// charged amount compared against its benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CostFinding {
    pub id: String,
    pub code: String,
    pub label: String,
    pub charged: f64,
    pub benchmark: f64,
    pub variance_percent: i64,
    pub status: VarianceStatus,
    pub citation: Option<LegalReference>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Native,
    Ocr,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConfidenceInfo {
    pub score: f64, // 0.0..=1.0
    pub flagged_reasons: Vec<String>,
    pub method: ExtractionMethod,
}

/// Consolidated output of one pipeline run over a single document.
/// Immutable once produced; a re-run supersedes it wholesale.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuditResult {
    pub id: String,
    pub file_name: String,
    pub raw_text: String,
    pub redacted_text: String,
    pub fields: DocumentFields,
    pub findings: Vec<CostFinding>,
    pub tables: Vec<TableBlock>,
    pub page_count: u32,
    /// Rendered images of the first few pages, for human verification.
    /// Bounded by the pipeline's snapshot cap regardless of page count.
    pub page_snapshots: Vec<Vec<u8>>,
    pub confidence: ConfidenceInfo,
    pub extracted_at: DateTime<Utc>,
    /// Content hash of the leading text, used for duplicate detection.
    pub fingerprint: String,
}

/// Financial-assistance screening outcome under PA Act 102 §1423.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FapEligibility {
    pub eligible: bool,
    pub fpl_percentage: i64,
    pub threshold: i64,
    pub citation: String,
    pub recommendation: String,
}
