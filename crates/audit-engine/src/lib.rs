//! Text-analysis core for medical billing documents.
//!
//! Operates on reconstructed document text: PHI redaction, table
//! detection, metadata extraction, and the line-item cost audit.
//! PDF parsing and OCR live behind collaborator traits in
//! `audit-pipeline`; everything here is pure text in, structure out.

pub mod cost;
pub mod fields;
pub mod layout;
pub mod legal;
pub mod redact;
pub mod tables;

use audit_types::{CostFinding, DocumentFields, TableBlock};
use cost::CostWindow;

/// Combined output of the four independent analyzers over one text.
#[derive(Debug, Clone)]
pub struct TextAnalysis {
    pub fields: DocumentFields,
    pub redacted_text: String,
    pub tables: Vec<TableBlock>,
    pub findings: Vec<CostFinding>,
}

/// AuditEngine entry point
pub struct AuditEngine {
    cost_window: CostWindow,
}

impl AuditEngine {
    pub fn new() -> Self {
        Self {
            cost_window: CostWindow::default(),
        }
    }

    pub fn with_cost_window(cost_window: CostWindow) -> Self {
        Self { cost_window }
    }

    /// Runs field extraction, redaction, table detection, and the cost
    /// audit against the same full text. The analyzers are independent;
    /// none consumes another's output.
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        TextAnalysis {
            fields: fields::extract_fields(text),
            redacted_text: redact::redact(text),
            tables: tables::detect_tables(text),
            findings: cost::audit_costs(text, self.cost_window),
        }
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new()
    }
}
