//! Command-line audit runner.
//!
//! Feeds a JSON fragment dump (per-page positioned text fragments, as
//! produced by an external PDF reader) through the audit pipeline and
//! prints a text report, optionally followed by a dispute letter.

use anyhow::{Context, Result};
use audit_engine::legal;
use audit_pipeline::{run_pipeline, FragmentDump, NullOcr, PipelineConfig};
use audit_types::{AuditResult, VarianceStatus};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "audit-cli", about = "Audit a medical bill fragment dump")]
struct Args {
    /// Path to a JSON fragment dump: {"pages": [[{text,x,y,width,height}, ...], ...]}
    fragments: PathBuf,

    /// File name recorded on the result (defaults to the dump path)
    #[arg(long)]
    file_name: Option<String>,

    /// Also print a formal dispute letter for overcharged items
    #[arg(long)]
    letter: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("audit_cli=info".parse()?)
                .add_directive("audit_pipeline=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let json = std::fs::read_to_string(&args.fragments)
        .with_context(|| format!("reading {}", args.fragments.display()))?;
    let dump = FragmentDump::from_json(&json)?;

    let file_name = args
        .file_name
        .unwrap_or_else(|| args.fragments.display().to_string());

    info!("auditing {file_name}");
    let result = run_pipeline(&dump, &NullOcr, &file_name, &PipelineConfig::default()).await?;

    print!("{}", render_report(&result));

    if args.letter {
        println!();
        println!("{}", legal::generate_dispute_letter(&result));
    }

    Ok(())
}

fn render_report(result: &AuditResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Audit Report: {}\n", result.file_name));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!("Document type: {}\n", result.fields.document_type));
    if let Some(invoice) = &result.fields.invoice_number {
        output.push_str(&format!("Invoice/Claim: {}\n", invoice));
    }
    if let Some(date) = &result.fields.date {
        output.push_str(&format!("Date: {}\n", date));
    }
    output.push_str(&format!(
        "Pages: {}  Tables: {}  Extraction: {:?} ({:.0}% confidence)\n",
        result.page_count,
        result.tables.len(),
        result.confidence.method,
        result.confidence.score * 100.0
    ));
    for reason in &result.confidence.flagged_reasons {
        output.push_str(&format!("  flagged: {}\n", reason));
    }
    output.push_str(&format!("Fingerprint: {}\n\n", result.fingerprint));

    output.push_str("Cost Findings:\n");
    output.push_str(&"-".repeat(40));
    output.push('\n');

    if result.findings.is_empty() {
        output.push_str("(no benchmarked charges found)\n");
    }
    for finding in &result.findings {
        let marker = match finding.status {
            VarianceStatus::Normal => "  OK  ",
            VarianceStatus::Overpriced => " HIGH ",
            VarianceStatus::Severe => "SEVERE",
        };
        output.push_str(&format!(
            "[{}] {} {} - charged ${:.2} vs benchmark ${:.2} ({:+}%)\n",
            marker,
            finding.code,
            finding.label,
            finding.charged,
            finding.benchmark,
            finding.variance_percent
        ));
        if let Some(citation) = &finding.citation {
            output.push_str(&format!("         cite: {}\n", citation.citation));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_types::{ConfidenceInfo, CostFinding, DocumentFields, ExtractionMethod};

    fn sample_result() -> AuditResult {
        AuditResult {
            id: "test-id".to_string(),
            file_name: "statement.pdf".to_string(),
            raw_text: String::new(),
            redacted_text: String::new(),
            fields: DocumentFields {
                document_type: "Medical Statement".to_string(),
                confidence: 0.85,
                invoice_number: Some("INV-1".to_string()),
                date: None,
            },
            findings: vec![CostFinding {
                id: "f1".to_string(),
                code: "99213".to_string(),
                label: "Office visit, established patient (level 3)".to_string(),
                charged: 200.0,
                benchmark: 75.0,
                variance_percent: 167,
                status: VarianceStatus::Severe,
                citation: Some(legal::act_102_reference()),
                note: None,
            }],
            tables: vec![],
            page_count: 1,
            page_snapshots: vec![],
            confidence: ConfidenceInfo {
                score: 0.95,
                flagged_reasons: vec![],
                method: ExtractionMethod::Native,
            },
            extracted_at: chrono::Utc::now(),
            fingerprint: "abc123".to_string(),
        }
    }

    #[test]
    fn test_report_finding_line_is_plain_ascii() {
        let report = render_report(&sample_result());
        assert!(report.contains("[SEVERE] 99213"));
        assert!(report.contains("- charged $200.00 vs benchmark $75.00 (+167%)"));
        let findings_section = report.split("Cost Findings:").nth(1).unwrap();
        assert!(findings_section.is_ascii());
    }
}
