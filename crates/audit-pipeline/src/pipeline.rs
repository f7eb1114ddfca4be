//! Pipeline orchestrator.
//!
//! Sequences page ingestion, line reconstruction, the OCR fallback
//! decision, text analysis, and result assembly. One logical pipeline
//! instance processes one document at a time; abandoning a run is done
//! by dropping the future. All accumulation lives in locals, so no
//! partial result can ever be observed.

use crate::error::PipelineError;
use crate::fingerprint::fingerprint;
use crate::source::{OcrEngine, PdfSource};
use audit_engine::cost::CostWindow;
use audit_engine::{layout, AuditEngine};
use audit_types::{AuditResult, ConfidenceInfo, ExtractionMethod};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Separator inserted between page texts in the assembled full text.
const PAGE_BREAK: &str = "\n\n--- Page Break ---\n\n";

/// Tunable constants of the orchestrator. The defaults are fixed
/// heuristics carried from the production system; none is calibrated
/// at runtime.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Documents with more pages than this are rejected up front.
    pub page_limit: u32,
    /// At most this many leading pages get a rendered snapshot.
    pub snapshot_cap: u32,
    /// Render scale for snapshots and OCR input.
    pub render_scale: f64,
    /// Native non-whitespace character count below which the document
    /// is treated as scanned and OCR fallback kicks in.
    pub ocr_char_floor: usize,
    /// Document-level OCR confidence below this gets a flagged reason.
    pub ocr_confidence_floor: f64,
    /// Fixed confidence reported for native text extraction.
    pub native_confidence: f64,
    /// Cooperative yield to the runtime every N pages. Zero disables
    /// yielding.
    pub yield_every: u32,
    /// Search radius for the cost auditor's amount window.
    pub cost_window: CostWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_limit: 50,
            snapshot_cap: 10,
            render_scale: 1.5,
            ocr_char_floor: 50,
            ocr_confidence_floor: 0.7,
            native_confidence: 0.95,
            yield_every: 5,
            cost_window: CostWindow::default(),
        }
    }
}

/// Stages of one pipeline run. `Error` is terminal and reachable from
/// any stage; everything else advances linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Reading,
    OcrFallback,
    Analyzing,
    Success,
    Error,
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    debug!(from = ?stage, to = ?next, "pipeline stage");
    *stage = next;
}

/// Runs the full audit pipeline over one document.
///
/// Any unrecoverable failure (page-limit violation, source read
/// failure, OCR failure) aborts the run with a single descriptive
/// error; partial results are discarded, not returned. No retries are
/// performed here; retry policy belongs to the caller.
pub async fn run_pipeline(
    source: &dyn PdfSource,
    ocr: &dyn OcrEngine,
    file_name: &str,
    config: &PipelineConfig,
) -> Result<AuditResult, PipelineError> {
    let mut stage = PipelineStage::Idle;

    match run_stages(source, ocr, file_name, config, &mut stage).await {
        Ok(result) => {
            advance(&mut stage, PipelineStage::Success);
            info!(
                pages = result.page_count,
                findings = result.findings.len(),
                "audit complete for {file_name}"
            );
            Ok(result)
        }
        Err(err) => {
            advance(&mut stage, PipelineStage::Error);
            warn!("audit failed for {file_name}: {err}");
            Err(err)
        }
    }
}

async fn run_stages(
    source: &dyn PdfSource,
    ocr: &dyn OcrEngine,
    file_name: &str,
    config: &PipelineConfig,
    stage: &mut PipelineStage,
) -> Result<AuditResult, PipelineError> {
    // Page-count guard: reject oversized documents before any
    // per-page work begins.
    let page_count = source.page_count().await?;
    if page_count > config.page_limit {
        return Err(PipelineError::PageLimitExceeded {
            pages: page_count,
            limit: config.page_limit,
        });
    }

    // 1. Reading: reconstruct each page's text from its fragments and
    //    capture bounded snapshots for later human verification.
    advance(stage, PipelineStage::Reading);
    let mut page_texts: Vec<String> = Vec::with_capacity(page_count as usize);
    let mut page_snapshots: Vec<Vec<u8>> = Vec::new();
    let mut native_chars = 0usize;

    for index in 0..page_count {
        let fragments = source.page_fragments(index).await?;
        let page_text = layout::reconstruct_lines(&fragments);
        native_chars += page_text.chars().filter(|c| !c.is_whitespace()).count();
        page_texts.push(page_text);

        if index < config.snapshot_cap {
            let image = source.render_page(index, config.render_scale).await?;
            if !image.is_empty() {
                page_snapshots.push(image);
            }
        }

        // Cooperative yield so long documents do not starve the
        // runtime between page boundaries.
        if config.yield_every > 0 && (index + 1) % config.yield_every == 0 {
            tokio::task::yield_now().await;
        }
    }

    let mut full_text = page_texts.join(PAGE_BREAK);

    // 2. OCR fallback: near-empty native text means a scanned
    //    document. Discard the native text and re-derive it per page,
    //    tracking the minimum page confidence as the document score.
    let confidence = if native_chars < config.ocr_char_floor && page_count >= 1 {
        advance(stage, PipelineStage::OcrFallback);
        info!(
            native_chars,
            floor = config.ocr_char_floor,
            "sparse native text, falling back to OCR"
        );

        let mut ocr_texts: Vec<String> = Vec::with_capacity(page_count as usize);
        let mut min_confidence = f64::INFINITY;
        // Sequential per page for resource conservation; only the
        // concatenation order and the minimum confidence matter.
        for index in 0..page_count {
            let image = source.render_page(index, config.render_scale).await?;
            let outcome = ocr.recognize(&image).await?;
            min_confidence = min_confidence.min(outcome.confidence / 100.0);
            ocr_texts.push(outcome.text);

            if config.yield_every > 0 && (index + 1) % config.yield_every == 0 {
                tokio::task::yield_now().await;
            }
        }
        full_text = ocr_texts.join(PAGE_BREAK);

        let score = if min_confidence.is_finite() {
            min_confidence
        } else {
            0.0
        };
        let mut flagged_reasons = Vec::new();
        if score < config.ocr_confidence_floor {
            flagged_reasons.push("Low OCR confidence".to_string());
        }
        ConfidenceInfo {
            score,
            flagged_reasons,
            method: ExtractionMethod::Ocr,
        }
    } else {
        ConfidenceInfo {
            score: config.native_confidence,
            flagged_reasons: Vec::new(),
            method: ExtractionMethod::Native,
        }
    };

    // 3. Analyzing: the four analyzers run independently over the
    //    same final text.
    advance(stage, PipelineStage::Analyzing);
    let engine = AuditEngine::with_cost_window(config.cost_window);
    let analysis = engine.analyze(&full_text);

    // 4. Assembly.
    let result = AuditResult {
        id: Uuid::new_v4().to_string(),
        file_name: file_name.to_string(),
        fingerprint: fingerprint(&full_text),
        raw_text: full_text,
        redacted_text: analysis.redacted_text,
        fields: analysis.fields,
        findings: analysis.findings,
        tables: analysis.tables,
        page_count,
        page_snapshots,
        confidence,
        extracted_at: chrono::Utc::now(),
    };

    Ok(result)
}
