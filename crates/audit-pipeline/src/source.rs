//! Collaborator interfaces consumed by the pipeline.
//!
//! PDF parsing, OCR, and remote persistence are external concerns: the
//! pipeline only needs positioned fragments, rendered page images, and
//! recognized text behind these traits.

use crate::error::PipelineError;
use async_trait::async_trait;
use audit_types::{AuditResult, TextFragment};

/// A readable PDF document: page count, per-page positioned text
/// fragments, and page rendering for snapshots and OCR.
#[async_trait]
pub trait PdfSource: Send + Sync {
    async fn page_count(&self) -> Result<u32, PipelineError>;

    /// Positioned text fragments for a zero-based page index.
    async fn page_fragments(&self, index: u32) -> Result<Vec<TextFragment>, PipelineError>;

    /// Renders a page to encoded image bytes at the given scale.
    /// An empty buffer means the source cannot render.
    async fn render_page(&self, index: u32, scale: f64) -> Result<Vec<u8>, PipelineError>;
}

/// Text recognized from one page image, with the engine's confidence
/// as a percentage (0-100).
#[derive(Debug, Clone)]
pub struct OcrOutcome {
    pub text: String,
    pub confidence: f64,
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<OcrOutcome, PipelineError>;
}

/// OCR engine that recognizes nothing. Used where fallback is not
/// expected (fragment dumps carry native text).
pub struct NullOcr;

#[async_trait]
impl OcrEngine for NullOcr {
    async fn recognize(&self, _image: &[u8]) -> Result<OcrOutcome, PipelineError> {
        Ok(OcrOutcome {
            text: String::new(),
            confidence: 0.0,
        })
    }
}

/// Opaque identifier pair returned by remote persistence.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RemoteHandle {
    pub document_id: String,
    pub version_id: String,
}

/// Remote persistence collaborator. Push failures are non-fatal to an
/// audit; see [`push_remote`].
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn push(&self, result: &AuditResult) -> Result<RemoteHandle, PipelineError>;
}

/// Pushes a completed result to remote storage when sync is enabled.
/// Sync enablement is an explicit parameter, not ambient state, and a
/// failed push is logged rather than propagated: the audit already
/// succeeded locally.
pub async fn push_remote(
    store: &dyn RemoteStore,
    result: &AuditResult,
    sync_enabled: bool,
) -> Option<RemoteHandle> {
    if !sync_enabled {
        return None;
    }
    match store.push(result).await {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!("remote sync failed for {}: {err}", result.id);
            None
        }
    }
}

/// In-memory [`PdfSource`] backed by a JSON dump of per-page fragment
/// lists, as produced by an external PDF reader. Lets the CLI and tests
/// run without any PDF parser.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FragmentDump {
    pub pages: Vec<Vec<TextFragment>>,
}

impl FragmentDump {
    pub fn new(pages: Vec<Vec<TextFragment>>) -> Self {
        Self { pages }
    }

    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json).map_err(|e| PipelineError::SourceRead(e.to_string()))
    }
}

#[async_trait]
impl PdfSource for FragmentDump {
    async fn page_count(&self) -> Result<u32, PipelineError> {
        Ok(self.pages.len() as u32)
    }

    async fn page_fragments(&self, index: u32) -> Result<Vec<TextFragment>, PipelineError> {
        self.pages
            .get(index as usize)
            .cloned()
            .ok_or_else(|| PipelineError::SourceRead(format!("page {index} out of range")))
    }

    async fn render_page(&self, _index: u32, _scale: f64) -> Result<Vec<u8>, PipelineError> {
        // A fragment dump carries no rasterized pages.
        Ok(Vec::new())
    }
}
