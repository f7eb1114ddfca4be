//! Document audit pipeline.
//!
//! Turns a PDF-derived stream of positioned text fragments into
//! ordered text, structured metadata, detected tables, and a line-item
//! cost audit. PDF parsing, OCR, and persistence are collaborators
//! behind traits in [`source`]; the algorithms live in `audit-engine`.

pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod source;

pub use error::PipelineError;
pub use fingerprint::fingerprint;
pub use pipeline::{run_pipeline, PipelineConfig, PipelineStage};
pub use source::{
    push_remote, FragmentDump, NullOcr, OcrEngine, OcrOutcome, PdfSource, RemoteHandle,
    RemoteStore,
};
