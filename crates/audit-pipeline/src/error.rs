use thiserror::Error;

/// Fatal pipeline failures. Field-extraction validation problems are
/// recovered inside the engine and never surface here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Document has {pages} pages, exceeding the {limit}-page limit")]
    PageLimitExceeded { pages: u32, limit: u32 },

    #[error("PDF source read failed: {0}")]
    SourceRead(String),

    #[error("OCR failed: {0}")]
    Ocr(String),
}
