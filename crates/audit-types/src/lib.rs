pub mod types;

pub use types::{
    AuditResult, BenchmarkEntry, ConfidenceInfo, CostFinding, DocumentFields, ExtractionMethod,
    FapEligibility, LegalReference, TableBlock, TextFragment, VarianceStatus,
};
