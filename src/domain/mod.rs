mod batch_summary;
mod embedding;
mod quality_assessment;
mod similarity_metrics;
mod transcription;
mod validation_report;
mod validation_request;
mod validation_result;
mod validation_verdict;

pub use batch_summary::BatchSummary;
pub use embedding::Embedding;
pub use quality_assessment::QualityAssessment;
pub use similarity_metrics::{MatchKind, SimilarityMetrics, WordMatch};
pub use transcription::{TranscriptSegment, TranscriptionResult};
pub use validation_report::{
    BasicSimilarity, BatchEntry, ComprehensiveSimilarity, EnhancedValidation, ValidationReport,
};
pub use validation_request::{DEFAULT_MODEL_SIZE, TranscriptionBackend, ValidationRequest};
pub use validation_result::ValidationResult;
pub use validation_verdict::{ValidationLevel, ValidationVerdict};
