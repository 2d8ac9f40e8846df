use std::path::PathBuf;

use super::quality_assessment::QualityAssessment;
use super::similarity_metrics::SimilarityMetrics;
use super::validation_request::TranscriptionBackend;
use super::validation_verdict::ValidationVerdict;

/// Everything learned about one validated file. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub audio_path: PathBuf,
    pub language: Option<String>,
    pub backend: TranscriptionBackend,
    /// Only meaningful for the local backend.
    pub model_size: Option<String>,
    pub expected_text: String,
    pub transcribed_text: String,
    pub confidence: Option<f32>,
    pub metrics: SimilarityMetrics,
    pub quality: Option<QualityAssessment>,
    pub verdict: ValidationVerdict,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.verdict.passed
    }
}
