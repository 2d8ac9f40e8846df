mod quality_assessor;
pub mod similarity;
mod text_normalizer;
mod validation_service;

pub use quality_assessor::{NOISE_PROMPTS, QUALITY_PROMPTS, QualityAssessor, QualityError};
pub use similarity::SimilarityEngine;
pub use text_normalizer::{normalize_text, strip_non_alphanumeric, tokenize};
pub use validation_service::{ValidationError, ValidationService, to_batch_entry};
