use serde::{Deserialize, Serialize};

use super::quality_assessment::QualityAssessment;
use super::similarity_metrics::WordMatch;
use super::validation_result::ValidationResult;
use super::validation_verdict::ValidationLevel;

/// The per-file record handed to reporting layers. Field names are a stable contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub audio_path: String,
    pub language: Option<String>,
    pub backend: String,
    pub model_size: Option<String>,
    pub expected_text: String,
    pub transcribed_text: String,
    pub transcription_confidence: Option<f32>,
    pub basic_similarity: BasicSimilarity,
    pub comprehensive_similarity: ComprehensiveSimilarity,
    pub enhanced_validation: EnhancedValidation,
    pub quality: Option<QualityAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicSimilarity {
    pub similarity_ratio: f64,
    pub word_error_rate: Option<f64>,
    pub word_overlap: f64,
    pub words_matched: usize,
    pub total_unique_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveSimilarity {
    pub fuzzy_ratio: Option<f64>,
    pub fuzzy_token_ratio: Option<f64>,
    pub rouge_1_f: Option<f64>,
    pub rouge_l_f: Option<f64>,
    pub bleu_score: Option<f64>,
    pub overall_similarity: Option<f64>,
    #[serde(default)]
    pub semantic_similarity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedValidation {
    pub transcribed_text: String,
    pub similarity_score: f64,
    pub word_level_similarity: f64,
    pub perfect_matches: Vec<WordMatch>,
    pub phonetic_matches: Vec<WordMatch>,
    #[serde(default)]
    pub fuzzy_matches: Vec<WordMatch>,
    pub mismatched_words: Vec<String>,
    pub word_error_rate: Option<f64>,
    pub validation_passed: bool,
    pub validation_level: ValidationLevel,
    pub recommendations: Vec<String>,
}

impl From<&ValidationResult> for ValidationReport {
    fn from(result: &ValidationResult) -> Self {
        let metrics = &result.metrics;
        Self {
            audio_path: result.audio_path.display().to_string(),
            language: result.language.clone(),
            backend: result.backend.as_str().to_string(),
            model_size: result.model_size.clone(),
            expected_text: result.expected_text.clone(),
            transcribed_text: result.transcribed_text.clone(),
            transcription_confidence: result.confidence,
            basic_similarity: BasicSimilarity {
                similarity_ratio: metrics.character_similarity,
                word_error_rate: metrics.word_error_rate,
                word_overlap: metrics.word_overlap,
                words_matched: metrics.words_matched,
                total_unique_words: metrics.total_unique_words,
            },
            comprehensive_similarity: ComprehensiveSimilarity {
                fuzzy_ratio: metrics.fuzzy_ratio,
                fuzzy_token_ratio: metrics.fuzzy_token_ratio,
                rouge_1_f: metrics.rouge_1_f,
                rouge_l_f: metrics.rouge_l_f,
                bleu_score: metrics.bleu_score,
                overall_similarity: metrics.overall_similarity(),
                semantic_similarity: metrics.semantic_similarity,
            },
            enhanced_validation: EnhancedValidation {
                transcribed_text: result.transcribed_text.clone(),
                similarity_score: metrics.character_similarity,
                word_level_similarity: metrics.word_level_similarity,
                perfect_matches: metrics.perfect_matches.clone(),
                phonetic_matches: metrics.phonetic_matches.clone(),
                fuzzy_matches: metrics.fuzzy_matches.clone(),
                mismatched_words: metrics.mismatched_words.clone(),
                word_error_rate: metrics.word_error_rate,
                validation_passed: result.verdict.passed,
                validation_level: result.verdict.level,
                recommendations: result.verdict.recommendations.clone(),
            },
            quality: result.quality,
        }
    }
}

impl From<ValidationResult> for ValidationReport {
    fn from(result: ValidationResult) -> Self {
        Self::from(&result)
    }
}

/// One entry of a batch run: either a full report or the error that stopped that file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchEntry {
    Completed(ValidationReport),
    Failed { audio_path: String, error: String },
}

impl BatchEntry {
    pub fn audio_path(&self) -> &str {
        match self {
            BatchEntry::Completed(report) => &report.audio_path,
            BatchEntry::Failed { audio_path, .. } => audio_path,
        }
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            BatchEntry::Completed(report) => Some(report),
            BatchEntry::Failed { .. } => None,
        }
    }

    pub fn passed(&self) -> bool {
        self.report()
            .is_some_and(|report| report.enhanced_validation.validation_passed)
    }
}
