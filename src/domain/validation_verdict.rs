use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::similarity_metrics::SimilarityMetrics;

const EXCELLENT_MIN_SIMILARITY: f64 = 0.95;
const EXCELLENT_MAX_WER: f64 = 0.05;
const GOOD_MIN_SIMILARITY: f64 = 0.85;
const GOOD_MAX_WER: f64 = 0.15;
const GOOD_MAX_MISMATCH_RATE: f64 = 0.10;
const ACCEPTABLE_MIN_SIMILARITY: f64 = 0.70;
const ACCEPTABLE_MAX_WER: f64 = 0.25;
const MAX_LISTED_MISMATCHES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationLevel {
    Excellent,
    Good,
    Acceptable,
    NeedsReview,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Excellent => "EXCELLENT",
            ValidationLevel::Good => "GOOD",
            ValidationLevel::Acceptable => "ACCEPTABLE",
            ValidationLevel::NeedsReview => "NEEDS_REVIEW",
        }
    }

    pub fn passed(&self) -> bool {
        !matches!(self, ValidationLevel::NeedsReview)
    }
}

impl FromStr for ValidationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXCELLENT" => Ok(ValidationLevel::Excellent),
            "GOOD" => Ok(ValidationLevel::Good),
            "ACCEPTABLE" => Ok(ValidationLevel::Acceptable),
            "NEEDS_REVIEW" => Ok(ValidationLevel::NeedsReview),
            _ => Err(format!("Invalid validation level: {}", s)),
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub passed: bool,
    pub level: ValidationLevel,
    pub recommendations: Vec<String>,
}

impl ValidationVerdict {
    /// Applies the fixed, ordered thresholds; the first matching level wins.
    ///
    /// A missing word error rate never satisfies a WER bound, so such results
    /// always land in `NEEDS_REVIEW`.
    pub fn from_metrics(metrics: &SimilarityMetrics) -> Self {
        let similarity = metrics.word_level_similarity;
        let wer_at_most = |bound: f64| metrics.word_error_rate.is_some_and(|wer| wer <= bound);

        let level = if similarity >= EXCELLENT_MIN_SIMILARITY && wer_at_most(EXCELLENT_MAX_WER) {
            ValidationLevel::Excellent
        } else if similarity >= GOOD_MIN_SIMILARITY
            && wer_at_most(GOOD_MAX_WER)
            && metrics.mismatch_rate() <= GOOD_MAX_MISMATCH_RATE
        {
            ValidationLevel::Good
        } else if similarity >= ACCEPTABLE_MIN_SIMILARITY && wer_at_most(ACCEPTABLE_MAX_WER) {
            ValidationLevel::Acceptable
        } else {
            ValidationLevel::NeedsReview
        };

        Self {
            passed: level.passed(),
            level,
            recommendations: recommendations_for(level, metrics),
        }
    }
}

fn recommendations_for(level: ValidationLevel, metrics: &SimilarityMetrics) -> Vec<String> {
    match level {
        ValidationLevel::Excellent => vec![
            "Audio quality is excellent".to_string(),
            "Transcription matches the expected text very closely".to_string(),
        ],
        ValidationLevel::Good => vec![
            "Audio quality is good".to_string(),
            "Minor differences detected, likely acceptable".to_string(),
        ],
        ValidationLevel::Acceptable => vec![
            "Audio is acceptable but could be improved".to_string(),
            "Consider reviewing for pronunciation issues".to_string(),
        ],
        ValidationLevel::NeedsReview => {
            let mut recommendations = vec![format!(
                "Low similarity score: {:.1}%",
                metrics.word_level_similarity * 100.0
            )];
            recommendations.push(match metrics.word_error_rate {
                Some(wer) => format!("High word error rate: {:.1}%", wer * 100.0),
                None => "Word error rate unavailable".to_string(),
            });
            if !metrics.mismatched_words.is_empty() {
                let listed: Vec<&str> = metrics
                    .mismatched_words
                    .iter()
                    .take(MAX_LISTED_MISMATCHES)
                    .map(String::as_str)
                    .collect();
                recommendations.push(format!("Mismatched words: {}", listed.join(", ")));
            }
            recommendations.push("Manual review recommended".to_string());
            recommendations
        }
    }
}
