use std::collections::BTreeMap;

use serde::Serialize;

use super::validation_report::BatchEntry;
use super::validation_verdict::ValidationLevel;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub needs_review: usize,
    pub errored: usize,
    pub levels: BTreeMap<ValidationLevel, usize>,
    pub mean_word_level_similarity: Option<f64>,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Default::default()
        };
        let mut similarities = Vec::new();

        for entry in entries {
            match entry.report() {
                Some(report) => {
                    let validation = &report.enhanced_validation;
                    if validation.validation_passed {
                        summary.passed += 1;
                    } else {
                        summary.needs_review += 1;
                    }
                    *summary.levels.entry(validation.validation_level).or_default() += 1;
                    similarities.push(validation.word_level_similarity);
                }
                None => summary.errored += 1,
            }
        }

        if !similarities.is_empty() {
            summary.mean_word_level_similarity =
                Some(similarities.iter().sum::<f64>() / similarities.len() as f64);
        }

        summary
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64
    }
}
