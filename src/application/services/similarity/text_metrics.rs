use std::collections::HashMap;
use std::fmt;

use crate::application::services::text_normalizer::tokenize;

use super::sequence::{edit_distance, lcs_length, levenshtein_similarity};

const BLEU_MAX_ORDER: usize = 4;
const BLEU_ZERO_PRECISION_EPSILON: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    WordErrorRate,
    FuzzyRatio,
    TokenSortRatio,
    Rouge1,
    RougeL,
    Bleu,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::WordErrorRate => "word_error_rate",
            MetricKind::FuzzyRatio => "fuzzy_ratio",
            MetricKind::TokenSortRatio => "fuzzy_token_ratio",
            MetricKind::Rouge1 => "rouge_1_f",
            MetricKind::RougeL => "rouge_l_f",
            MetricKind::Bleu => "bleu_score",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One optional text-comparison metric over normalized text.
///
/// `expected` is the reference, `transcribed` the hypothesis. `None` means the
/// metric is undefined for these inputs; it never blocks other metrics.
pub trait TextMetric: Send + Sync {
    fn kind(&self) -> MetricKind;
    fn score(&self, expected: &str, transcribed: &str) -> Option<f64>;
}

/// Word-level edit distance divided by the number of reference words, in `[0, ∞)`.
pub struct WordErrorRate;

impl TextMetric for WordErrorRate {
    fn kind(&self) -> MetricKind {
        MetricKind::WordErrorRate
    }

    fn score(&self, expected: &str, transcribed: &str) -> Option<f64> {
        let reference = tokenize(expected);
        if reference.is_empty() {
            return None;
        }
        let hypothesis = tokenize(transcribed);
        Some(edit_distance(&reference, &hypothesis) as f64 / reference.len() as f64)
    }
}

pub struct FuzzyRatio;

impl TextMetric for FuzzyRatio {
    fn kind(&self) -> MetricKind {
        MetricKind::FuzzyRatio
    }

    fn score(&self, expected: &str, transcribed: &str) -> Option<f64> {
        if expected.is_empty() && transcribed.is_empty() {
            return None;
        }
        Some(levenshtein_similarity(expected, transcribed))
    }
}

/// Fuzzy ratio after sorting each side's words, so word order does not matter.
pub struct TokenSortRatio;

impl TextMetric for TokenSortRatio {
    fn kind(&self) -> MetricKind {
        MetricKind::TokenSortRatio
    }

    fn score(&self, expected: &str, transcribed: &str) -> Option<f64> {
        if expected.is_empty() && transcribed.is_empty() {
            return None;
        }
        Some(levenshtein_similarity(
            &sorted_tokens(expected),
            &sorted_tokens(transcribed),
        ))
    }
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens = tokenize(text);
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Unigram-overlap F1.
pub struct Rouge1;

impl TextMetric for Rouge1 {
    fn kind(&self) -> MetricKind {
        MetricKind::Rouge1
    }

    fn score(&self, expected: &str, transcribed: &str) -> Option<f64> {
        let reference = tokenize(expected);
        let hypothesis = tokenize(transcribed);
        if reference.is_empty() || hypothesis.is_empty() {
            return None;
        }
        let overlap = clipped_overlap(&ngrams(&reference, 1), &ngrams(&hypothesis, 1));
        Some(f1(overlap, hypothesis.len(), reference.len()))
    }
}

/// Longest-common-subsequence F1 over words.
pub struct RougeL;

impl TextMetric for RougeL {
    fn kind(&self) -> MetricKind {
        MetricKind::RougeL
    }

    fn score(&self, expected: &str, transcribed: &str) -> Option<f64> {
        let reference = tokenize(expected);
        let hypothesis = tokenize(transcribed);
        if reference.is_empty() || hypothesis.is_empty() {
            return None;
        }
        let lcs = lcs_length(&reference, &hypothesis);
        Some(f1(lcs, hypothesis.len(), reference.len()))
    }
}

/// Sentence BLEU against a single reference with a brevity penalty.
///
/// The n-gram order is capped by the shorter side so short clips are not
/// zeroed by missing 4-grams; zero-count orders get a small epsilon.
pub struct Bleu;

impl TextMetric for Bleu {
    fn kind(&self) -> MetricKind {
        MetricKind::Bleu
    }

    fn score(&self, expected: &str, transcribed: &str) -> Option<f64> {
        let reference = tokenize(expected);
        if reference.is_empty() {
            return None;
        }
        let hypothesis = tokenize(transcribed);
        if hypothesis.is_empty() {
            return Some(0.0);
        }

        let max_order = BLEU_MAX_ORDER.min(reference.len()).min(hypothesis.len());
        let mut log_precision_sum = 0.0;

        for order in 1..=max_order {
            let hypothesis_ngrams = ngrams(&hypothesis, order);
            let total: usize = hypothesis_ngrams.values().sum();
            let matched = clipped_overlap(&ngrams(&reference, order), &hypothesis_ngrams);
            let precision = if matched == 0 {
                BLEU_ZERO_PRECISION_EPSILON / total as f64
            } else {
                matched as f64 / total as f64
            };
            log_precision_sum += precision.ln();
        }

        let geometric_mean = (log_precision_sum / max_order as f64).exp();
        let brevity_penalty = if hypothesis.len() >= reference.len() {
            1.0
        } else {
            (1.0 - reference.len() as f64 / hypothesis.len() as f64).exp()
        };

        Some((brevity_penalty * geometric_mean).clamp(0.0, 1.0))
    }
}

/// The full set of auxiliary metrics in reporting order.
pub fn default_text_metrics() -> Vec<Box<dyn TextMetric>> {
    vec![
        Box::new(WordErrorRate),
        Box::new(FuzzyRatio),
        Box::new(TokenSortRatio),
        Box::new(Rouge1),
        Box::new(RougeL),
        Box::new(Bleu),
    ]
}

fn ngrams<'a>(tokens: &[&'a str], order: usize) -> HashMap<Vec<&'a str>, usize> {
    let mut counts = HashMap::new();
    for window in tokens.windows(order) {
        *counts.entry(window.to_vec()).or_insert(0) += 1;
    }
    counts
}

fn clipped_overlap<'a>(
    reference: &HashMap<Vec<&'a str>, usize>,
    hypothesis: &HashMap<Vec<&'a str>, usize>,
) -> usize {
    hypothesis
        .iter()
        .map(|(gram, count)| (*count).min(reference.get(gram).copied().unwrap_or(0)))
        .sum()
}

fn f1(overlap: usize, hypothesis_len: usize, reference_len: usize) -> f64 {
    if overlap == 0 {
        return 0.0;
    }
    let precision = overlap as f64 / hypothesis_len as f64;
    let recall = overlap as f64 / reference_len as f64;
    2.0 * precision * recall / (precision + recall)
}
