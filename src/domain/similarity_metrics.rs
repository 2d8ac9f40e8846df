use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Perfect,
    Phonetic,
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Perfect => "perfect",
            MatchKind::Phonetic => "phonetic",
            MatchKind::Fuzzy => "fuzzy",
        }
    }

    /// Perfect and phonetic matches count towards the word-level score; fuzzy ones do not.
    pub fn counts_as_match(&self) -> bool {
        matches!(self, MatchKind::Perfect | MatchKind::Phonetic)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    pub expected_word: String,
    pub matched_word: String,
    pub score: f64,
    pub kind: MatchKind,
}

/// Every lexical and semantic comparison between one expected and one transcribed text.
///
/// `word_level_similarity` is the primary score and is always present. All
/// `Option` fields are independently optional metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMetrics {
    pub character_similarity: f64,
    pub word_overlap: f64,
    pub words_matched: usize,
    pub total_unique_words: usize,
    pub word_level_similarity: f64,
    pub total_expected_words: usize,
    pub perfect_matches: Vec<WordMatch>,
    pub phonetic_matches: Vec<WordMatch>,
    pub fuzzy_matches: Vec<WordMatch>,
    pub mismatched_words: Vec<String>,
    pub word_error_rate: Option<f64>,
    pub fuzzy_ratio: Option<f64>,
    pub fuzzy_token_ratio: Option<f64>,
    pub rouge_1_f: Option<f64>,
    pub rouge_l_f: Option<f64>,
    pub bleu_score: Option<f64>,
    pub semantic_similarity: Option<f64>,
}

impl SimilarityMetrics {
    /// Mean of whichever of fuzzy ratio, ROUGE-1 F1 and BLEU are available.
    pub fn overall_similarity(&self) -> Option<f64> {
        let available: Vec<f64> = [self.fuzzy_ratio, self.rouge_1_f, self.bleu_score]
            .into_iter()
            .flatten()
            .collect();

        if available.is_empty() {
            return None;
        }
        Some(available.iter().sum::<f64>() / available.len() as f64)
    }

    pub fn mismatch_rate(&self) -> f64 {
        if self.total_expected_words == 0 {
            return 0.0;
        }
        self.mismatched_words.len() as f64 / self.total_expected_words as f64
    }
}
