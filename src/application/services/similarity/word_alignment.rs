use crate::application::services::text_normalizer::{strip_non_alphanumeric, tokenize};
use crate::domain::{MatchKind, WordMatch};

use super::phonetic::phonetic_fold;
use super::sequence::char_similarity;

pub const PHONETIC_MATCH_THRESHOLD: f64 = 0.8;
pub const MISMATCH_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordAlignment {
    pub perfect: Vec<WordMatch>,
    pub phonetic: Vec<WordMatch>,
    pub fuzzy: Vec<WordMatch>,
    pub mismatched: Vec<String>,
    pub total_expected: usize,
}

impl WordAlignment {
    /// Share of expected words with a perfect or phonetic counterpart, in `[0, 1]`.
    pub fn word_level_similarity(&self) -> f64 {
        if self.total_expected == 0 {
            return 0.0;
        }
        let matched = self
            .perfect
            .iter()
            .chain(&self.phonetic)
            .filter(|m| m.kind.counts_as_match())
            .count();
        matched as f64 / self.total_expected as f64
    }
}

struct Candidate<'a> {
    word: &'a str,
    clean: String,
    folded: String,
}

/// Matches every expected word against the whole transcription.
///
/// Transcribed words are not consumed, so adding words to a transcription can
/// only keep or raise the score. A phonetic match needs a candidate whose folded
/// similarity clears the threshold and beats that same candidate's plain similarity.
pub fn align_words(expected_norm: &str, transcribed_norm: &str) -> WordAlignment {
    let expected = tokenize(expected_norm);
    let candidates: Vec<Candidate<'_>> = tokenize(transcribed_norm)
        .into_iter()
        .map(|word| {
            let clean = strip_non_alphanumeric(word);
            let folded = phonetic_fold(&clean);
            Candidate {
                word,
                clean,
                folded,
            }
        })
        .collect();

    let mut alignment = WordAlignment {
        total_expected: expected.len(),
        ..Default::default()
    };

    for expected_word in expected {
        let clean = strip_non_alphanumeric(expected_word);

        if let Some(exact) = candidates
            .iter()
            .find(|c| !clean.is_empty() && c.clean == clean)
        {
            alignment.perfect.push(word_match(
                expected_word,
                exact.word,
                1.0,
                MatchKind::Perfect,
            ));
            continue;
        }

        let folded = phonetic_fold(&clean);
        let mut best_fuzzy: Option<(&Candidate<'_>, f64)> = None;
        let mut best_phonetic: Option<(&Candidate<'_>, f64)> = None;

        for candidate in &candidates {
            let plain = char_similarity(&clean, &candidate.clean);
            if best_fuzzy.is_none_or(|(_, best)| plain > best) {
                best_fuzzy = Some((candidate, plain));
            }

            let phonetic = char_similarity(&folded, &candidate.folded);
            if phonetic > PHONETIC_MATCH_THRESHOLD
                && phonetic > plain
                && best_phonetic.is_none_or(|(_, best)| phonetic > best)
            {
                best_phonetic = Some((candidate, phonetic));
            }
        }

        match (best_phonetic, best_fuzzy) {
            (Some((candidate, score)), _) => alignment.phonetic.push(word_match(
                expected_word,
                candidate.word,
                score,
                MatchKind::Phonetic,
            )),
            (None, Some((candidate, score))) if score >= MISMATCH_THRESHOLD => {
                alignment.fuzzy.push(word_match(
                    expected_word,
                    candidate.word,
                    score,
                    MatchKind::Fuzzy,
                ))
            }
            _ => alignment.mismatched.push(expected_word.to_string()),
        }
    }

    alignment
}

fn word_match(expected: &str, matched: &str, score: f64, kind: MatchKind) -> WordMatch {
    WordMatch {
        expected_word: expected.to_string(),
        matched_word: matched.to_string(),
        score,
        kind,
    }
}
