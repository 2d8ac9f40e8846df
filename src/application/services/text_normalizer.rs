use regex::Regex;
use std::sync::LazyLock;

static POSSESSIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b['’]s\b").unwrap());
static INNER_APOSTROPHE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b['’]\b").unwrap());
static COMPOUND_HYPHEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b-\b").unwrap());
static CLAUSE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;:!?]+").unwrap());
static PERIOD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.+").unwrap());

/// Canonical comparison form of a text. Total: never fails, empty in gives empty out.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let possessive_folded = POSSESSIVE.replace_all(&lowered, "s");
    let apostrophes_joined = INNER_APOSTROPHE.replace_all(&possessive_folded, "");
    let compounds_split = COMPOUND_HYPHEN.replace_all(&apostrophes_joined, " ");
    let clauses_spaced = CLAUSE_PUNCTUATION.replace_all(&compounds_split, " ");
    let periods_collapsed = PERIOD_RUN.replace_all(&clauses_spaced, ".");

    periods_collapsed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace tokens of already-normalized text. Tokens with no letter or digit,
/// such as a detached `-` or `.`, are not words and are dropped.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .collect()
}

/// Keeps only alphanumeric characters of a token.
pub fn strip_non_alphanumeric(token: &str) -> String {
    token.chars().filter(|c| c.is_alphanumeric()).collect()
}
