/// Reduces a language hint such as `es-CO` or `fr_CA` to the lowercase primary
/// subtag Whisper understands. Blank hints yield `None`.
pub fn primary_language_subtag(hint: &str) -> Option<String> {
    hint.trim()
        .split(['-', '_'])
        .next()
        .map(str::trim)
        .filter(|subtag| !subtag.is_empty())
        .map(str::to_lowercase)
}
