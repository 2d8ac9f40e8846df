use std::fs::File;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, StandardTagKey, Tag};
use symphonia::core::probe::Hint;

use crate::application::ports::{ExpectedTextError, ExpectedTextResolver};

/// Custom tag keys TTS pipelines commonly write the source text under, in lookup order.
pub const EXPECTED_TEXT_KEYS: [&str; 6] = [
    "expected_text",
    "transcript",
    "original_text",
    "text",
    "expected",
    "target",
];

const USER_TEXT_PREFIX: &str = "TXXX:";

/// Reads the expected text from tags embedded in the audio container (ID3, Vorbis comments,
/// MP4 atoms, RIFF INFO).
#[derive(Debug, Clone, Copy, Default)]
pub struct TagExpectedTextResolver;

impl ExpectedTextResolver for TagExpectedTextResolver {
    fn resolve(
        &self,
        audio_path: &Path,
        preferred_key: Option<&str>,
    ) -> Result<Option<String>, ExpectedTextError> {
        let tags = read_tags(audio_path)?;
        let found = select_expected_text(&tags, preferred_key);

        match &found {
            Some(text) => tracing::debug!(
                path = %audio_path.display(),
                chars = text.chars().count(),
                "Expected text found in audio metadata"
            ),
            None => tracing::debug!(path = %audio_path.display(), "No expected text in audio metadata"),
        }

        Ok(found)
    }
}

fn read_tags(audio_path: &Path) -> Result<Vec<Tag>, ExpectedTextError> {
    let file = File::open(audio_path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = audio_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| ExpectedTextError::MetadataUnreadable(e.to_string()))?;

    let mut tags = Vec::new();
    if let Some(metadata) = probed.metadata.get()
        && let Some(revision) = metadata.current()
    {
        tags.extend_from_slice(revision.tags());
    }
    if let Some(revision) = probed.format.metadata().current() {
        tags.extend_from_slice(revision.tags());
    }

    Ok(tags)
}

fn bare_key(key: &str) -> &str {
    key.strip_prefix(USER_TEXT_PREFIX).unwrap_or(key)
}

fn non_blank(tag: &Tag) -> Option<String> {
    let text = tag.value.to_string();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn by_key(tags: &[Tag], key: &str) -> Option<String> {
    tags.iter()
        .filter(|tag| bare_key(&tag.key).eq_ignore_ascii_case(key))
        .find_map(non_blank)
}

fn by_standard_key(tags: &[Tag], std_key: StandardTagKey) -> Option<String> {
    tags.iter()
        .filter(|tag| tag.std_key == Some(std_key))
        .find_map(non_blank)
}

/// Preferred key first, then the well-known custom keys, then lyrics, comment and title.
pub fn select_expected_text(tags: &[Tag], preferred_key: Option<&str>) -> Option<String> {
    preferred_key
        .and_then(|key| by_key(tags, key))
        .or_else(|| EXPECTED_TEXT_KEYS.iter().find_map(|key| by_key(tags, key)))
        .or_else(|| by_standard_key(tags, StandardTagKey::Lyrics))
        .or_else(|| by_standard_key(tags, StandardTagKey::Comment))
        .or_else(|| by_standard_key(tags, StandardTagKey::TrackTitle))
}
