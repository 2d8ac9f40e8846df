use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_SIZE: &str = "base";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionBackend {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
}

impl TranscriptionBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionBackend::Local => "local",
            TranscriptionBackend::OpenAi => "openai",
            TranscriptionBackend::Azure => "azure",
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, TranscriptionBackend::Local)
    }
}

impl FromStr for TranscriptionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "whisper" => Ok(TranscriptionBackend::Local),
            "openai" => Ok(TranscriptionBackend::OpenAi),
            "azure" => Ok(TranscriptionBackend::Azure),
            other => Err(format!(
                "Invalid transcription backend: {}. Expected: local, openai, or azure",
                other
            )),
        }
    }
}

impl fmt::Display for TranscriptionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file to validate plus the options that shape how it is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub audio_path: PathBuf,
    pub expected_text: Option<String>,
    pub language: Option<String>,
    pub backend: TranscriptionBackend,
    pub model_size: String,
    pub quality_check: bool,
    pub preferred_metadata_key: Option<String>,
}

impl ValidationRequest {
    pub fn new(audio_path: impl Into<PathBuf>) -> Self {
        Self {
            audio_path: audio_path.into(),
            expected_text: None,
            language: None,
            backend: TranscriptionBackend::Local,
            model_size: DEFAULT_MODEL_SIZE.to_string(),
            quality_check: true,
            preferred_metadata_key: None,
        }
    }

    pub fn with_expected_text(mut self, text: impl Into<String>) -> Self {
        self.expected_text = Some(text.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_backend(mut self, backend: TranscriptionBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_model_size(mut self, model_size: impl Into<String>) -> Self {
        self.model_size = model_size.into();
        self
    }

    pub fn with_quality_check(mut self, enabled: bool) -> Self {
        self.quality_check = enabled;
        self
    }

    pub fn with_preferred_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.preferred_metadata_key = Some(key.into());
        self
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// The explicit expected text, if one was supplied and is not blank.
    pub fn explicit_expected_text(&self) -> Option<&str> {
        self.expected_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
