use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{TranscriptionBackend, ValidationRequest};

use super::config::Settings;

/// Batch input file: `{"items": [{"audio_path": "...", "expected_text": "..."}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchManifest {
    pub items: Vec<ManifestItem>,
}

/// Per-item fields override the shared settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestItem {
    pub audio_path: PathBuf,
    #[serde(default)]
    pub expected_text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub backend: Option<TranscriptionBackend>,
    #[serde(default)]
    pub model_size: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl BatchManifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Relative audio paths resolve against `base_dir`, usually the manifest's directory.
    pub fn into_requests(self, settings: &Settings, base_dir: &Path) -> Vec<ValidationRequest> {
        let transcription = &settings.transcription;
        self.items
            .into_iter()
            .map(|item| {
                let audio_path = if item.audio_path.is_relative() {
                    base_dir.join(&item.audio_path)
                } else {
                    item.audio_path
                };

                let mut request = ValidationRequest::new(audio_path)
                    .with_backend(item.backend.unwrap_or(transcription.backend))
                    .with_model_size(
                        item.model_size
                            .unwrap_or_else(|| transcription.model_size.clone()),
                    )
                    .with_quality_check(settings.quality.enabled);
                request.expected_text = item.expected_text;
                request.language = item.language.or_else(|| transcription.language.clone());
                request.preferred_metadata_key = settings.metadata.preferred_key.clone();
                request
            })
            .collect()
    }
}
