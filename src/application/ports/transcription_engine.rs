use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{TranscriptionBackend, TranscriptionResult};

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language_hint: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError>;

    fn backend(&self) -> TranscriptionBackend;
}

/// Hands out long-lived engines for a backend and model size.
pub trait TranscriptionEngineProvider: Send + Sync {
    fn engine(
        &self,
        backend: TranscriptionBackend,
        model_size: &str,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}

impl TranscriptionError {
    /// The engine itself could not be built; retrying with the same settings will not help.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, TranscriptionError::ModelLoadFailed(_))
    }
}
