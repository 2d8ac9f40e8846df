use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionEngineProvider, TranscriptionError,
};
use crate::domain::{TranscriptionBackend, TranscriptionResult};

/// Returns canned transcriptions per audio path; unknown paths get the default text.
pub struct MockTranscriptionEngine {
    default_text: String,
    by_path: HashMap<PathBuf, String>,
    failing: HashMap<PathBuf, String>,
}

impl MockTranscriptionEngine {
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            default_text: default_text.into(),
            by_path: HashMap::new(),
            failing: HashMap::new(),
        }
    }

    pub fn with_transcript(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.by_path.insert(path.into(), text.into());
        self
    }

    /// Makes transcription of `path` fail with an API error carrying `message`.
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failing.insert(path.into(), message.into());
        self
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language_hint: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        if let Some(message) = self.failing.get(audio_path) {
            return Err(TranscriptionError::ApiRequestFailed(message.clone()));
        }
        let text = self
            .by_path
            .get(audio_path)
            .unwrap_or(&self.default_text)
            .clone();
        Ok(TranscriptionResult::from_text(text)
            .with_language(language_hint.map(str::to_string))
            .with_confidence(Some(1.0)))
    }

    fn backend(&self) -> TranscriptionBackend {
        TranscriptionBackend::Local
    }
}

/// Hands the same engine out for every backend and size.
pub struct StaticEngineProvider {
    engine: Arc<dyn TranscriptionEngine>,
}

impl StaticEngineProvider {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self { engine }
    }
}

impl TranscriptionEngineProvider for StaticEngineProvider {
    fn engine(
        &self,
        _backend: TranscriptionBackend,
        _model_size: &str,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        Ok(Arc::clone(&self.engine))
    }
}
