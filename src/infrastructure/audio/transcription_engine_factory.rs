use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    TranscriptionEngine, TranscriptionEngineProvider, TranscriptionError,
};
use crate::domain::TranscriptionBackend;

use super::azure_whisper_engine::AzureWhisperEngine;
use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

/// Credentials and endpoints for the remote backends.
#[derive(Debug, Clone, Default)]
pub struct RemoteEngineSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub remote_model: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: Option<String>,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        backend: TranscriptionBackend,
        model_size: &str,
        remote: &RemoteEngineSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match backend {
            TranscriptionBackend::Local => {
                let engine = CandleWhisperEngine::new(model_size)?;
                Ok(Arc::new(engine))
            }
            TranscriptionBackend::OpenAi => {
                let key = required(&remote.api_key, "API key required for OpenAI Whisper")?;
                let engine = OpenAiWhisperEngine::new(
                    key.to_string(),
                    remote.base_url.clone(),
                    remote.remote_model.clone(),
                );
                Ok(Arc::new(engine))
            }
            TranscriptionBackend::Azure => {
                let key = required(&remote.api_key, "API key required for Azure Whisper")?;
                let base_url = required(&remote.base_url, "base URL required for Azure Whisper")?;
                let deployment = required(
                    &remote.azure_deployment,
                    "deployment required for Azure Whisper",
                )?;
                let api_version = remote.azure_api_version.as_deref().unwrap_or("2024-06-01");
                Ok(Arc::new(AzureWhisperEngine::new(
                    base_url,
                    deployment,
                    key,
                    api_version,
                )))
            }
        }
    }
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, TranscriptionError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TranscriptionError::ModelLoadFailed(message.to_string()))
}

type EngineKey = (TranscriptionBackend, String);

/// Builds each `(backend, model size)` engine on first use and keeps it for the process lifetime.
///
/// Failed builds are not cached, so a missing model can be fixed without a restart.
pub struct CachingTranscriptionEngineProvider {
    remote: RemoteEngineSettings,
    engines: Mutex<HashMap<EngineKey, Arc<dyn TranscriptionEngine>>>,
}

impl CachingTranscriptionEngineProvider {
    pub fn new(remote: RemoteEngineSettings) -> Self {
        Self {
            remote,
            engines: Mutex::new(HashMap::new()),
        }
    }
}

impl TranscriptionEngineProvider for CachingTranscriptionEngineProvider {
    fn engine(
        &self,
        backend: TranscriptionBackend,
        model_size: &str,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        // Remote engines ignore the size hint, so they share one cache slot
        let key = if backend.is_remote() {
            (backend, String::new())
        } else {
            (backend, model_size.to_string())
        };

        let mut engines = self.engines.lock().map_err(|_| {
            TranscriptionError::ModelLoadFailed("engine cache mutex poisoned".to_string())
        })?;

        if let Some(engine) = engines.get(&key) {
            return Ok(Arc::clone(engine));
        }

        tracing::info!(backend = %backend, model_size = model_size, "Creating transcription engine");
        let engine = TranscriptionEngineFactory::create(backend, model_size, &self.remote)?;
        engines.insert(key, Arc::clone(&engine));
        Ok(engine)
    }
}
