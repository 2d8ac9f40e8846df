use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{TranscriptSegment, TranscriptionBackend, TranscriptionResult};
use crate::infrastructure::observability::preview_text;

use super::language::primary_language_subtag;
use super::upload::audio_file_part;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "whisper-1";

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct VerboseTranscriptionResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Deserialize)]
struct VerboseSegment {
    start: f32,
    end: f32,
    text: String,
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language_hint: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let file_part = audio_file_part(audio_path).await?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("temperature", "0")
            .part("file", file_part);
        let language = language_hint.and_then(primary_language_subtag);
        if let Some(language) = &language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(model = %self.model, audio_path = %audio_path.display(), "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: VerboseTranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let text = result.text.trim().to_string();
        if text.is_empty() {
            tracing::warn!(audio_path = %audio_path.display(), "OpenAI Whisper could not understand audio");
        }

        tracing::info!(
            chars = text.len(),
            preview = %preview_text(&text),
            "OpenAI Whisper transcription completed"
        );

        let segments = result
            .segments
            .into_iter()
            .map(|s| TranscriptSegment {
                start_secs: s.start,
                end_secs: s.end,
                text: s.text.trim().to_string(),
            })
            .collect();

        Ok(TranscriptionResult::from_text(text)
            .with_language(result.language.or(language))
            .with_segments(segments))
    }

    fn backend(&self) -> TranscriptionBackend {
        TranscriptionBackend::OpenAi
    }
}
