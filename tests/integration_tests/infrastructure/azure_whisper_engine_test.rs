use tempfile::TempDir;

use voxgate::application::ports::{TranscriptionEngine, TranscriptionError};
use voxgate::infrastructure::audio::AzureWhisperEngine;

use crate::helpers::{start_mock_server, write_silence};

const ROUTE: &str = "/openai/deployments/my-deployment/audio/transcriptions";

#[tokio::test]
async fn given_valid_audio_when_azure_transcribes_then_returns_text_with_hinted_language() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": "Hello from Azure Whisper"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");
    let engine = AzureWhisperEngine::new(&server.base_url, "my-deployment", "test-key", "2024-06-01");

    let result = engine.transcribe(&path, Some("en")).await.unwrap();

    assert_eq!(result.text, "Hello from Azure Whisper");
    assert_eq!(result.language.as_deref(), Some("en"));
}

#[tokio::test]
async fn given_azure_api_returns_error_status_when_transcribing_then_returns_api_error() {
    let body = r#"{"error": {"code": "InvalidRequest", "message": "bad audio"}}"#;
    let server = start_mock_server(ROUTE, 400, body).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");
    let engine = AzureWhisperEngine::new(&server.base_url, "my-deployment", "test-key", "2024-06-01");

    let result = engine.transcribe(&path, None).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_azure_api_returns_empty_text_when_transcribing_then_returns_empty_result() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": ""}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "silence.wav");
    let engine = AzureWhisperEngine::new(&server.base_url, "my-deployment", "test-key", "2024-06-01");

    let result = engine.transcribe(&path, None).await.unwrap();

    assert_eq!(result.text, "");
}

#[tokio::test]
async fn given_missing_file_when_azure_transcribes_then_decoding_failed() {
    let engine = AzureWhisperEngine::new("http://127.0.0.1:9", "d", "k", "2024-06-01");

    let result = engine
        .transcribe(std::path::Path::new("/no/such/clip.wav"), None)
        .await;

    assert!(matches!(result, Err(TranscriptionError::DecodingFailed(_))));
}

#[tokio::test]
async fn given_underscore_regional_tag_when_azure_transcribes_then_sends_primary_subtag() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": "bonjour"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");
    let engine = AzureWhisperEngine::new(&server.base_url, "my-deployment", "test-key", "2024-06-01");

    let result = engine.transcribe(&path, Some("fr_CA")).await.unwrap();

    assert!(server.last_body().contains("name=\"language\"\r\n\r\nfr\r\n"));
    assert_eq!(result.language.as_deref(), Some("fr"));
}
