use tempfile::TempDir;

use voxgate::application::ports::{TranscriptionEngine, TranscriptionError};
use voxgate::infrastructure::audio::OpenAiWhisperEngine;

use crate::helpers::{start_mock_server, write_silence};

const ROUTE: &str = "/audio/transcriptions";

fn engine(base_url: &str) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new("sk-test".to_string(), Some(base_url.to_string()), None)
}

#[tokio::test]
async fn given_verbose_response_when_transcribing_then_returns_text_language_and_segments() {
    let body = r#"{
        "text": " Hola mundo ",
        "language": "spanish",
        "segments": [{"start": 0.0, "end": 1.5, "text": " Hola mundo"}]
    }"#;
    let server = start_mock_server(ROUTE, 200, body).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");

    let result = engine(&server.base_url)
        .transcribe(&path, Some("es"))
        .await
        .unwrap();

    assert_eq!(result.text, "Hola mundo");
    assert_eq!(result.language.as_deref(), Some("spanish"));
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].text, "Hola mundo");
    assert_eq!(result.confidence, None);
}

#[tokio::test]
async fn given_language_hint_when_transcribing_then_request_is_deterministic_verbose_json() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": "hi"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");

    engine(&server.base_url)
        .transcribe(&path, Some("de"))
        .await
        .unwrap();

    let sent = server.last_body();
    assert!(sent.contains("verbose_json"));
    assert!(sent.contains("name=\"temperature\""));
    assert!(sent.contains("name=\"language\""));
    assert!(sent.contains("whisper-1"));
}

#[tokio::test]
async fn given_response_without_language_when_transcribing_then_hint_is_reported() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": "hallo"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");

    let result = engine(&server.base_url)
        .transcribe(&path, Some("de"))
        .await
        .unwrap();

    assert_eq!(result.language.as_deref(), Some("de"));
}

#[tokio::test]
async fn given_empty_text_when_transcribing_then_returns_empty_result_not_error() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": ""}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "silence.wav");

    let result = engine(&server.base_url).transcribe(&path, None).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_api_request_failed() {
    let server = start_mock_server(ROUTE, 401, r#"{"error": "bad key"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");

    let result = engine(&server.base_url).transcribe(&path, None).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(msg)) if msg.contains("401")));
}

#[tokio::test]
async fn given_unreachable_server_when_transcribing_then_api_request_failed() {
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");

    let result = engine("http://127.0.0.1:9").transcribe(&path, None).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_unknown_extension_when_transcribing_then_unsupported_format() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": "hi"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello").unwrap();

    let result = engine(&server.base_url).transcribe(&path, None).await;

    assert!(matches!(result, Err(TranscriptionError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn given_regional_language_tag_when_transcribing_then_sends_and_reports_primary_subtag() {
    let server = start_mock_server(ROUTE, 200, r#"{"text": "hola"}"#).await;
    let dir = TempDir::new().unwrap();
    let path = write_silence(dir.path(), "clip.wav");

    let result = engine(&server.base_url)
        .transcribe(&path, Some("es-CO"))
        .await
        .unwrap();

    let sent = server.last_body();
    assert!(sent.contains("name=\"language\"\r\n\r\nes\r\n"));
    assert!(!sent.contains("es-CO"));
    assert_eq!(result.language.as_deref(), Some("es"));
}
