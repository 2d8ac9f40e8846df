use std::sync::Arc;

use tempfile::TempDir;

use voxgate::application::services::{SimilarityEngine, ValidationService, to_batch_entry};
use voxgate::domain::{BatchSummary, TranscriptionBackend, ValidationLevel, ValidationRequest};
use voxgate::infrastructure::audio::{CachingTranscriptionEngineProvider, RemoteEngineSettings};
use voxgate::infrastructure::metadata::TagExpectedTextResolver;

use crate::helpers::{start_mock_server, write_silence};

#[tokio::test]
async fn given_remote_backend_when_validating_batch_then_reports_and_summary_reflect_outcomes() {
    let server = start_mock_server(
        "/audio/transcriptions",
        200,
        r#"{"text": "The weather is lovely today.", "language": "english"}"#,
    )
    .await;
    let dir = TempDir::new().unwrap();
    let matching = write_silence(dir.path(), "matching.wav");
    let different = write_silence(dir.path(), "different.wav");
    let provider = CachingTranscriptionEngineProvider::new(RemoteEngineSettings {
        api_key: Some("sk-test".to_string()),
        base_url: Some(server.base_url.clone()),
        ..Default::default()
    });
    let service = ValidationService::new(Arc::new(provider), SimilarityEngine::lexical())
        .with_expected_text_resolver(Arc::new(TagExpectedTextResolver));
    let requests: Vec<ValidationRequest> = [
        (matching.clone(), "the weather is lovely today"),
        (different.clone(), "please close the door behind you"),
        (dir.path().join("missing.wav"), "anything"),
    ]
    .into_iter()
    .map(|(path, text)| {
        ValidationRequest::new(path)
            .with_expected_text(text)
            .with_backend(TranscriptionBackend::OpenAi)
    })
    .collect();

    let outcomes = service.validate_many(&requests).await;
    let entries: Vec<_> = requests
        .iter()
        .zip(&outcomes)
        .map(|(request, outcome)| to_batch_entry(request, outcome))
        .collect();
    let summary = BatchSummary::from_entries(&entries);

    let first = entries[0].report().unwrap();
    assert_eq!(first.backend, "openai");
    assert_eq!(first.model_size, None);
    assert_eq!(first.language.as_deref(), Some("english"));
    assert_eq!(first.enhanced_validation.word_level_similarity, 1.0);
    assert_eq!(
        entries[1].report().unwrap().enhanced_validation.validation_level,
        ValidationLevel::NeedsReview
    );
    assert!(entries[2].report().is_none());
    assert_eq!(summary.total, 3);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.needs_review, 1);
}
