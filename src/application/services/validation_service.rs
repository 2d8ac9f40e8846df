use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{
    ExpectedTextResolver, TranscriptionEngineProvider, TranscriptionError,
};
use crate::domain::{
    BatchEntry, ValidationReport, ValidationRequest, ValidationResult, ValidationVerdict,
};

use super::quality_assessor::QualityAssessor;
use super::similarity::SimilarityEngine;

/// Runs one validation end to end: expected text, transcription, comparison, quality, verdict.
///
/// Engines and models are owned by the injected collaborators and reused across calls.
pub struct ValidationService {
    engines: Arc<dyn TranscriptionEngineProvider>,
    similarity: SimilarityEngine,
    quality: Option<QualityAssessor>,
    resolver: Option<Arc<dyn ExpectedTextResolver>>,
}

impl ValidationService {
    pub fn new(engines: Arc<dyn TranscriptionEngineProvider>, similarity: SimilarityEngine) -> Self {
        Self {
            engines,
            similarity,
            quality: None,
            resolver: None,
        }
    }

    pub fn with_quality_assessor(mut self, assessor: QualityAssessor) -> Self {
        self.quality = Some(assessor);
        self
    }

    pub fn with_expected_text_resolver(mut self, resolver: Arc<dyn ExpectedTextResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, ValidationError> {
        let audio_path = request.audio_path();
        if !audio_path.is_file() {
            return Err(ValidationError::AudioNotFound(audio_path.to_path_buf()));
        }

        let expected_text = self.resolve_expected_text(request);
        if expected_text.is_empty() {
            tracing::warn!(
                audio_path = %audio_path.display(),
                "No expected text found, similarity will be near zero"
            );
        }

        let engine = self.engines.engine(request.backend, &request.model_size)?;
        let transcription = engine
            .transcribe(audio_path, request.language.as_deref())
            .await?;

        tracing::debug!(
            audio_path = %audio_path.display(),
            backend = %request.backend,
            chars = transcription.text.len(),
            language = ?transcription.language,
            "Transcription received"
        );

        let metrics = self
            .similarity
            .compare(&expected_text, &transcription.text)
            .await;

        let quality = match (&self.quality, request.quality_check) {
            (Some(assessor), true) => assessor.try_assess(audio_path).await,
            _ => None,
        };

        let verdict = ValidationVerdict::from_metrics(&metrics);

        tracing::info!(
            audio_path = %audio_path.display(),
            word_level_similarity = metrics.word_level_similarity,
            word_error_rate = ?metrics.word_error_rate,
            level = %verdict.level,
            passed = verdict.passed,
            "Validation completed"
        );

        Ok(ValidationResult {
            audio_path: audio_path.to_path_buf(),
            language: transcription.language.or_else(|| request.language.clone()),
            backend: request.backend,
            model_size: (!request.backend.is_remote()).then(|| request.model_size.clone()),
            expected_text,
            transcribed_text: transcription.text,
            confidence: transcription.confidence,
            metrics,
            quality,
            verdict,
        })
    }

    /// Validates each request in order; a failing file never stops the rest.
    pub async fn validate_many(
        &self,
        requests: &[ValidationRequest],
    ) -> Vec<Result<ValidationResult, ValidationError>> {
        self.validate_many_with_progress(requests, |_, _, _| {})
            .await
    }

    /// Like [`validate_many`](Self::validate_many), calling `on_progress(index, total, outcome)`
    /// after every item.
    pub async fn validate_many_with_progress<F>(
        &self,
        requests: &[ValidationRequest],
        mut on_progress: F,
    ) -> Vec<Result<ValidationResult, ValidationError>>
    where
        F: FnMut(usize, usize, &Result<ValidationResult, ValidationError>),
    {
        let total = requests.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, request) in requests.iter().enumerate() {
            let outcome = self.validate(request).await;
            if let Err(e) = &outcome {
                tracing::error!(
                    audio_path = %request.audio_path.display(),
                    index = index,
                    error = %e,
                    "Validation failed for batch item"
                );
            }
            on_progress(index, total, &outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    fn resolve_expected_text(&self, request: &ValidationRequest) -> String {
        if let Some(text) = request.explicit_expected_text() {
            return text.to_string();
        }

        let Some(resolver) = &self.resolver else {
            return String::new();
        };

        match resolver.resolve(
            request.audio_path(),
            request.preferred_metadata_key.as_deref(),
        ) {
            Ok(Some(text)) => text,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(
                    audio_path = %request.audio_path.display(),
                    error = %e,
                    "Expected text lookup failed"
                );
                String::new()
            }
        }
    }
}

/// Turns a batch outcome into the record reporting layers consume.
pub fn to_batch_entry(
    request: &ValidationRequest,
    outcome: &Result<ValidationResult, ValidationError>,
) -> BatchEntry {
    match outcome {
        Ok(result) => BatchEntry::Completed(ValidationReport::from(result)),
        Err(e) => BatchEntry::Failed {
            audio_path: request.audio_path.display().to_string(),
            error: e.to_string(),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("audio file not found: {}", .0.display())]
    AudioNotFound(PathBuf),
    #[error("configuration: {0}")]
    Configuration(TranscriptionError),
    #[error("backend request: {0}")]
    Backend(TranscriptionError),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
}

impl From<TranscriptionError> for ValidationError {
    fn from(error: TranscriptionError) -> Self {
        match error {
            TranscriptionError::ModelLoadFailed(_) => ValidationError::Configuration(error),
            TranscriptionError::ApiRequestFailed(_) => ValidationError::Backend(error),
            _ => ValidationError::Transcription(error),
        }
    }
}
