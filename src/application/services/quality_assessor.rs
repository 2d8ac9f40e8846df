use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::{AudioDecoder, AudioDecoderError, AudioTextEmbedder, EmbedderError};
use crate::domain::{Embedding, QualityAssessment};

pub const QUALITY_PROMPTS: [&str; 3] = [
    "the sound is clear and clean",
    "the audio has good quality",
    "the speech is natural and fluent",
];

pub const NOISE_PROMPTS: [&str; 3] = [
    "the sound is noisy and distorted",
    "the audio has poor quality",
    "the speech sounds robotic and unnatural",
];

struct PromptEmbeddings {
    quality: Vec<Embedding>,
    noise: Vec<Embedding>,
}

/// Scores how clean a clip sounds by comparing it with descriptions of good and bad audio.
pub struct QualityAssessor {
    embedder: Arc<dyn AudioTextEmbedder>,
    decoder: Arc<dyn AudioDecoder>,
    prompts: OnceCell<PromptEmbeddings>,
}

impl QualityAssessor {
    pub fn new(embedder: Arc<dyn AudioTextEmbedder>, decoder: Arc<dyn AudioDecoder>) -> Self {
        Self {
            embedder,
            decoder,
            prompts: OnceCell::new(),
        }
    }

    pub async fn assess(&self, audio_path: &Path) -> Result<QualityAssessment, QualityError> {
        let samples = self
            .decoder
            .decode_file(audio_path, self.embedder.sample_rate())?;
        self.assess_samples(&samples).await
    }

    /// Same as [`assess`](Self::assess) but degrades to `None` on any failure.
    pub async fn try_assess(&self, audio_path: &Path) -> Option<QualityAssessment> {
        match self.assess(audio_path).await {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                tracing::warn!(
                    audio_path = %audio_path.display(),
                    error = %e,
                    "Quality assessment unavailable"
                );
                None
            }
        }
    }

    pub async fn assess_samples(&self, samples: &[f32]) -> Result<QualityAssessment, QualityError> {
        let prompts = self
            .prompts
            .get_or_try_init(|| self.embed_prompts())
            .await?;
        let audio = self.embedder.embed_audio(samples).await?;

        let quality_score = audio
            .mean_similarity(&prompts.quality)
            .ok_or(QualityError::MissingPromptEmbeddings)?;
        let noise_score = audio
            .mean_similarity(&prompts.noise)
            .ok_or(QualityError::MissingPromptEmbeddings)?;

        let assessment = QualityAssessment::from_scores(quality_score, noise_score);
        tracing::debug!(
            quality = assessment.quality_score,
            noise = assessment.noise_score,
            confidence = assessment.quality_confidence,
            "Audio quality assessed"
        );
        Ok(assessment)
    }

    async fn embed_prompts(&self) -> Result<PromptEmbeddings, QualityError> {
        let quality = self.embedder.embed_texts(&QUALITY_PROMPTS).await?;
        let noise = self.embedder.embed_texts(&NOISE_PROMPTS).await?;
        if quality.len() != QUALITY_PROMPTS.len() || noise.len() != NOISE_PROMPTS.len() {
            return Err(QualityError::MissingPromptEmbeddings);
        }
        Ok(PromptEmbeddings { quality, noise })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    #[error("audio: {0}")]
    Audio(#[from] AudioDecoderError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("prompt embeddings incomplete")]
    MissingPromptEmbeddings,
}
