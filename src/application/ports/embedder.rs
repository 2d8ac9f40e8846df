use async_trait::async_trait;

use crate::domain::Embedding;

/// Multilingual sentence embeddings for meaning comparison.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;
}

/// Joint audio-text embeddings; both sides live in the same vector space.
#[async_trait]
pub trait AudioTextEmbedder: Send + Sync {
    /// Sample rate the audio passed to `embed_audio` must already have.
    fn sample_rate(&self) -> u32;
    async fn embed_audio(&self, samples: &[f32]) -> Result<Embedding, EmbedderError>;
    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
