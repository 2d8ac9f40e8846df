use async_trait::async_trait;

use crate::application::ports::{AudioTextEmbedder, Embedder, EmbedderError};
use crate::domain::Embedding;

const LETTER_DIMENSIONS: usize = 36;

/// Character-frequency embeddings: identical texts score 1, disjoint alphabets score 0.
pub struct MockEmbedder;

fn letter_histogram(text: &str) -> Embedding {
    let mut values = vec![0.0f32; LETTER_DIMENSIONS];
    for ch in text.to_lowercase().chars() {
        let slot = match ch {
            'a'..='z' => Some(ch as usize - 'a' as usize),
            '0'..='9' => Some(26 + ch as usize - '0' as usize),
            _ => None,
        };
        if let Some(slot) = slot {
            values[slot] += 1.0;
        }
    }
    Embedding::new(values)
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        Ok(letter_histogram(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|t| letter_histogram(t)).collect())
    }
}

/// Maps audio to a fixed vector and prompts to their histogram, for wiring tests.
pub struct MockAudioTextEmbedder {
    audio_embedding: Embedding,
    sample_rate: u32,
}

impl MockAudioTextEmbedder {
    pub fn new(audio_embedding: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            audio_embedding: Embedding::new(audio_embedding),
            sample_rate,
        }
    }

    /// An audio embedding that reads like the given description.
    pub fn sounding_like(description: &str, sample_rate: u32) -> Self {
        Self {
            audio_embedding: letter_histogram(description),
            sample_rate,
        }
    }
}

#[async_trait]
impl AudioTextEmbedder for MockAudioTextEmbedder {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    async fn embed_audio(&self, samples: &[f32]) -> Result<Embedding, EmbedderError> {
        if samples.is_empty() {
            return Err(EmbedderError::InferenceFailed("no samples".to_string()));
        }
        Ok(self.audio_embedding.clone())
    }

    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|t| letter_histogram(t)).collect())
    }
}
