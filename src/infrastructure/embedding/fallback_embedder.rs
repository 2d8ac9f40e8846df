use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

use super::local_candle_embedder::LocalCandleEmbedder;

pub const PRIMARY_SENTENCE_MODEL: &str =
    "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";
pub const FALLBACK_SENTENCE_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

type EmbedderLoader = Box<dyn Fn(&str) -> Result<Arc<dyn Embedder>, EmbedderError> + Send + Sync>;

/// Loads the first model that works, in order, on first use and keeps it.
///
/// If none load, every call fails with `ModelLoadFailed` without retrying the load.
pub struct FallbackEmbedder {
    model_ids: Vec<String>,
    loader: EmbedderLoader,
    loaded: OnceLock<Option<Arc<dyn Embedder>>>,
}

impl FallbackEmbedder {
    pub fn new(primary: impl Into<String>, fallback: Option<String>) -> Self {
        Self::with_loader(primary, fallback, |model_id| {
            let embedder = LocalCandleEmbedder::new(model_id)?;
            Ok(Arc::new(embedder) as Arc<dyn Embedder>)
        })
    }

    pub fn with_loader<F>(primary: impl Into<String>, fallback: Option<String>, loader: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn Embedder>, EmbedderError> + Send + Sync + 'static,
    {
        let mut model_ids = vec![primary.into()];
        model_ids.extend(fallback);
        Self {
            model_ids,
            loader: Box::new(loader),
            loaded: OnceLock::new(),
        }
    }

    fn resolve(&self) -> Result<&Arc<dyn Embedder>, EmbedderError> {
        self.loaded
            .get_or_init(|| {
                for model_id in &self.model_ids {
                    match (self.loader)(model_id) {
                        Ok(embedder) => {
                            tracing::info!(model = %model_id, "Sentence embedding model ready");
                            return Some(embedder);
                        }
                        Err(e) => {
                            tracing::warn!(model = %model_id, error = %e, "Sentence embedding model unavailable")
                        }
                    }
                }
                tracing::error!(models = ?self.model_ids, "No sentence embedding model could be loaded");
                None
            })
            .as_ref()
            .ok_or_else(|| {
                EmbedderError::ModelLoadFailed(format!(
                    "none of {} could be loaded",
                    self.model_ids.join(", ")
                ))
            })
    }
}

#[async_trait]
impl Embedder for FallbackEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.resolve()?.embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        self.resolve()?.embed_batch(texts).await
    }
}
