use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use ndarray::{Array2, Array4};
use ort::session::Session;
use ort::value::Value;
use tokenizers::{PaddingParams, Tokenizer};

use crate::application::ports::{AudioTextEmbedder, EmbedderError};
use crate::domain::Embedding;

use super::clap_features::{CLAP_SAMPLE_RATE, log_mel_features, mel_filterbank};

pub const DEFAULT_CLAP_REPO: &str = "Xenova/clap-htsat-unfused";
const AUDIO_MODEL_FILE: &str = "onnx/audio_model.onnx";
const TEXT_MODEL_FILE: &str = "onnx/text_model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

struct ClapModels {
    audio: Mutex<Session>,
    text: Mutex<Session>,
    tokenizer: Tokenizer,
    mel_filters: Array2<f32>,
}

/// CLAP audio and text towers exported to ONNX.
///
/// Sessions load on first use. A load failure is remembered and returned on every later
/// call so a broken model directory is not re-downloaded per clip.
pub struct ClapOnnxEmbedder {
    repo_id: String,
    models: OnceLock<Result<ClapModels, String>>,
}

impl ClapOnnxEmbedder {
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            models: OnceLock::new(),
        }
    }

    fn models(&self) -> Result<&ClapModels, EmbedderError> {
        self.models
            .get_or_init(|| {
                tracing::info!(repo = %self.repo_id, "Loading CLAP audio-text model");
                load_models(&self.repo_id).map_err(|e| {
                    tracing::error!(repo = %self.repo_id, error = %e, "CLAP model failed to load");
                    e.to_string()
                })
            })
            .as_ref()
            .map_err(|e| EmbedderError::ModelLoadFailed(e.clone()))
    }
}

fn load_models(repo_id: &str) -> Result<ClapModels, EmbedderError> {
    let api = Api::new().map_err(|e| EmbedderError::ModelLoadFailed(e.to_string()))?;
    let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));
    let fetch = |file: &str| -> Result<PathBuf, EmbedderError> {
        repo.get(file)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("{file}: {e}")))
    };

    let audio = open_session(fetch(AUDIO_MODEL_FILE)?)?;
    let text = open_session(fetch(TEXT_MODEL_FILE)?)?;

    let mut tokenizer = Tokenizer::from_file(fetch(TOKENIZER_FILE)?)
        .map_err(|e| EmbedderError::ModelLoadFailed(format!("tokenizer: {e}")))?;
    tokenizer.with_padding(Some(PaddingParams::default()));

    tracing::info!(repo = repo_id, "CLAP audio-text model loaded");

    Ok(ClapModels {
        audio: Mutex::new(audio),
        text: Mutex::new(text),
        tokenizer,
        mel_filters: mel_filterbank(),
    })
}

fn open_session(path: PathBuf) -> Result<Session, EmbedderError> {
    let load_failed =
        |e: &dyn std::fmt::Display| EmbedderError::ModelLoadFailed(format!("{}: {e}", path.display()));
    let builder = Session::builder().map_err(|e| load_failed(&e))?;
    let builder = builder.with_intra_threads(4).map_err(|e| load_failed(&e))?;
    builder.commit_from_file(&path).map_err(|e| load_failed(&e))
}

fn inference(e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

fn rows_to_embeddings(dims: &[i64], data: &[f32], expected_rows: usize) -> Result<Vec<Embedding>, EmbedderError> {
    let width = dims.last().copied().unwrap_or(0) as usize;
    if width == 0 || data.len() != width * expected_rows {
        return Err(EmbedderError::InvalidResponse(format!(
            "unexpected embedding shape {dims:?} for {expected_rows} inputs"
        )));
    }
    Ok(data
        .chunks(width)
        .map(|row| Embedding::new(row.to_vec()))
        .collect())
}

impl ClapModels {
    fn embed_audio(&self, samples: &[f32]) -> Result<Embedding, EmbedderError> {
        let features: Array4<f32> = log_mel_features(samples, &self.mel_filters);
        let input = Value::from_array(features).map_err(inference)?;

        let mut session = self
            .audio
            .lock()
            .map_err(|_| inference("audio session lock poisoned"))?;
        let outputs = session
            .run(ort::inputs!["input_features" => input])
            .map_err(inference)?;
        let (shape, data) = outputs["audio_embeds"]
            .try_extract_tensor::<f32>()
            .map_err(inference)?;

        rows_to_embeddings(shape.as_ref(), data, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedderError::InvalidResponse("no audio embedding".to_string()))
    }

    fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| inference(format!("tokenization: {e}")))?;
        let seq_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);

        let mut ids = Array2::<i64>::zeros((texts.len(), seq_len));
        let mut mask = Array2::<i64>::zeros((texts.len(), seq_len));
        for (row, encoding) in encodings.iter().enumerate() {
            for (col, (&id, &attend)) in encoding
                .get_ids()
                .iter()
                .zip(encoding.get_attention_mask())
                .enumerate()
            {
                ids[[row, col]] = id as i64;
                mask[[row, col]] = attend as i64;
            }
        }

        let ids = Value::from_array(ids).map_err(inference)?;
        let mask = Value::from_array(mask).map_err(inference)?;

        let mut session = self
            .text
            .lock()
            .map_err(|_| inference("text session lock poisoned"))?;
        let outputs = session
            .run(ort::inputs!["input_ids" => ids, "attention_mask" => mask])
            .map_err(inference)?;
        let (shape, data) = outputs["text_embeds"]
            .try_extract_tensor::<f32>()
            .map_err(inference)?;

        rows_to_embeddings(shape.as_ref(), data, texts.len())
    }
}

#[async_trait]
impl AudioTextEmbedder for ClapOnnxEmbedder {
    fn sample_rate(&self) -> u32 {
        CLAP_SAMPLE_RATE
    }

    async fn embed_audio(&self, samples: &[f32]) -> Result<Embedding, EmbedderError> {
        if samples.is_empty() {
            return Err(EmbedderError::InferenceFailed("no audio samples".to_string()));
        }
        self.models()?.embed_audio(samples)
    }

    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.models()?.embed_texts(texts)
    }
}
