use std::path::Path;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{AudioDecoder, TranscriptionEngine, TranscriptionError};
use crate::domain::{TranscriptSegment, TranscriptionBackend, TranscriptionResult};

use super::audio_decoder::{SymphoniaAudioDecoder, WHISPER_SAMPLE_RATE};
use super::language::primary_language_subtag;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;
const WINDOW_SECS: f32 = 30.0;

const LANGUAGES: [&str; 100] = [
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", "pl", "ca", "nl", "ar", "sv",
    "it", "id", "hi", "fi", "vi", "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no",
    "th", "ur", "hr", "bg", "lt", "la", "mi", "ml", "cy", "sk", "te", "fa", "lv", "bn", "sr",
    "az", "sl", "kn", "et", "mk", "br", "eu", "is", "hy", "ne", "mn", "bs", "kk", "sq", "sw",
    "gl", "mr", "pa", "si", "km", "sn", "yo", "so", "af", "oc", "ka", "be", "tg", "sd", "gu",
    "am", "yi", "lo", "uz", "fo", "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl",
    "mg", "as", "tt", "haw", "ln", "ha", "ba", "jw", "su", "yue",
];

/// Local Whisper inference through Candle with greedy, temperature-0 decoding.
///
/// No timestamps and no conditioning on previously decoded text, so the same
/// audio and weights always produce the same transcription.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    decoder: SymphoniaAudioDecoder,
    model_id: String,
}

impl CandleWhisperEngine {
    pub fn new(model_size: &str) -> Result<Self, TranscriptionError> {
        let device = Self::select_device();
        let model_id = Self::model_repo_for_size(model_size);

        tracing::info!(
            device = ?device,
            model = %model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.clone(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mel_filters_file = match config.num_mel_bins {
            128 => "melfilters128.bytes",
            _ => "melfilters.bytes",
        };
        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_bytes_path = mel_repo.get(mel_filters_file).map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("{}: {}", mel_filters_file, e))
        })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = %model_id, "Candle Whisper engine loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
            decoder: SymphoniaAudioDecoder,
            model_id,
        })
    }

    /// Maps a size hint such as `base` or `large-v3` to its HF hub repository.
    /// Anything containing a `/` is taken as a repository id already.
    pub fn model_repo_for_size(model_size: &str) -> String {
        let size = model_size.trim().to_lowercase();
        if size.contains('/') {
            return model_size.trim().to_string();
        }
        match size.as_str() {
            "" => "openai/whisper-base".to_string(),
            "large" => "openai/whisper-large-v3".to_string(),
            other => format!("openai/whisper-{}", other),
        }
    }

    fn select_device() -> Device {
        match Device::cuda_if_available(0) {
            Ok(device) if device.is_cuda() => device,
            _ => Device::new_metal(0).unwrap_or(Device::Cpu),
        }
    }

    fn language_token(&self, language: Option<&str>) -> Option<u32> {
        let code = language?;
        let token = self.tokenizer.token_to_id(&format!("<|{}|>", code));
        if token.is_none() {
            tracing::warn!(language = code, model = %self.model_id, "Language not supported by model, decoding without it");
        }
        token
    }

    fn mel_windows(&self, pcm: &[f32]) -> Result<Vec<Tensor>, TranscriptionError> {
        let chunk_samples = m::N_SAMPLES;
        let mut windows = Vec::new();

        for chunk in pcm.chunks(chunk_samples) {
            let samples = if chunk.len() < chunk_samples {
                let mut padded = chunk.to_vec();
                padded.resize(chunk_samples, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;

            let mel_tensor = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e))
                })?;
            windows.push(mel_tensor);
        }

        Ok(windows)
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language_hint: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let pcm = self
            .decoder
            .decode_file(audio_path, WHISPER_SAMPLE_RATE)
            .map_err(|e| TranscriptionError::DecodingFailed(e.to_string()))?;
        let duration_secs = pcm.len() as f32 / WHISPER_SAMPLE_RATE as f32;
        let windows = self.mel_windows(&pcm)?;

        let mut model = self.model.lock().await;

        let mut language = language_hint.and_then(primary_language_subtag);
        let mut language_token = None;

        let mut segments = Vec::new();
        let mut log_probs = Vec::new();

        for (i, mel) in windows.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio window");
            let audio_features = encode_window(&mut model, mel)?;

            if i == 0 {
                if language.is_none() {
                    language =
                        detect_language(&mut model, &self.tokenizer, &self.device, &audio_features)?;
                }
                language_token = self.language_token(language.as_deref());
            }

            let decoded = decode_window(
                &mut model,
                &self.tokenizer,
                &self.device,
                &audio_features,
                language_token,
            )?;
            log_probs.extend(decoded.token_log_probs);
            if !decoded.text.is_empty() {
                let start_secs = i as f32 * WINDOW_SECS;
                segments.push(TranscriptSegment {
                    start_secs,
                    end_secs: (start_secs + WINDOW_SECS).min(duration_secs),
                    text: decoded.text,
                });
            }
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let confidence = (!log_probs.is_empty())
            .then(|| (log_probs.iter().sum::<f32>() / log_probs.len() as f32).exp());

        tracing::info!(
            segments = segments.len(),
            chars = text.len(),
            language = ?language,
            "Audio transcription completed"
        );

        Ok(TranscriptionResult::from_text(text)
            .with_language(language)
            .with_segments(segments)
            .with_confidence(confidence))
    }

    fn backend(&self) -> TranscriptionBackend {
        TranscriptionBackend::Local
    }
}

struct DecodedWindow {
    text: String,
    token_log_probs: Vec<f32>,
}

fn decode_window(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    audio_features: &Tensor,
    language_token: Option<u32>,
) -> Result<DecodedWindow, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;

    let mut tokens = vec![sot_token];
    tokens.extend(language_token);
    tokens.push(transcribe_token);
    tokens.push(no_timestamps_token);
    let prompt_len = tokens.len();

    let mut token_log_probs = Vec::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let last_logits = next_token_logits(
            model,
            device,
            &tokens,
            audio_features,
            tokens.len() == prompt_len,
        )?;

        let next_token = last_logits
            .argmax(0)
            .map_err(failed)?
            .to_scalar::<u32>()
            .map_err(failed)?;

        let log_prob = candle_nn::ops::log_softmax(&last_logits, 0)
            .and_then(|lp| lp.get(next_token as usize))
            .and_then(|lp| lp.to_scalar::<f32>())
            .map_err(failed)?;

        if next_token == eot_token {
            break;
        }

        tokens.push(next_token);
        token_log_probs.push(log_prob);
    }

    model.reset_kv_cache();

    let text = tokenizer
        .decode(&tokens[prompt_len..], true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;

    Ok(DecodedWindow {
        text: text.trim().to_string(),
        token_log_probs,
    })
}

fn encode_window(
    model: &mut m::model::Whisper,
    mel: &Tensor,
) -> Result<Tensor, TranscriptionError> {
    model
        .encoder
        .forward(mel, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))
}

/// Picks the most likely language token after start-of-transcript.
/// English-only checkpoints have no language tokens and yield `None`.
fn detect_language(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    audio_features: &Tensor,
) -> Result<Option<String>, TranscriptionError> {
    let candidates: Vec<(&str, u32)> = LANGUAGES
        .iter()
        .filter_map(|code| {
            tokenizer
                .token_to_id(&format!("<|{}|>", code))
                .map(|id| (*code, id))
        })
        .collect();
    if candidates.is_empty() {
        return Ok(None);
    }

    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let logits = next_token_logits(model, device, &[sot_token], audio_features, true)?
        .to_vec1::<f32>()
        .map_err(failed)?;
    model.reset_kv_cache();

    let detected = candidates
        .into_iter()
        .filter_map(|(code, id)| logits.get(id as usize).map(|logit| (code, *logit)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(code, _)| code.to_string());

    tracing::debug!(language = ?detected, "Detected spoken language");
    Ok(detected)
}

fn next_token_logits(
    model: &mut m::model::Whisper,
    device: &Device,
    tokens: &[u32],
    audio_features: &Tensor,
    flush: bool,
) -> Result<Tensor, TranscriptionError> {
    let token_tensor = Tensor::new(tokens, device)
        .map_err(failed)?
        .unsqueeze(0)
        .map_err(failed)?;

    let decoder_output = model
        .decoder
        .forward(&token_tensor, audio_features, flush)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

    let logits = model
        .decoder
        .final_linear(&decoder_output.squeeze(0).map_err(failed)?)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

    let seq_len = logits.dim(0).map_err(failed)?;
    logits.get(seq_len - 1).map_err(failed)
}

fn failed(e: candle_core::Error) -> TranscriptionError {
    TranscriptionError::TranscriptionFailed(e.to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
