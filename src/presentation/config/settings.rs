use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::similarity::{
    Bleu, FuzzyRatio, Rouge1, RougeL, TextMetric, TokenSortRatio, WordErrorRate,
};
use crate::domain::{DEFAULT_MODEL_SIZE, TranscriptionBackend};
use crate::infrastructure::audio::RemoteEngineSettings;
use crate::infrastructure::embedding::{FALLBACK_SENTENCE_MODEL, PRIMARY_SENTENCE_MODEL};
use crate::infrastructure::quality::DEFAULT_CLAP_REPO;

use super::Environment;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub transcription: TranscriptionSettings,
    pub similarity: SimilaritySettings,
    pub quality: QualitySettings,
    pub metadata: MetadataSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub backend: TranscriptionBackend,
    pub model_size: String,
    pub language: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub remote_model: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimilaritySettings {
    pub semantic: bool,
    pub primary_model: String,
    pub fallback_model: Option<String>,
    pub fuzzy: bool,
    pub rouge: bool,
    pub bleu: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QualitySettings {
    pub enabled: bool,
    pub model_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub read_tags: bool,
    pub preferred_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Overrides `LOG_FORMAT` when set.
    pub enable_json: Option<bool>,
}

impl Settings {
    /// `appsettings.{environment}` (optional) overlaid with `APP__SECTION__KEY` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());
        Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            backend: TranscriptionBackend::Local,
            model_size: DEFAULT_MODEL_SIZE.to_string(),
            language: None,
            api_key: None,
            base_url: None,
            remote_model: None,
            azure_deployment: None,
            azure_api_version: None,
        }
    }
}

impl TranscriptionSettings {
    pub fn remote_engine_settings(&self) -> RemoteEngineSettings {
        RemoteEngineSettings {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            remote_model: self.remote_model.clone(),
            azure_deployment: self.azure_deployment.clone(),
            azure_api_version: self.azure_api_version.clone(),
        }
    }
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            semantic: true,
            primary_model: PRIMARY_SENTENCE_MODEL.to_string(),
            fallback_model: Some(FALLBACK_SENTENCE_MODEL.to_string()),
            fuzzy: true,
            rouge: true,
            bleu: true,
        }
    }
}

impl SimilaritySettings {
    /// Word error rate is always on; the verdict cannot be reached without it.
    pub fn text_metrics(&self) -> Vec<Box<dyn TextMetric>> {
        let mut metrics: Vec<Box<dyn TextMetric>> = vec![Box::new(WordErrorRate)];
        if self.fuzzy {
            metrics.push(Box::new(FuzzyRatio));
            metrics.push(Box::new(TokenSortRatio));
        }
        if self.rouge {
            metrics.push(Box::new(Rouge1));
            metrics.push(Box::new(RougeL));
        }
        if self.bleu {
            metrics.push(Box::new(Bleu));
        }
        metrics
    }
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model_id: DEFAULT_CLAP_REPO.to_string(),
        }
    }
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            read_tags: true,
            preferred_key: None,
        }
    }
}
