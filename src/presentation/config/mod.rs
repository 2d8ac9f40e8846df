mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, MetadataSettings, QualitySettings, Settings, SimilaritySettings,
    TranscriptionSettings,
};
