use std::path::Path;

/// Finds the text an audio file was supposed to speak, usually from embedded tags.
pub trait ExpectedTextResolver: Send + Sync {
    fn resolve(
        &self,
        audio_path: &Path,
        preferred_key: Option<&str>,
    ) -> Result<Option<String>, ExpectedTextError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExpectedTextError {
    #[error("failed to open audio file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read metadata: {0}")]
    MetadataUnreadable(String),
}
