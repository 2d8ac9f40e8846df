use std::path::Path;

pub trait AudioDecoder: Send + Sync {
    /// Decodes a file to mono `f32` PCM at `target_sample_rate`.
    fn decode_file(&self, path: &Path, target_sample_rate: u32)
    -> Result<Vec<f32>, AudioDecoderError>;

    fn decode(&self, data: &[u8], target_sample_rate: u32) -> Result<Vec<f32>, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("resampling failed: {0}")]
    ResamplingFailed(String),
}
