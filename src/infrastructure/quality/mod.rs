mod clap_features;
mod clap_onnx_embedder;

pub use clap_features::{CLAP_SAMPLE_RATE, fit_to_clip, log_mel_features, mel_filterbank};
pub use clap_onnx_embedder::{ClapOnnxEmbedder, DEFAULT_CLAP_REPO};
