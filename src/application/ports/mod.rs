mod audio_decoder;
mod embedder;
mod expected_text_resolver;
mod transcription_engine;

pub use audio_decoder::{AudioDecoder, AudioDecoderError};
pub use embedder::{AudioTextEmbedder, Embedder, EmbedderError};
pub use expected_text_resolver::{ExpectedTextError, ExpectedTextResolver};
pub use transcription_engine::{
    TranscriptionEngine, TranscriptionEngineProvider, TranscriptionError,
};
