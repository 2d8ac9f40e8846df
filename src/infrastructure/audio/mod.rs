pub mod audio_decoder;
mod azure_whisper_engine;
mod candle_whisper_engine;
mod language;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;
mod upload;

pub use audio_decoder::{SymphoniaAudioDecoder, WHISPER_SAMPLE_RATE};
pub use azure_whisper_engine::AzureWhisperEngine;
pub use candle_whisper_engine::CandleWhisperEngine;
pub use language::primary_language_subtag;
pub use mock_transcription_engine::{MockTranscriptionEngine, StaticEngineProvider};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::{
    CachingTranscriptionEngineProvider, RemoteEngineSettings, TranscriptionEngineFactory,
};
