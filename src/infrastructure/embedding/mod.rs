mod fallback_embedder;
mod local_candle_embedder;
mod mock_embedder;

pub use fallback_embedder::{FALLBACK_SENTENCE_MODEL, FallbackEmbedder, PRIMARY_SENTENCE_MODEL};
pub use local_candle_embedder::LocalCandleEmbedder;
pub use mock_embedder::{MockAudioTextEmbedder, MockEmbedder};
