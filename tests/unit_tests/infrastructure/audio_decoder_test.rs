use tempfile::TempDir;

use voxgate::application::ports::{AudioDecoder, AudioDecoderError};
use voxgate::infrastructure::audio::{SymphoniaAudioDecoder, WHISPER_SAMPLE_RATE};

use crate::helpers::{build_wav, sine, write_wav};

#[test]
fn given_wav_at_target_rate_when_decoding_then_sample_count_is_preserved() {
    let wav = build_wav(16_000, &sine(16_000, 440.0, 0.1));

    let pcm = SymphoniaAudioDecoder.decode(&wav, WHISPER_SAMPLE_RATE).unwrap();

    assert_eq!(pcm.len(), 1600);
    assert!(pcm.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
fn given_wav_at_44100hz_when_decoding_then_resamples_to_16khz_length() {
    let wav = build_wav(44_100, &sine(44_100, 440.0, 0.5));

    let pcm = SymphoniaAudioDecoder.decode(&wav, WHISPER_SAMPLE_RATE).unwrap();

    assert!((7999..=8000).contains(&pcm.len()), "got {} samples", pcm.len());
}

#[test]
fn given_wav_file_when_decoding_for_quality_model_then_upsamples_to_48khz() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(dir.path(), "clip.wav", 16_000, &sine(16_000, 220.0, 0.25));

    let pcm = SymphoniaAudioDecoder.decode_file(&path, 48_000).unwrap();

    assert_eq!(pcm.len(), 12_000);
}

#[test]
fn given_garbage_bytes_when_decoding_then_decoding_failed() {
    let result = SymphoniaAudioDecoder.decode(b"not audio at all", WHISPER_SAMPLE_RATE);

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}

#[test]
fn given_wav_without_samples_when_decoding_then_decoding_failed() {
    let wav = build_wav(16_000, &[]);

    let result = SymphoniaAudioDecoder.decode(&wav, WHISPER_SAMPLE_RATE);

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}

#[test]
fn given_missing_file_when_decoding_then_io_error() {
    let result = SymphoniaAudioDecoder.decode_file(
        std::path::Path::new("/no/such/audio.wav"),
        WHISPER_SAMPLE_RATE,
    );

    assert!(matches!(result, Err(AudioDecoderError::Io(_))));
}
