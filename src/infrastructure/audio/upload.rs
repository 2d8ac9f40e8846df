use std::path::Path;

use reqwest::multipart;

use crate::application::ports::TranscriptionError;

/// Reads an audio file into a multipart part named and typed after its extension.
pub(super) async fn audio_file_part(audio_path: &Path) -> Result<multipart::Part, TranscriptionError> {
    let data = tokio::fs::read(audio_path)
        .await
        .map_err(|e| TranscriptionError::DecodingFailed(format!("read {}: {}", audio_path.display(), e)))?;

    let extension = audio_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "wav".to_string());
    let mime = mime_for_extension(&extension)?;

    multipart::Part::bytes(data)
        .file_name(format!("audio.{}", extension))
        .mime_str(mime)
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))
}

fn mime_for_extension(extension: &str) -> Result<&'static str, TranscriptionError> {
    match extension {
        "wav" => Ok("audio/wav"),
        "mp3" => Ok("audio/mpeg"),
        "m4a" | "mp4" => Ok("audio/mp4"),
        "ogg" | "oga" => Ok("audio/ogg"),
        "flac" => Ok("audio/flac"),
        "webm" => Ok("audio/webm"),
        other => Err(TranscriptionError::UnsupportedFormat(other.to_string())),
    }
}
