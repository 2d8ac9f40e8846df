use voxgate::infrastructure::audio::{CandleWhisperEngine, primary_language_subtag};

#[test]
fn given_size_hint_when_resolving_repo_then_maps_to_openai_whisper_checkpoint() {
    assert_eq!(CandleWhisperEngine::model_repo_for_size("base"), "openai/whisper-base");
    assert_eq!(CandleWhisperEngine::model_repo_for_size("tiny"), "openai/whisper-tiny");
    assert_eq!(CandleWhisperEngine::model_repo_for_size("large"), "openai/whisper-large-v3");
}

#[test]
fn given_empty_hint_when_resolving_repo_then_defaults_to_base() {
    assert_eq!(CandleWhisperEngine::model_repo_for_size(""), "openai/whisper-base");
}

#[test]
fn given_full_repo_id_when_resolving_repo_then_used_verbatim() {
    assert_eq!(
        CandleWhisperEngine::model_repo_for_size("distil-whisper/distil-large-v3"),
        "distil-whisper/distil-large-v3"
    );
}

#[test]
fn given_regional_hint_when_building_language_token_then_primary_subtag_is_used() {
    let code = primary_language_subtag("es-CO").unwrap();

    assert_eq!(format!("<|{}|>", code), "<|es|>");
}
