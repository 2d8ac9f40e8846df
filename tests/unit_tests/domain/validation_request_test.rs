use voxgate::domain::{MatchKind, TranscriptionBackend};

#[test]
fn given_each_backend_when_checking_remoteness_then_only_local_runs_in_process() {
    assert!(!TranscriptionBackend::Local.is_remote());
    assert!(TranscriptionBackend::OpenAi.is_remote());
    assert!(TranscriptionBackend::Azure.is_remote());
}

#[test]
fn given_backend_names_when_parsing_then_aliases_resolve() {
    assert_eq!("whisper".parse::<TranscriptionBackend>(), Ok(TranscriptionBackend::Local));
    assert_eq!("OpenAI".parse::<TranscriptionBackend>(), Ok(TranscriptionBackend::OpenAi));
    assert!("deepgram".parse::<TranscriptionBackend>().is_err());
}

#[test]
fn given_match_kinds_when_scoring_then_fuzzy_does_not_count() {
    assert!(MatchKind::Perfect.counts_as_match());
    assert!(MatchKind::Phonetic.counts_as_match());
    assert!(!MatchKind::Fuzzy.counts_as_match());
}
