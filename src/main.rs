use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use voxgate::application::services::{
    QualityAssessor, SimilarityEngine, ValidationService, to_batch_entry,
};
use voxgate::domain::{BatchEntry, BatchSummary};
use voxgate::infrastructure::audio::{CachingTranscriptionEngineProvider, SymphoniaAudioDecoder};
use voxgate::infrastructure::embedding::FallbackEmbedder;
use voxgate::infrastructure::metadata::TagExpectedTextResolver;
use voxgate::infrastructure::observability::{TracingConfig, init_tracing};
use voxgate::infrastructure::quality::ClapOnnxEmbedder;
use voxgate::presentation::{BatchManifest, Environment, Settings};

fn build_service(settings: &Settings) -> ValidationService {
    let engines = Arc::new(CachingTranscriptionEngineProvider::new(
        settings.transcription.remote_engine_settings(),
    ));

    let mut similarity = SimilarityEngine::new(settings.similarity.text_metrics(), None);
    if settings.similarity.semantic {
        similarity = similarity.with_embedder(Arc::new(FallbackEmbedder::new(
            settings.similarity.primary_model.clone(),
            settings.similarity.fallback_model.clone(),
        )));
    }

    let mut service = ValidationService::new(engines, similarity);
    if settings.quality.enabled {
        service = service.with_quality_assessor(QualityAssessor::new(
            Arc::new(ClapOnnxEmbedder::new(settings.quality.model_id.clone())),
            Arc::new(SymphoniaAudioDecoder),
        ));
    }
    if settings.metadata.read_tags {
        service = service.with_expected_text_resolver(Arc::new(TagExpectedTextResolver));
    }
    service
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(TracingConfig::from_env().with_json_override(settings.logging.enable_json));

    let manifest_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: voxgate <manifest.json>")?;
    let base_dir = manifest_path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let manifest = BatchManifest::from_path(&manifest_path)?;
    let requests = manifest.into_requests(&settings, &base_dir);

    tracing::info!(
        manifest = %manifest_path.display(),
        items = requests.len(),
        backend = %settings.transcription.backend,
        model_size = %settings.transcription.model_size,
        "Starting batch validation"
    );

    let service = build_service(&settings);
    let outcomes = service
        .validate_many_with_progress(&requests, |index, total, outcome| {
            tracing::info!(
                item = index + 1,
                total = total,
                ok = outcome.is_ok(),
                "Batch progress"
            );
        })
        .await;

    let entries: Vec<BatchEntry> = requests
        .iter()
        .zip(&outcomes)
        .map(|(request, outcome)| to_batch_entry(request, outcome))
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);

    let summary = BatchSummary::from_entries(&entries);
    tracing::info!(
        total = summary.total,
        passed = summary.passed,
        needs_review = summary.needs_review,
        errored = summary.errored,
        pass_rate = summary.pass_rate(),
        mean_word_level_similarity = ?summary.mean_word_level_similarity,
        "Batch validation finished"
    );

    Ok(())
}
