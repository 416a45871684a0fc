//! Room Decorator - command-line driver
//!
//! Runs one decoration request end to end against the configured backend.
//!
//! # Execution Flow
//!
//! 1. Load `Decorator Config.yaml` from `Decorator Data/` (defaults if missing)
//! 2. Initialize logging → `<Log Dir>/roomdecor.<date>`
//! 3. Create a tokio runtime for the generation call
//! 4. Build the configured [`GenerationClient`] (simulated or HTTP)
//! 5. Fill the request fields from the command line and submit
//! 6. Wait for the job, select the highest-confidence variant and export it
//! 7. Log the metrics summary and shut the runtime down

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use roomdecor::logging::{self, LogOptions};
use roomdecor::models::{BackendKind, DecoratorSettings};
use roomdecor::services::{
    ExportSink, FileExporter, GenerationClient, HttpGenerationClient, SimulatedBackend,
};
use roomdecor::{
    APP_NAME, ConfigManager, ImageData, Orchestrator, Phase, ResultSet, VERSION,
};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Generate decoration variants for a room photo")]
struct Cli {
    /// Photo of the room (JPEG, PNG or WebP)
    image: Utf8PathBuf,

    /// Design style, e.g. Finnish, Swedish, Arabic, Russian, American, Modern
    style: String,

    /// Room type, e.g. "Living Room"
    #[arg(long)]
    room: Option<String>,

    /// Color preference, e.g. Warm
    #[arg(long)]
    color: Option<String>,

    /// Allow the backend to replace existing furniture
    #[arg(long)]
    replace_furniture: bool,

    /// Directory holding `Decorator Config.yaml`
    #[arg(long, default_value = "Decorator Data")]
    config_dir: Utf8PathBuf,

    /// Override the configured export directory
    #[arg(long)]
    export_dir: Option<Utf8PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let config = config_manager.load_config()?;
    let settings = config.settings;

    let _guard = logging::init(&LogOptions::from_settings(&settings, true))?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("roomdecor-worker")
        .build()?;

    let client = build_client(&settings)?;
    let orchestrator = Orchestrator::new(client, runtime.handle().clone());

    let bytes =
        fs::read(&cli.image).with_context(|| format!("Failed to read image: {}", cli.image))?;
    orchestrator.set_image(ImageData::new(bytes, media_type_for(&cli.image)));
    orchestrator.set_design_style(cli.style);
    if let Some(room) = cli.room {
        orchestrator.set_room_type(room);
    }
    if let Some(color) = cli.color {
        orchestrator.set_color_preference(color);
    }
    orchestrator.set_preserve_existing_furniture(!cli.replace_furniture);

    let submission = orchestrator.submit().context("Request is incomplete")?;
    runtime
        .block_on(submission.handle)
        .context("Generation task did not finish")?;

    let view = orchestrator.view();
    let outcome = match (view.phase, view.results) {
        (Phase::Ready, Some(results)) => {
            tracing::info!("{}", results.analysis());
            for variant in results.variants() {
                tracing::info!(
                    "{} ({:.0}%): {}",
                    variant.id,
                    variant.confidence_score * 100.0,
                    variant.description
                );
            }

            let export_dir = cli
                .export_dir
                .unwrap_or_else(|| Utf8PathBuf::from(&settings.export_dir));
            export_best(&orchestrator, &results, &export_dir)
        }
        (phase, _) => Err(anyhow!(
            "Generation did not succeed ({}): {}",
            phase,
            view.error_message.as_deref().unwrap_or("no details")
        )),
    };

    orchestrator.metrics().log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Shutdown complete");
    outcome
}

fn build_client(settings: &DecoratorSettings) -> Result<Arc<dyn GenerationClient>> {
    let client: Arc<dyn GenerationClient> = match settings.backend {
        BackendKind::Simulated => {
            tracing::info!(
                "Using simulated backend: {} variants, {}ms delay",
                settings.effective_variant_count(),
                settings.simulated_delay_ms
            );
            Arc::new(SimulatedBackend::from_settings(settings))
        }
        BackendKind::Http => {
            let client = HttpGenerationClient::from_settings(settings)?;
            tracing::info!("Using HTTP backend at {}", client.endpoint());
            Arc::new(client)
        }
    };
    Ok(client)
}

/// Select the highest-confidence variant and write it into `export_dir`
fn export_best(
    orchestrator: &Orchestrator,
    results: &ResultSet,
    export_dir: &Utf8Path,
) -> Result<()> {
    let best = results.best();
    orchestrator.select(&best.id)?;
    let descriptor = orchestrator.export_selected()?;

    let path = FileExporter::new(export_dir).materialize(&descriptor)?;
    tracing::info!("Exported {} to {}", best.id, path);
    Ok(())
}

fn media_type_for(path: &Utf8Path) -> &'static str {
    match path.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
