//! Imagetale - turn an image into a short narrated story.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod domain;
mod error;
mod model;
mod output;
mod pipeline;
mod ports;
mod stages;

use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::domain::{ImageReference, StoryOutcome};
use crate::error::StoryError;
use crate::output::{new_request_id, persist_upload, resolve_audio_path, validate_request_id};
use crate::pipeline::Orchestrator;
use crate::stages::PipelineSettings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "imagetale=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), StoryError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StoryError::Config)?;

    let timeout_secs = cli.timeout.unwrap_or(config.defaults.timeout_secs);
    if timeout_secs == 0 {
        return Err(StoryError::InvalidArgument("Timeout must be at least 1 second".into()));
    }
    let timeout = Duration::from_secs(timeout_secs);

    let settings = PipelineSettings::resolve(
        &config,
        cli.caption_model.as_deref(),
        cli.story_model.as_deref(),
        cli.speech_model.as_deref(),
    );
    tracing::info!(
        caption_model = %settings.caption_model,
        story_model = %settings.story_model,
        speech_model = %settings.speech_model,
        timeout_secs,
        "models resolved"
    );

    // Per-request output location
    let output_dir =
        cli.output_dir.clone().unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));
    let request_id = match cli.request_id.clone() {
        Some(id) => {
            validate_request_id(&id)?;
            id
        }
        None => new_request_id(),
    };
    let audio_path = resolve_audio_path(cli.output.as_deref(), &output_dir, &request_id);
    tracing::info!(request_id = %request_id, audio_path = %audio_path.display(), "request started");

    let image = if cli.image.as_os_str() == "-" {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        ImageReference::Bytes(data)
    } else {
        ImageReference::from_path(&cli.image)
    };
    if cli.keep_image {
        let kept = persist_upload(&image.read()?, &output_dir, &request_id)?;
        eprintln!("Kept image: {}", kept.display());
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("IMAGETALE_REPLAY").ok();
    let is_recording = std::env::var("IMAGETALE_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config, timeout)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config, timeout)?, None)
    };

    let orchestrator = Arc::new(Orchestrator::new(&ctx, &settings));
    drop(ctx);

    let result =
        orchestrator.run_guarded(image, audio_path, interrupted(tokio::signal::ctrl_c())).await;

    // Finish recording if active; failed runs are worth keeping too.
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    let outcome = result?;
    print_outcome(&outcome, cli.json)?;
    eprintln!("Saved: {}", outcome.audio_path().display());
    Ok(())
}

/// Resolve once `signal` reports an interrupt. If the handler could not be
/// installed, never resolve: the run goes on without Ctrl-C support.
async fn interrupted(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::warn!("interrupted, cancelling the run"),
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

fn print_outcome(outcome: &StoryOutcome, json: bool) -> Result<(), StoryError> {
    if json {
        let rendered = serde_json::to_string_pretty(outcome)
            .map_err(|e| StoryError::Pipeline(format!("Failed to render result: {e}")))?;
        println!("{rendered}");
    } else {
        println!("Generated image scenario:\n  {}\n", outcome.caption);
        println!("Generated short story:\n  {}", outcome.story);
    }
    Ok(())
}
