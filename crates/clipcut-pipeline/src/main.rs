//! ClipCut pipeline binary.
//!
//! Usage: `clipcut <video-path>`. Configuration comes from `CLIPCUT_*`
//! environment variables; the run outcome is printed as JSON on stdout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipcut_pipeline::{ClipPipeline, LoggingObserver, PipelineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let video_path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => bail!("usage: clipcut <video-path>"),
    };
    if !video_path.exists() {
        bail!("video file not found: {}", video_path.display());
    }

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let pipeline = ClipPipeline::with_defaults(config);
    let outcome = pipeline.process_video(&video_path, &LoggingObserver).await;

    let body = serde_json::to_string_pretty(&outcome).context("serializing run outcome")?;
    println!("{body}");

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clipcut=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
