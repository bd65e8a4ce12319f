//! Command implementations

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::inspect_interactor::InspectInteractor;
use crate::cli::args::ConvertArgs;
use crate::config_initialization::{initialize_configuration_hierarchy, Settings};
use crate::domain::errors::DomainError;

const RULE_WIDTH: usize = 80;

/// Run a conversion batch, returning the process exit status
pub async fn convert(args: ConvertArgs, cancel: CancellationToken) -> Result<i32> {
    let settings =
        initialize_configuration_hierarchy(&args).context("Invalid configuration")?;
    let container = DefaultAppContainer::new(&settings);
    let batch = container.batch_interactor();

    let videos = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(interrupted()),
        videos = batch.discover(&settings.input, &settings.output_dir) => videos?,
    };

    if !settings.skip_info {
        let entries = match container.inspect_interactor().inspect_all(&videos, &cancel).await {
            Ok(entries) => entries,
            Err(DomainError::Cancelled) => return Ok(interrupted()),
            Err(e) => return Err(e.into()),
        };
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("VIDEO INFORMATION");
        println!("{}", "=".repeat(RULE_WIDTH));
        for entry in &entries {
            for line in InspectInteractor::format_entry(entry) {
                println!("{}", line);
            }
        }
        println!();
    }

    if cancel.is_cancelled() {
        return Ok(interrupted());
    }

    for line in settings_banner(&settings, videos.len()) {
        println!("{}", line);
    }

    let summary = batch
        .run_discovered(videos, &settings.batch_request(), cancel)
        .await?;

    info!("Exit status {}", summary.exit_code());
    Ok(summary.exit_code())
}

/// Exit status for a run stopped before any conversion started
fn interrupted() -> i32 {
    warn!("Interrupted before conversion started");
    1
}

/// Lines describing the run before it starts
pub fn settings_banner(settings: &Settings, total: usize) -> Vec<String> {
    let quality = settings.conversion.quality;
    vec![
        "=".repeat(RULE_WIDTH),
        format!("Converting {} video(s)", total),
        format!("Method: {}", settings.conversion.method),
        format!("Quality: {} (CRF {})", quality, quality.crf()),
        format!("Workers: {}", settings.workers),
        format!("Output: {}", settings.output_dir.display()),
        "=".repeat(RULE_WIDTH),
    ]
}
