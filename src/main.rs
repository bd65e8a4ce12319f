//! Reframe CLI
//!
//! Batch-converts 16:9 landscape videos to 9:16 portrait for short-form
//! social media.
//!
//! # Features
//!
//! - Letterbox, crop and zoom conversion methods
//! - Parallel conversions on a bounded worker pool
//! - Re-runs skip files that were already converted
//! - Per-file retry and timeout, Ctrl-C cleans up partial outputs
//!
//! # Usage
//!
//! ```bash
//! reframe ./videos
//! reframe ./videos -m crop --crop-position left -q medium -w 4
//! reframe clip.mov -m zoom -o ./portrait --report summary.json
//! ```

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use reframe_cli::cli::{args::LoggingArgs, commands, Cli};

/// Logs go to stderr so they never interleave with the report on stdout
fn init_tracing(logging: &LoggingArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.log_level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Main entry point for the Reframe CLI application
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.logging);

    info!("Starting Reframe");

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping conversions");
            interrupt.cancel();
        }
    });

    let code = match commands::convert(cli.convert, cancel).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    };

    info!("Reframe finished");
    std::process::exit(code);
}
