//! Configuration initialization and hierarchy management

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::app::batch_interactor::{BatchRequest, DEFAULT_WORKERS};
use crate::app::convert_interactor::{ConversionSettings, DEFAULT_ENCODE_TIMEOUT};
use crate::cli::args::ConvertArgs;
use crate::domain::model::*;
use crate::domain::rules::RetryPolicy;
use crate::error::{ReframeError, ReframeResult};
use crate::utils::path::PathUtils;

/// Upper bound on concurrent encoders
pub const MAX_WORKERS: usize = 64;

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub conversion: ConversionSettings,
    pub workers: usize,
    pub skip_info: bool,
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub encode_timeout: Duration,
    pub max_attempts: u32,
    pub report: Option<PathBuf>,
}

impl Settings {
    pub fn batch_request(&self) -> BatchRequest {
        BatchRequest {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            settings: self.conversion,
            workers: self.workers,
        }
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults.
///
/// Environment variables reach this point already folded into `args` by clap.
pub fn initialize_configuration_hierarchy(args: &ConvertArgs) -> ReframeResult<Settings> {
    info!("Initializing configuration hierarchy");
    let file = TomlConfigAdapter::discover(args.config.as_deref()).map_err(|e| {
        ReframeError::Config {
            message: e.to_string(),
        }
    })?;
    let settings = resolve_settings(args, &file)?;

    let cpus = num_cpus::get();
    if settings.workers > cpus {
        warn!(
            "{} workers requested but only {} logical CPUs available",
            settings.workers, cpus
        );
    }
    info!("Configuration resolved: {:?}", settings);
    Ok(settings)
}

/// Merge command-line values over file values over defaults
pub fn resolve_settings(args: &ConvertArgs, file: &FileConfig) -> ReframeResult<Settings> {
    let config_error = |message: String| ReframeError::Config { message };

    let workers = args.workers.or(file.workers).unwrap_or(DEFAULT_WORKERS);
    if !(1..=MAX_WORKERS).contains(&workers) {
        return Err(config_error(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, workers
        )));
    }

    let quality = match args.quality.as_deref().or(file.quality.as_deref()) {
        Some(value) => QualityLevel::parse(value).map_err(|e| config_error(e.to_string()))?,
        None => QualityLevel::default(),
    };

    let position = match args.crop_position.as_deref().or(file.crop_position.as_deref()) {
        Some(value) => CropPosition::parse(value).map_err(|e| config_error(e.to_string()))?,
        None => CropPosition::default(),
    };
    let zoom_width = args.zoom_width.or(file.zoom_width).unwrap_or(DEFAULT_ZOOM_WIDTH);
    let zoom_height = args.zoom_height.or(file.zoom_height).unwrap_or(DEFAULT_ZOOM_HEIGHT);

    let method_name = args
        .method
        .as_deref()
        .or(file.method.as_deref())
        .unwrap_or("letterbox");
    let method = ConversionMethod::parse(method_name, position, zoom_width, zoom_height)
        .map_err(|e| config_error(e.to_string()))?;

    match method {
        ConversionMethod::Zoom { width, height } => {
            if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
                return Err(config_error(format!(
                    "zoom target must be positive and even, got {}x{}",
                    width, height
                )));
            }
        }
        _ if args.zoom_width.is_some() || args.zoom_height.is_some() => {
            warn!("--zoom-width/--zoom-height only apply to the zoom method; ignoring");
        }
        _ => {}
    }
    if args.crop_position.is_some() && !matches!(method, ConversionMethod::Crop { .. }) {
        warn!("--crop-position only applies to the crop method; ignoring");
    }

    let timeout_secs = args
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_ENCODE_TIMEOUT.as_secs());
    if timeout_secs == 0 {
        return Err(config_error("timeout_secs must be at least 1".to_string()));
    }

    let max_attempts = file
        .max_attempts
        .unwrap_or(RetryPolicy::default().max_attempts);
    if max_attempts == 0 {
        return Err(config_error("max_attempts must be at least 1".to_string()));
    }

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathUtils::default_output_dir(&args.input));

    Ok(Settings {
        input: args.input.clone(),
        output_dir,
        conversion: ConversionSettings { method, quality },
        workers,
        skip_info: args.skip_info,
        ffmpeg: args
            .ffmpeg
            .clone()
            .or_else(|| file.ffmpeg.clone())
            .unwrap_or_else(|| PathBuf::from("ffmpeg")),
        ffprobe: args
            .ffprobe
            .clone()
            .or_else(|| file.ffprobe.clone())
            .unwrap_or_else(|| PathBuf::from("ffprobe")),
        encode_timeout: Duration::from_secs(timeout_secs),
        max_attempts,
        report: args.report.clone(),
    })
}
