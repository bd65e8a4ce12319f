//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config_initialization::MAX_WORKERS;

fn parse_workers(value: &str) -> Result<usize, String> {
    clap_num::number_range(value, 1, MAX_WORKERS)
}

/// Arguments for a conversion run
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Video file or directory of videos to convert
    pub input: PathBuf,

    /// Output directory (default: "converted" next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Conversion method [default: letterbox]
    #[arg(short, long, env = "REFRAME_METHOD", value_parser = ["letterbox", "crop", "zoom"])]
    pub method: Option<String>,

    /// Output quality [default: high]
    #[arg(short, long, env = "REFRAME_QUALITY", value_parser = ["low", "medium", "high"])]
    pub quality: Option<String>,

    /// Number of parallel conversions, 1-64 [default: 2]
    #[arg(short, long, env = "REFRAME_WORKERS", value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Skip the video information listing
    #[arg(long)]
    pub skip_info: bool,

    /// Crop window anchor, crop method only [default: center]
    #[arg(long, value_parser = ["center", "left", "right"])]
    pub crop_position: Option<String>,

    /// Zoom canvas width, zoom method only [default: 1080]
    #[arg(long)]
    pub zoom_width: Option<u32>,

    /// Zoom canvas height, zoom method only [default: 1920]
    #[arg(long)]
    pub zoom_height: Option<u32>,

    /// Settings file (default: reframe.toml in the working directory, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the final summary as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// FFmpeg executable [default: ffmpeg]
    #[arg(long, env = "REFRAME_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// FFprobe executable [default: ffprobe]
    #[arg(long, env = "REFRAME_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Per-file encoder time limit in seconds [default: 600]
    #[arg(long, env = "REFRAME_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

/// Arguments controlling diagnostic logging
#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Logging level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log line format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "reframe", "clips", "-o", "out", "-m", "crop", "-q", "medium", "-w", "4",
            "--skip-info", "--crop-position", "left", "--report", "summary.json",
            "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.convert.input, PathBuf::from("clips"));
        assert_eq!(cli.convert.output, Some(PathBuf::from("out")));
        assert_eq!(cli.convert.method.as_deref(), Some("crop"));
        assert_eq!(cli.convert.quality.as_deref(), Some("medium"));
        assert_eq!(cli.convert.workers, Some(4));
        assert!(cli.convert.skip_info);
        assert_eq!(cli.convert.crop_position.as_deref(), Some("left"));
        assert_eq!(cli.convert.report, Some(PathBuf::from("summary.json")));
        assert_eq!(cli.logging.log_format, "json");
        assert_eq!(cli.logging.log_level, "info");
    }

    #[test]
    fn test_workers_range_enforced() {
        assert!(Cli::try_parse_from(["reframe", "clips", "-w", "0"]).is_err());
        assert!(Cli::try_parse_from(["reframe", "clips", "-w", "65"]).is_err());
        assert!(Cli::try_parse_from(["reframe", "clips", "-w", "64"]).is_ok());
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(Cli::try_parse_from(["reframe", "clips", "-m", "stretch"]).is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["reframe"]).is_err());
    }
}
