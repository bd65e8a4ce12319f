//! FFprobe adapter for media file probing
//!
//! This module reads video dimensions, frame rate and duration by running
//! `ffprobe` and parsing its JSON output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`)
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    /// e.g. "30/1" or "24000/1001"
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FFprobeAdapter {
    binary: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Parse a rational like "30000/1001"; zero denominators yield `None`
    fn parse_rate(rate: &str) -> Option<f64> {
        match rate.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().ok()?;
                let den: f64 = den.trim().parse().ok()?;
                if den == 0.0 {
                    None
                } else {
                    Some(num / den)
                }
            }
            None => rate.trim().parse().ok(),
        }
    }

    /// Extract metadata from ffprobe's JSON document
    fn parse_output(json: &str) -> Result<VideoMetadata, DomainError> {
        let output: FfprobeOutput = serde_json::from_str(json)
            .map_err(|e| DomainError::ProbeFail(format!("unreadable ffprobe output: {}", e)))?;

        let stream = output
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| DomainError::ProbeFail("no video stream".to_string()))?;

        let fps = stream
            .avg_frame_rate
            .as_deref()
            .and_then(Self::parse_rate)
            .filter(|fps| *fps > 0.0)
            .or_else(|| stream.r_frame_rate.as_deref().and_then(Self::parse_rate))
            .unwrap_or(0.0);

        let duration = stream
            .duration
            .as_deref()
            .or_else(|| output.format.as_ref().and_then(|f| f.duration.as_deref()))
            .and_then(|d| d.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        Ok(VideoMetadata {
            width: stream.width.unwrap_or(0),
            height: stream.height.unwrap_or(0),
            fps,
            duration,
        })
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_metadata(&self, file_path: &Path) -> Result<VideoMetadata, DomainError> {
        debug!("Probing {}", file_path.display());

        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(file_path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProbeFail(format!("could not run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::ProbeFail(
                stderr
                    .lines()
                    .last()
                    .unwrap_or("ffprobe exited unsuccessfully")
                    .trim()
                    .to_string(),
            ));
        }

        Self::parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(FFprobeAdapter::parse_rate("30/1"), Some(30.0));
        assert!((FFprobeAdapter::parse_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(FFprobeAdapter::parse_rate("0/0"), None);
        assert_eq!(FFprobeAdapter::parse_rate("25"), Some(25.0));
    }

    #[test]
    fn test_parse_output_picks_first_video_stream() {
        let json = r#"{
            "streams": [
                {"codec_type": "audio", "duration": "9.5"},
                {"codec_type": "video", "width": 1920, "height": 1080,
                 "avg_frame_rate": "0/0", "r_frame_rate": "24000/1001"}
            ],
            "format": {"duration": "10.0"}
        }"#;
        let meta = FFprobeAdapter::parse_output(json).unwrap();
        assert_eq!((meta.width, meta.height), (1920, 1080));
        assert!((meta.fps - 23.976).abs() < 0.01);
        assert_eq!(meta.duration, 10.0);
    }

    #[test]
    fn test_parse_output_without_video_fails() {
        let json = r#"{"streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            FFprobeAdapter::parse_output(json),
            Err(DomainError::ProbeFail(_))
        ));
        assert!(FFprobeAdapter::parse_output("not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_binary_is_probe_failure() {
        let adapter = FFprobeAdapter::new("/definitely/not/ffprobe");
        let result = adapter.probe_metadata(Path::new("clip.mp4")).await;
        assert!(matches!(result, Err(DomainError::ProbeFail(_))));
    }
}
