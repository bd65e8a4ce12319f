// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Default zoom canvas width (portrait 1080p)
pub const DEFAULT_ZOOM_WIDTH: u32 = 1080;
/// Default zoom canvas height (portrait 1080p)
pub const DEFAULT_ZOOM_HEIGHT: u32 = 1920;

/// A discovered input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDescriptor {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl VideoDescriptor {
    /// Build a descriptor from a path and its byte size
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { path, name, size }
    }

    /// Size in mebibytes, for display
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// Probe result for a single file
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub duration: f64,
}

impl VideoMetadata {
    /// Width over height; zero when height is unknown
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// Common name for well-known landscape resolutions
    pub fn resolution_name(&self) -> &'static str {
        match (self.width, self.height) {
            (1280, 720) => "720p",
            (1920, 1080) => "1080p",
            (2560, 1440) => "2K",
            (3840, 2160) => "4K",
            _ => "Custom",
        }
    }
}

/// Horizontal anchor for the crop window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CropPosition {
    #[default]
    Center,
    Left,
    Right,
}

impl CropPosition {
    /// Parse crop position from string
    pub fn parse(position: &str) -> Result<Self, DomainError> {
        match position.trim().to_lowercase().as_str() {
            "center" | "centre" => Ok(CropPosition::Center),
            "left" => Ok(CropPosition::Left),
            "right" => Ok(CropPosition::Right),
            _ => Err(DomainError::BadArgs(format!(
                "crop position must be 'center', 'left', or 'right', got '{}'",
                position
            ))),
        }
    }
}

impl fmt::Display for CropPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropPosition::Center => write!(f, "center"),
            CropPosition::Left => write!(f, "left"),
            CropPosition::Right => write!(f, "right"),
        }
    }
}

/// Strategy for turning a landscape frame into a portrait one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum ConversionMethod {
    /// Pad top and bottom with black
    #[default]
    Letterbox,
    /// Cut the sides away
    Crop { position: CropPosition },
    /// Scale to cover the target canvas, then centre-crop
    Zoom { width: u32, height: u32 },
}

impl ConversionMethod {
    /// Parse a method name, using the given crop position and zoom target where relevant
    pub fn parse(
        method: &str,
        position: CropPosition,
        zoom_width: u32,
        zoom_height: u32,
    ) -> Result<Self, DomainError> {
        match method.trim().to_lowercase().as_str() {
            "letterbox" | "pad" => Ok(ConversionMethod::Letterbox),
            "crop" => Ok(ConversionMethod::Crop { position }),
            "zoom" => Ok(ConversionMethod::Zoom {
                width: zoom_width,
                height: zoom_height,
            }),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid conversion method: {}. Valid methods: letterbox, crop, zoom",
                method
            ))),
        }
    }

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            ConversionMethod::Letterbox => "letterbox",
            ConversionMethod::Crop { .. } => "crop",
            ConversionMethod::Zoom { .. } => "zoom",
        }
    }
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMethod::Letterbox => write!(f, "LETTERBOX"),
            ConversionMethod::Crop { position } => write!(f, "CROP ({})", position),
            ConversionMethod::Zoom { width, height } => write!(f, "ZOOM ({}x{})", width, height),
        }
    }
}

/// Output quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityLevel {
    /// Parse quality level from string
    pub fn parse(quality: &str) -> Result<Self, DomainError> {
        match quality.trim().to_lowercase().as_str() {
            "low" => Ok(QualityLevel::Low),
            "medium" => Ok(QualityLevel::Medium),
            "high" => Ok(QualityLevel::High),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid quality level: {}. Valid levels: low, medium, high",
                quality
            ))),
        }
    }

    /// Constant rate factor handed to the encoder
    pub fn crf(&self) -> u8 {
        match self {
            QualityLevel::Low => 28,
            QualityLevel::Medium => 23,
            QualityLevel::High => 18,
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityLevel::Low => write!(f, "LOW"),
            QualityLevel::Medium => write!(f, "MEDIUM"),
            QualityLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Where the source lands on the output canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Source padded onto a larger canvas
    Pad { left: u32, top: u32, bottom: u32 },
    /// Window cut out of the source
    Crop { x: u32, y: u32 },
    /// Source scaled, then a window cut out of the scaled frame
    ScaleCrop {
        scaled_width: u32,
        scaled_height: u32,
        x: u32,
        y: u32,
    },
}

/// Output frame size plus the filter that produces it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGeometry {
    pub width: u32,
    pub height: u32,
    pub placement: Placement,
    pub filter: String,
}

/// Parameters for one encoder invocation
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub filter: String,
    pub crf: u8,
    pub video_codec: String,
    pub preset: String,
    pub pixel_format: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub sample_rate: u32,
    pub fast_start: bool,
    pub max_muxing_queue_size: u32,
}

impl EncodeRequest {
    /// Standard H.264/AAC request for the given geometry
    pub fn new(
        input_path: &Path,
        output_path: &Path,
        geometry: &OutputGeometry,
        quality: QualityLevel,
    ) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            filter: geometry.filter.clone(),
            crf: quality.crf(),
            video_codec: "libx264".to_string(),
            preset: "fast".to_string(),
            pixel_format: "yuv420p".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
            sample_rate: 48_000,
            fast_start: true,
            max_muxing_queue_size: 9999,
        }
    }
}

/// What came back from the encoder process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodeOutcome {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Tail of the encoder's stderr, for humans only
    pub diagnostics: String,
}

impl EncodeOutcome {
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Terminal state of one conversion job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobResult {
    Success { output_path: PathBuf },
    Skipped { existing_output_path: PathBuf },
    Failed { reason: String, attempts: u32 },
}

/// A job result tagged with the input it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub name: String,
    pub input_path: PathBuf,
    pub result: JobResult,
    pub elapsed: Duration,
}

/// One failed input and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub name: String,
    pub reason: String,
}

/// Aggregate outcome of a batch run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
    pub elapsed: Duration,
    pub interrupted: bool,
}

impl BatchSummary {
    /// Empty summary expecting `total` jobs
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Fold one finished job into the counters
    pub fn record(&mut self, report: &JobReport) {
        match &report.result {
            JobResult::Success { .. } => self.succeeded += 1,
            JobResult::Skipped { .. } => self.skipped += 1,
            JobResult::Failed { reason, .. } => {
                self.failed += 1;
                self.failures.push(FailureRecord {
                    name: report.name.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }

    /// Number of jobs that have reported so far
    pub fn completed(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    /// Seal the summary once every job has reported
    pub fn finalize(mut self, elapsed: Duration, interrupted: bool) -> Self {
        self.elapsed = elapsed;
        self.interrupted = interrupted;
        self
    }

    /// Skipped jobs count as success
    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.interrupted
    }

    /// Process exit status for scripting
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests;
