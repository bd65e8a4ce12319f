//! Error handling module for Reframe

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors that abort a whole batch before any job is scheduled
#[derive(Error, Debug)]
pub enum ReframeError {
    /// Input path does not exist
    #[error("Input path does not exist: {path}")]
    InputNotFound { path: PathBuf },

    /// Discovery found nothing to convert
    #[error("No video files found in {path} (looked for .mp4, .mov, .mkv, .avi)")]
    NoVideosFound { path: PathBuf },

    /// Encoder executable missing or broken
    #[error("FFmpeg not available: {message}. Visit https://ffmpeg.org/download.html")]
    EncoderUnavailable { message: String },

    /// Output directory could not be created
    #[error("Cannot create output directory {path}: {message}")]
    OutputDirectory { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Any other domain failure at batch level
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Reframe operations
pub type ReframeResult<T> = std::result::Result<T, ReframeError>;
