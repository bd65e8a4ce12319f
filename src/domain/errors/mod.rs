// Domain errors - Error types for the domain layer

use std::fmt;
use std::time::Duration;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Input file missing
    FileNotFound(String),
    /// Input file has zero length
    EmptyInput(String),
    /// Width or height unusable for the requested geometry
    InvalidDimensions { width: u32, height: u32 },
    /// Metadata probe failed
    ProbeFail(String),
    /// Encoder could not be launched
    EncoderLaunch(String),
    /// Encoder ran but did not produce a usable output
    EncoderFailed { exit_code: Option<i32> },
    /// Encoder exceeded its wall-clock budget
    Timeout(Duration),
    /// Operator aborted the batch
    Cancelled,
    /// Filesystem operation failed
    FsFail(String),
}

impl DomainError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::ProbeFail(_)
                | DomainError::EncoderLaunch(_)
                | DomainError::EncoderFailed { .. }
                | DomainError::Timeout(_)
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(_) => write!(f, "Input file not found"),
            DomainError::EmptyInput(_) => write!(f, "Input file is empty"),
            DomainError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {}x{}", width, height)
            }
            DomainError::ProbeFail(msg) => write!(f, "Failed to read dimensions: {}", msg),
            DomainError::EncoderLaunch(msg) => write!(f, "Failed to launch encoder: {}", msg),
            DomainError::EncoderFailed { exit_code } => match exit_code {
                Some(code) => write!(f, "FFmpeg process failed (exit code: {})", code),
                None => write!(f, "FFmpeg process failed (exit code: signal)"),
            },
            DomainError::Timeout(limit) => {
                let secs = limit.as_secs();
                if secs >= 60 && secs % 60 == 0 {
                    write!(f, "Conversion timeout (>{} minutes)", secs / 60)
                } else {
                    write!(f, "Conversion timeout (>{:.1} seconds)", limit.as_secs_f64())
                }
            }
            DomainError::Cancelled => write!(f, "Interrupted"),
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
