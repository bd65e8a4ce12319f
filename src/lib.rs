//! Reframe batch converter library
//!
//! Converts 16:9 landscape videos to 9:16 portrait by letterboxing,
//! cropping or zooming, driving an external FFmpeg per file from a bounded
//! worker pool.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{BatchSummary, ConversionMethod, JobReport, JobResult, QualityLevel};
pub use error::{ReframeError, ReframeResult};
