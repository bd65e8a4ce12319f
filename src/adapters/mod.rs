// Adapters - External system implementations

use std::sync::Arc;

use crate::domain::model::{BatchSummary, JobReport};
use crate::ports::ReportPort;

pub mod console_report;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod json_report;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use console_report::ConsoleReporter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use json_report::JsonReportAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::TomlConfigAdapter;

/// Forwards every report to each inner reporter in order
#[derive(Default)]
pub struct ReportFanout {
    reporters: Vec<Arc<dyn ReportPort>>,
}

impl ReportFanout {
    pub fn new(reporters: Vec<Arc<dyn ReportPort>>) -> Self {
        Self { reporters }
    }
}

impl ReportPort for ReportFanout {
    fn job_finished(&self, completed: usize, total: usize, report: &JobReport) {
        for reporter in &self.reporters {
            reporter.job_finished(completed, total, report);
        }
    }

    fn batch_finished(&self, summary: &BatchSummary) {
        for reporter in &self.reporters {
            reporter.batch_finished(summary);
        }
    }
}
