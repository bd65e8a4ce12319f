// JSON report adapter - Machine-readable batch report written at the end

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Serialize)]
struct JobEntry {
    name: String,
    input: PathBuf,
    elapsed_secs: f64,
    #[serde(flatten)]
    result: JobResult,
}

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    total: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    interrupted: bool,
    elapsed_secs: f64,
    failures: &'a [FailureRecord],
    jobs: &'a [JobEntry],
}

/// Collects job results and writes them as one JSON document
#[derive(Debug)]
pub struct JsonReportAdapter {
    path: PathBuf,
    jobs: Mutex<Vec<JobEntry>>,
}

impl JsonReportAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            jobs: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the summary plus every job seen so far
    pub fn render(&self, summary: &BatchSummary) -> serde_json::Result<String> {
        let jobs = self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let document = ReportDocument {
            generated_at: Utc::now(),
            total: summary.total,
            succeeded: summary.succeeded,
            skipped: summary.skipped,
            failed: summary.failed,
            interrupted: summary.interrupted,
            elapsed_secs: summary.elapsed.as_secs_f64(),
            failures: &summary.failures,
            jobs: &jobs,
        };
        serde_json::to_string_pretty(&document)
    }
}

impl ReportPort for JsonReportAdapter {
    fn job_finished(&self, _completed: usize, _total: usize, report: &JobReport) {
        let mut jobs = self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        jobs.push(JobEntry {
            name: report.name.clone(),
            input: report.input_path.clone(),
            elapsed_secs: report.elapsed.as_secs_f64(),
            result: report.result.clone(),
        });
    }

    fn batch_finished(&self, summary: &BatchSummary) {
        let written = self
            .render(summary)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&self.path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => info!("Report written to {}", self.path.display()),
            Err(e) => warn!("Could not write report {}: {}", self.path.display(), e),
        }
    }
}
