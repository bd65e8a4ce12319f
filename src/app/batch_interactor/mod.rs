// Batch interactor - Discovers inputs and drives a bounded worker pool

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::app::convert_interactor::{ConversionJob, ConversionSettings, ConvertInteractor};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::{ReframeError, ReframeResult};
use crate::ports::*;

/// Worker count used when none is configured
pub const DEFAULT_WORKERS: usize = 2;

/// Everything a batch run needs
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub settings: ConversionSettings,
    pub workers: usize,
}

/// Interactor for the batch conversion use case
pub struct BatchInteractor {
    runner: Arc<ConvertInteractor>,
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
    reporter: Arc<dyn ReportPort>,
}

impl BatchInteractor {
    /// Create new batch interactor with injected ports
    pub fn new(
        runner: Arc<ConvertInteractor>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
        reporter: Arc<dyn ReportPort>,
    ) -> Self {
        Self {
            runner,
            encode_port,
            fs_port,
            reporter,
        }
    }

    /// Discover, then convert everything found
    pub async fn run_batch(
        &self,
        request: &BatchRequest,
        cancel: CancellationToken,
    ) -> ReframeResult<BatchSummary> {
        let videos = self.discover(&request.input, &request.output_dir).await?;
        self.run_discovered(videos, request, cancel).await
    }

    /// Video files under `input`, excluding anything already in `output_dir`
    pub async fn discover(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> ReframeResult<Vec<VideoDescriptor>> {
        let videos = self
            .fs_port
            .discover_videos(input, output_dir)
            .await
            .map_err(|e| match e {
                DomainError::FileNotFound(_) => ReframeError::InputNotFound {
                    path: input.to_path_buf(),
                },
                other => ReframeError::Domain(other),
            })?;

        if videos.is_empty() {
            return Err(ReframeError::NoVideosFound {
                path: input.to_path_buf(),
            });
        }
        info!("Found {} video file(s)", videos.len());
        Ok(videos)
    }

    /// Convert an already discovered set of inputs
    pub async fn run_discovered(
        &self,
        videos: Vec<VideoDescriptor>,
        request: &BatchRequest,
        cancel: CancellationToken,
    ) -> ReframeResult<BatchSummary> {
        if videos.is_empty() {
            return Err(ReframeError::NoVideosFound {
                path: request.input.clone(),
            });
        }

        let input_root = tokio::fs::canonicalize(&request.input).await?;

        let version = self
            .encode_port
            .check_available()
            .await
            .map_err(|e| ReframeError::EncoderUnavailable {
                message: e.to_string(),
            })?;
        info!("Using encoder: {}", version);

        self.fs_port
            .create_directory(&request.output_dir)
            .await
            .map_err(|e| ReframeError::OutputDirectory {
                path: request.output_dir.clone(),
                message: e.to_string(),
            })?;

        let jobs = Self::assign_outputs(videos, &input_root, &request.output_dir);
        Ok(self.schedule(jobs, request, cancel).await)
    }

    /// Reserve one output path per input.
    ///
    /// An input whose stem is unique in the batch gets `{stem}_9x16.mp4`.
    /// Inputs sharing a stem are named from their own path relative to
    /// `input_root` plus their extension, never from their position among the
    /// other inputs, so an input added later cannot take over an earlier
    /// input's output.
    pub fn assign_outputs(
        videos: Vec<VideoDescriptor>,
        input_root: &Path,
        output_dir: &Path,
    ) -> Vec<ConversionJob> {
        let mut stem_counts: HashMap<String, usize> = HashMap::new();
        for descriptor in &videos {
            *stem_counts.entry(Self::stem_key(descriptor)).or_insert(0) += 1;
        }

        let mut taken: HashSet<String> = HashSet::new();
        videos
            .into_iter()
            .map(|descriptor| {
                let shared = stem_counts
                    .get(&Self::stem_key(&descriptor))
                    .is_some_and(|count| *count > 1);
                let base = if shared {
                    let relative = descriptor
                        .path
                        .strip_prefix(input_root)
                        .unwrap_or_else(|_| Path::new(&descriptor.name));
                    FilenameSanitizer::qualified_stem(relative)
                } else {
                    FilenameSanitizer::sanitize(&descriptor.name)
                };
                if shared {
                    warn!(
                        "{} shares its name with another input; writing it as {}",
                        descriptor.path.display(),
                        FilenameSanitizer::output_file_name(&base)
                    );
                }

                // Case-insensitive filesystems would merge names differing only in case
                let mut file_name = FilenameSanitizer::output_file_name(&base);
                let mut index = 1;
                while !taken.insert(file_name.to_lowercase()) {
                    index += 1;
                    file_name = FilenameSanitizer::output_file_name(&format!("{}_{}", base, index));
                }

                let output_path = output_dir.join(file_name);
                ConversionJob {
                    descriptor,
                    output_path,
                }
            })
            .collect()
    }

    fn stem_key(descriptor: &VideoDescriptor) -> String {
        FilenameSanitizer::sanitize(&descriptor.name).to_lowercase()
    }

    /// Run jobs on a fixed pool and fold results as they arrive
    async fn schedule(
        &self,
        jobs: Vec<ConversionJob>,
        request: &BatchRequest,
        cancel: CancellationToken,
    ) -> BatchSummary {
        let started = Instant::now();
        let total = jobs.len();
        let workers = request.workers.clamp(1, total.max(1));
        info!(
            "Converting {} file(s) with {} worker(s), method {}, quality {}",
            total, workers, request.settings.method, request.settings.quality
        );

        let (job_tx, job_rx) = mpsc::channel::<ConversionJob>(workers);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<JobReport>(total.max(1));

        let mut pool: Vec<JoinHandle<()>> = Vec::with_capacity(workers + 1);

        let feeder_cancel = cancel.clone();
        pool.push(tokio::spawn(async move {
            for job in jobs {
                tokio::select! {
                    _ = feeder_cancel.cancelled() => break,
                    sent = job_tx.send(job) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
        }));

        for worker_id in 0..workers {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let runner = Arc::clone(&self.runner);
            let settings = request.settings;
            let cancel = cancel.clone();
            pool.push(tokio::spawn(async move {
                loop {
                    let next = { job_rx.lock().await.recv().await };
                    let Some(job) = next else { break };
                    if cancel.is_cancelled() {
                        break;
                    }

                    let job_started = Instant::now();
                    let result = runner.run_job(&job, settings, &cancel).await;
                    let report = JobReport {
                        name: job.descriptor.name.clone(),
                        input_path: job.descriptor.path.clone(),
                        result,
                        elapsed: job_started.elapsed(),
                    };
                    if result_tx.send(report).await.is_err() {
                        break;
                    }
                }
                debug!("Worker {} finished", worker_id);
            }));
        }
        drop(result_tx);

        let mut summary = BatchSummary::new(total);
        while let Some(report) = result_rx.recv().await {
            summary.record(&report);
            self.reporter.job_finished(summary.completed(), total, &report);
        }

        for handle in pool {
            if let Err(e) = handle.await {
                error!("Worker task failed: {}", e);
            }
        }

        let summary = summary.finalize(started.elapsed(), cancel.is_cancelled());
        info!(
            "Batch finished: {} converted, {} skipped, {} failed",
            summary.succeeded, summary.skipped, summary.failed
        );
        self.reporter.batch_finished(&summary);
        summary
    }
}
