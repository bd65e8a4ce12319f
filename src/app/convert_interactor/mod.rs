// Convert interactor - Runs one file's conversion with retries

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Default wall-clock budget for one encoder invocation
pub const DEFAULT_ENCODE_TIMEOUT: Duration = Duration::from_secs(600);

/// Batch-wide conversion choices, applied to every job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSettings {
    pub method: ConversionMethod,
    pub quality: QualityLevel,
}

/// One input paired with the output path reserved for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub descriptor: VideoDescriptor,
    pub output_path: PathBuf,
}

/// Interactor for the single-file conversion use case
pub struct ConvertInteractor {
    probe_port: Arc<dyn ProbePort>,
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
    policy: RetryPolicy,
    encode_timeout: Duration,
}

impl ConvertInteractor {
    /// Create new convert interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        Self {
            probe_port,
            encode_port,
            fs_port,
            policy: RetryPolicy::default(),
            encode_timeout: DEFAULT_ENCODE_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_encode_timeout(mut self, timeout: Duration) -> Self {
        self.encode_timeout = timeout;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Convert `input_path` into `output_dir` under its default output name
    pub async fn run(
        &self,
        input_path: &Path,
        output_dir: &Path,
        settings: ConversionSettings,
        cancel: &CancellationToken,
    ) -> JobResult {
        let size = self.fs_port.get_file_size(input_path).await.unwrap_or(0);
        let descriptor = VideoDescriptor::new(input_path, size);
        let output_path = output_dir.join(FilenameSanitizer::output_file_name_for(&descriptor.name, 1));
        let job = ConversionJob {
            descriptor,
            output_path,
        };
        self.run_job(&job, settings, cancel).await
    }

    /// Convert one job to a terminal result; never panics on I/O failure
    #[tracing::instrument(name = "job", skip_all, fields(input = %job.descriptor.name))]
    pub async fn run_job(
        &self,
        job: &ConversionJob,
        settings: ConversionSettings,
        cancel: &CancellationToken,
    ) -> JobResult {
        if matches!(self.fs_port.file_exists(&job.output_path).await, Ok(true)) {
            info!("Output already exists, skipping: {}", job.output_path.display());
            return JobResult::Skipped {
                existing_output_path: job.output_path.clone(),
            };
        }

        if let Err(e) = self.validate_input(&job.descriptor.path).await {
            warn!("{}", e);
            return JobResult::Failed {
                reason: e.to_string(),
                attempts: 1,
            };
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            if cancel.is_cancelled() {
                return Self::interrupted(attempt - 1);
            }

            debug!("Attempt {}/{}", attempt, self.policy.max_attempts);
            let error = match self.attempt(job, settings, cancel).await {
                Ok(()) => {
                    info!("Converted to {}", job.output_path.display());
                    return JobResult::Success {
                        output_path: job.output_path.clone(),
                    };
                }
                Err(error) => error,
            };

            // The output did not exist when the job started, so anything there now is ours
            self.discard_partial(&job.output_path).await;

            if error == DomainError::Cancelled {
                return Self::interrupted(attempt);
            }

            if !self.policy.should_retry(&error, attempt) {
                warn!("Giving up after {} attempt(s): {}", attempt, error);
                return JobResult::Failed {
                    reason: error.to_string(),
                    attempts: attempt,
                };
            }

            let pause = self.policy.backoff(&error);
            warn!("Attempt {} failed ({}), retrying in {:?}", attempt, error, pause);
            tokio::select! {
                _ = cancel.cancelled() => return Self::interrupted(attempt),
                _ = tokio::time::sleep(pause) => {}
            }
        }
    }

    fn interrupted(attempts: u32) -> JobResult {
        JobResult::Failed {
            reason: DomainError::Cancelled.to_string(),
            attempts,
        }
    }

    /// Missing and empty inputs are not worth retrying
    async fn validate_input(&self, input: &Path) -> Result<(), DomainError> {
        if !self.fs_port.file_exists(input).await.unwrap_or(false) {
            return Err(DomainError::FileNotFound(input.display().to_string()));
        }
        match self.fs_port.get_file_size(input).await {
            Ok(0) => Err(DomainError::EmptyInput(input.display().to_string())),
            Ok(_) => Ok(()),
            Err(_) => Err(DomainError::FileNotFound(input.display().to_string())),
        }
    }

    /// Probe, plan and encode once
    async fn attempt(
        &self,
        job: &ConversionJob,
        settings: ConversionSettings,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let input = &job.descriptor.path;

        let metadata = tokio::select! {
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            probed = self.probe_port.probe_metadata(input) => probed?,
        };
        if metadata.width == 0 || metadata.height == 0 {
            return Err(DomainError::InvalidDimensions {
                width: metadata.width,
                height: metadata.height,
            });
        }

        let geometry = GeometryCalculator::compute(settings.method, metadata.width, metadata.height)?;
        debug!(
            "{}x{} -> {}x{} via {}",
            metadata.width, metadata.height, geometry.width, geometry.height, geometry.filter
        );

        let request = EncodeRequest::new(input, &job.output_path, &geometry, settings.quality);

        // Dropping the encode future on timeout or abort kills the encoder
        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            encoded = tokio::time::timeout(self.encode_timeout, self.encode_port.encode(&request)) => {
                match encoded {
                    Err(_elapsed) => return Err(DomainError::Timeout(self.encode_timeout)),
                    Ok(result) => result?,
                }
            }
        };

        if !outcome.exited_cleanly() {
            if !outcome.diagnostics.is_empty() {
                debug!("Encoder diagnostics:\n{}", outcome.diagnostics);
            }
            return Err(DomainError::EncoderFailed {
                exit_code: outcome.exit_code,
            });
        }

        let produced = self.fs_port.get_file_size(&job.output_path).await.unwrap_or(0);
        if produced == 0 {
            return Err(DomainError::EncoderFailed {
                exit_code: outcome.exit_code,
            });
        }
        Ok(())
    }

    async fn discard_partial(&self, output: &Path) {
        if let Err(e) = self.fs_port.delete_file(output).await {
            warn!("Could not remove partial output: {}", e);
        }
    }
}
