// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media metadata probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Read width, height, frame rate and duration of the first video stream
    async fn probe_metadata(&self, file_path: &Path) -> Result<VideoMetadata, DomainError>;
}

/// Port for the external encoder
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Confirm the encoder can be launched, returning its version banner
    async fn check_available(&self) -> Result<String, DomainError>;

    /// Run one encode to completion.
    ///
    /// Dropping the returned future must stop the encoder process.
    async fn encode(&self, request: &EncodeRequest) -> Result<EncodeOutcome, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Delete file; a missing file is not an error
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Single video file, or every video file under a directory in sorted order.
    ///
    /// Nothing beneath `exclude_dir` is returned, so earlier outputs are never
    /// picked up as inputs.
    async fn discover_videos(
        &self,
        input: &Path,
        exclude_dir: &Path,
    ) -> Result<Vec<VideoDescriptor>, DomainError>;
}

/// Port for user-facing progress and summary output
pub trait ReportPort: Send + Sync {
    /// Called once per job, in completion order
    fn job_finished(&self, completed: usize, total: usize, report: &JobReport);

    /// Called once after every job has reported
    fn batch_finished(&self, summary: &BatchSummary);
}
