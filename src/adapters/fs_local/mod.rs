// Local filesystem adapter - File system operations and input discovery

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Local filesystem adapter
#[derive(Debug, Default, Clone)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }

    /// Walk `input` recursively, collecting video files outside `exclude_dir`
    fn walk_videos(input: &Path, exclude_dir: &Path) -> Vec<VideoDescriptor> {
        let exclude = exclude_dir
            .canonicalize()
            .unwrap_or_else(|_| exclude_dir.to_path_buf());
        // Only a directory strictly below the input root can be pruned
        let prune = PathUtils::is_within(&exclude, input)
            && input.canonicalize().map(|root| root != exclude).unwrap_or(true);

        WalkDir::new(input)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(prune
                    && entry.depth() > 0
                    && entry.file_type().is_dir()
                    && PathUtils::is_within(entry.path(), &exclude))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable path during discovery: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && PathUtils::is_video_file(entry.path()))
            .map(|entry| {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                VideoDescriptor::new(entry.into_path(), size)
            })
            .collect()
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        fs::try_exists(file_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to stat {}: {}", file_path.display(), e)))
    }

    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(file_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to get file size: {}", e)))?;
        Ok(metadata.len())
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to create directory: {}", e)))
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        match fs::remove_file(file_path).await {
            Ok(()) => {
                debug!("Removed {}", file_path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to delete {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn discover_videos(
        &self,
        input: &Path,
        exclude_dir: &Path,
    ) -> Result<Vec<VideoDescriptor>, DomainError> {
        let not_found = |_| DomainError::FileNotFound(input.display().to_string());
        let metadata = fs::metadata(input).await.map_err(not_found)?;
        let input: PathBuf = fs::canonicalize(input).await.map_err(not_found)?;

        if metadata.is_file() {
            if PathUtils::is_video_file(&input) {
                return Ok(vec![VideoDescriptor::new(input, metadata.len())]);
            }
            return Ok(Vec::new());
        }

        let exclude: PathBuf = exclude_dir.to_path_buf();
        tokio::task::spawn_blocking(move || Self::walk_videos(&input, &exclude))
            .await
            .map_err(|e| DomainError::FsFail(format!("Discovery task failed: {}", e)))
    }
}
