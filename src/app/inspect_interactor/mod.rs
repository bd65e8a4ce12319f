// Inspect interactor - Probes discovered inputs for the pre-run listing

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// One listing row; a failed probe keeps its error instead of aborting the listing
#[derive(Debug, Clone, PartialEq)]
pub struct InspectEntry {
    pub descriptor: VideoDescriptor,
    pub metadata: Result<VideoMetadata, DomainError>,
}

/// Interactor for the video information listing
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Probe every input in order; stops with `Cancelled` once `cancel` fires
    pub async fn inspect_all(
        &self,
        videos: &[VideoDescriptor],
        cancel: &CancellationToken,
    ) -> Result<Vec<InspectEntry>, DomainError> {
        let mut entries = Vec::with_capacity(videos.len());
        for descriptor in videos {
            let metadata = tokio::select! {
                _ = cancel.cancelled() => return Err(DomainError::Cancelled),
                metadata = self.probe_port.probe_metadata(&descriptor.path) => metadata,
            };
            if let Err(e) = &metadata {
                warn!("Could not read info for {}: {}", descriptor.name, e);
            }
            entries.push(InspectEntry {
                descriptor: descriptor.clone(),
                metadata,
            });
        }
        Ok(entries)
    }

    /// Text block printed for one entry
    pub fn format_entry(entry: &InspectEntry) -> Vec<String> {
        let mut lines = vec![
            entry.descriptor.name.clone(),
            format!("  Size: {:.2} MB", entry.descriptor.size_mb()),
        ];
        match &entry.metadata {
            Ok(metadata) => {
                lines.push(format!(
                    "  Resolution: {}x{} ({})",
                    metadata.width,
                    metadata.height,
                    metadata.resolution_name()
                ));
                lines.push(format!("  Aspect ratio: {:.2}", metadata.aspect_ratio()));
                lines.push(format!("  FPS: {:.2}", metadata.fps));
                lines.push(format!("  Duration: {:.2}s", metadata.duration));
            }
            Err(e) => lines.push(format!("  Warning: could not read video info ({})", e)),
        }
        lines
    }
}
