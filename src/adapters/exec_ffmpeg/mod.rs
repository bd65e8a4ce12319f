//! FFmpeg execution adapter
//!
//! This module runs the `ffmpeg` executable for each encode attempt. Success
//! is judged by the caller from the exit status and the output file; stderr
//! is only kept as a short tail for humans.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Maximum stderr captured per encode (64 KiB)
const MAX_DIAGNOSTIC_BYTES: u64 = 64 * 1024;

/// Lines of stderr kept on the outcome
const DIAGNOSTIC_TAIL_LINES: usize = 5;

/// FFmpeg-based execution adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    binary: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Command-line arguments for one encode
    pub fn build_args(request: &EncodeRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(32);
        let mut push = |value: &str| args.push(OsString::from(value));

        push("-hide_banner");
        push("-nostdin");
        push("-loglevel");
        push("error");
        push("-y");
        push("-i");
        args.push(request.input_path.clone().into_os_string());

        let crf = request.crf.to_string();
        let sample_rate = request.sample_rate.to_string();
        let queue = request.max_muxing_queue_size.to_string();
        for value in [
            "-vf",
            request.filter.as_str(),
            "-c:v",
            request.video_codec.as_str(),
            "-preset",
            request.preset.as_str(),
            "-crf",
            crf.as_str(),
            "-pix_fmt",
            request.pixel_format.as_str(),
            "-c:a",
            request.audio_codec.as_str(),
            "-b:a",
            request.audio_bitrate.as_str(),
            "-ar",
            sample_rate.as_str(),
            "-max_muxing_queue_size",
            queue.as_str(),
        ] {
            args.push(OsString::from(value));
        }
        if request.fast_start {
            args.push(OsString::from("-movflags"));
            args.push(OsString::from("+faststart"));
        }
        args.push(request.output_path.clone().into_os_string());
        args
    }

    /// Keep the last few non-empty lines of diagnostic output
    fn tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(DIAGNOSTIC_TAIL_LINES);
        lines[start..].join("\n")
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_DIAGNOSTIC_BYTES`]
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(h) = handle {
        let _ = h.take(MAX_DIAGNOSTIC_BYTES).read_to_end(&mut buf).await;
    }
    buf
}

#[async_trait]
impl EncodePort for FFmpegAdapter {
    async fn check_available(&self) -> Result<String, DomainError> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::EncoderLaunch(format!("{}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(DomainError::EncoderLaunch(format!(
                "{} -version exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    async fn encode(&self, request: &EncodeRequest) -> Result<EncodeOutcome, DomainError> {
        let args = Self::build_args(request);
        debug!(filter = %request.filter, crf = request.crf, "Launching ffmpeg");

        // `kill_on_drop` stops the encoder when this future is dropped on timeout or abort.
        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::EncoderLaunch(format!("{}: {}", self.binary.display(), e))
            })?;

        let stderr_task = tokio::spawn(read_stream(child.stderr.take()));

        let status = child
            .wait()
            .await
            .map_err(|e| DomainError::EncoderLaunch(format!("wait failed: {}", e)))?;
        let stderr = stderr_task.await.unwrap_or_default();

        Ok(EncodeOutcome {
            exit_code: status.code(),
            diagnostics: Self::tail(&stderr),
        })
    }
}
