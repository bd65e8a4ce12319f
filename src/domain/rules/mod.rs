// Domain rules - Business logic and policies

use std::path::Path;
use std::time::Duration;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Suffix appended to every converted file stem
pub const OUTPUT_SUFFIX: &str = "_9x16";
/// Container extension for every converted file
pub const OUTPUT_EXTENSION: &str = "mp4";

fn round_up_even(value: u64) -> u64 {
    value + (value & 1)
}

fn round_down_even(value: u64) -> u64 {
    value & !1
}

fn to_u32(value: u64, width: u32, height: u32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| DomainError::InvalidDimensions { width, height })
}

/// Computes the portrait output frame for a source resolution
pub struct GeometryCalculator;

impl GeometryCalculator {
    /// Compute output geometry and filter for the given method and source size
    pub fn compute(
        method: ConversionMethod,
        source_width: u32,
        source_height: u32,
    ) -> Result<OutputGeometry, DomainError> {
        if source_width == 0 || source_height == 0 {
            return Err(DomainError::InvalidDimensions {
                width: source_width,
                height: source_height,
            });
        }

        match method {
            ConversionMethod::Letterbox => Self::letterbox(source_width, source_height),
            ConversionMethod::Crop { position } => {
                Self::crop(source_width, source_height, position)
            }
            ConversionMethod::Zoom { width, height } => {
                Self::zoom(source_width, source_height, width, height)
            }
        }
    }

    /// Pad the source onto a black 9:16 canvas of the same width.
    ///
    /// The canvas height is the rounded 16/9 multiple of the width, pushed up
    /// to the next even number so the whole source always fits.
    fn letterbox(width: u32, height: u32) -> Result<OutputGeometry, DomainError> {
        let (w, h) = (width as u64, height as u64);

        let out_w = round_up_even(w);
        // round(w * 16 / 9), half away from zero, in integers
        let target_h = (w * 32 + 9) / 18;
        let out_h = round_up_even(target_h).max(round_up_even(h));

        let top = (out_h - h) / 2;
        let bottom = out_h - h - top;

        let out_w = to_u32(out_w, width, height)?;
        let out_h = to_u32(out_h, width, height)?;
        let top = to_u32(top, width, height)?;
        let bottom = to_u32(bottom, width, height)?;

        Ok(OutputGeometry {
            width: out_w,
            height: out_h,
            placement: Placement::Pad {
                left: 0,
                top,
                bottom,
            },
            filter: format!("pad={}:{}:0:{}:black", out_w, out_h, top),
        })
    }

    /// Cut a full-height 9:16 window out of the source.
    ///
    /// The window width rounds down to even so it never reaches past the source.
    fn crop(width: u32, height: u32, position: CropPosition) -> Result<OutputGeometry, DomainError> {
        let (w, h) = (width as u64, height as u64);

        let crop_h = round_down_even(h);
        let crop_w = round_down_even(h * 9 / 16);

        if crop_w == 0 || crop_h == 0 || crop_w > w {
            return Err(DomainError::InvalidDimensions { width, height });
        }

        let x = match position {
            CropPosition::Center => (w - crop_w) / 2,
            CropPosition::Left => 0,
            CropPosition::Right => w - crop_w,
        };

        let crop_w = to_u32(crop_w, width, height)?;
        let crop_h = to_u32(crop_h, width, height)?;
        let x = to_u32(x, width, height)?;

        Ok(OutputGeometry {
            width: crop_w,
            height: crop_h,
            placement: Placement::Crop { x, y: 0 },
            filter: format!("crop={}:{}:{}:0", crop_w, crop_h, x),
        })
    }

    /// Scale the source until it covers the target canvas, then centre-crop.
    fn zoom(
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Result<OutputGeometry, DomainError> {
        if target_width == 0 || target_height == 0 || target_width % 2 != 0 || target_height % 2 != 0
        {
            return Err(DomainError::InvalidDimensions {
                width: target_width,
                height: target_height,
            });
        }

        let (w, h) = (width as u64, height as u64);
        let (tw, th) = (target_width as u64, target_height as u64);

        // scale = max(tw / w, th / h), compared without floating point
        let (scaled_w, scaled_h) = if tw * h >= th * w {
            (tw, (h * tw).div_ceil(w))
        } else {
            ((w * th).div_ceil(h), th)
        };
        let scaled_w = round_up_even(scaled_w).max(tw);
        let scaled_h = round_up_even(scaled_h).max(th);

        let x = (scaled_w - tw) / 2;
        let y = (scaled_h - th) / 2;

        let scaled_w = to_u32(scaled_w, width, height)?;
        let scaled_h = to_u32(scaled_h, width, height)?;
        let x = to_u32(x, width, height)?;
        let y = to_u32(y, width, height)?;

        Ok(OutputGeometry {
            width: target_width,
            height: target_height,
            placement: Placement::ScaleCrop {
                scaled_width: scaled_w,
                scaled_height: scaled_h,
                x,
                y,
            },
            filter: format!(
                "scale={}:{},crop={}:{}:{}:{}",
                scaled_w, scaled_h, target_width, target_height, x, y
            ),
        })
    }
}

/// Maps arbitrary input names to safe output file names
pub struct FilenameSanitizer;

impl FilenameSanitizer {
    /// Characters replaced with `-` in output stems
    pub const DISALLOWED: [char; 11] = ['|', '/', '\\', ':', '*', '?', '"', '<', '>', '\0', '\u{FF5C}'];

    /// Strip the extension and replace disallowed characters
    pub fn sanitize(original_name: &str) -> String {
        Self::sanitize_stem(Self::strip_extension(original_name))
    }

    /// Replace disallowed characters without touching the extension
    pub fn sanitize_stem(stem: &str) -> String {
        stem.chars()
            .map(|c| if Self::DISALLOWED.contains(&c) { '-' } else { c })
            .collect()
    }

    /// Everything before the last dot, unless the dot leads the name
    pub fn strip_extension(name: &str) -> &str {
        match name.rfind('.') {
            Some(idx) if idx > 0 => {
                let extension = &name[idx + 1..];
                if extension.is_empty() || extension.contains(['/', '\\']) {
                    name
                } else {
                    &name[..idx]
                }
            }
            _ => name,
        }
    }

    /// Stem for an input whose plain stem is shared with another input.
    ///
    /// Built only from the input's path relative to the discovery root plus its
    /// extension, so `x/clip.MKV` always becomes `x-clip_mkv` whatever else
    /// the batch contains.
    pub fn qualified_stem(relative_path: &Path) -> String {
        let stem = Self::sanitize(&relative_path.to_string_lossy());
        match relative_path.extension() {
            Some(ext) => format!(
                "{}_{}",
                stem,
                Self::sanitize_stem(&ext.to_string_lossy().to_lowercase())
            ),
            None => stem,
        }
    }

    /// `{stem}_9x16.mp4`
    pub fn output_file_name(safe_stem: &str) -> String {
        format!("{}{}.{}", safe_stem, OUTPUT_SUFFIX, OUTPUT_EXTENSION)
    }

    /// Output name for an input name, with a collision index above 1 inserted before the suffix
    pub fn output_file_name_for(original_name: &str, collision_index: usize) -> String {
        let stem = Self::sanitize(original_name);
        if collision_index > 1 {
            Self::output_file_name(&format!("{}_{}", stem, collision_index))
        } else {
            Self::output_file_name(&stem)
        }
    }
}

/// How a job failure should be treated by the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Metadata probe failed
    Probe,
    /// Encoder failed to launch or exited unsuccessfully
    Encoder,
    /// Encoder ran past its deadline
    Timeout,
    /// Not worth retrying
    Fatal,
}

/// Retry budget and backoff per failure class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub probe_backoff: Duration,
    pub encoder_backoff: Duration,
    pub timeout_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            probe_backoff: Duration::from_secs(1),
            encoder_backoff: Duration::from_secs(2),
            timeout_backoff: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given attempt budget and no pauses
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            probe_backoff: Duration::ZERO,
            encoder_backoff: Duration::ZERO,
            timeout_backoff: Duration::ZERO,
        }
    }

    pub fn classify(error: &DomainError) -> FailureClass {
        match error {
            DomainError::ProbeFail(_) => FailureClass::Probe,
            DomainError::EncoderLaunch(_) | DomainError::EncoderFailed { .. } => {
                FailureClass::Encoder
            }
            DomainError::Timeout(_) => FailureClass::Timeout,
            _ => FailureClass::Fatal,
        }
    }

    /// Whether to try again after `attempts_made` attempts ended in `error`
    pub fn should_retry(&self, error: &DomainError, attempts_made: u32) -> bool {
        error.is_transient() && attempts_made < self.max_attempts
    }

    /// Pause before the next attempt
    pub fn backoff(&self, error: &DomainError) -> Duration {
        match Self::classify(error) {
            FailureClass::Probe => self.probe_backoff,
            FailureClass::Encoder => self.encoder_backoff,
            FailureClass::Timeout => self.timeout_backoff,
            FailureClass::Fatal => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests;
