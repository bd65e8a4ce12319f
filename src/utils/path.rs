//! Path utilities for input discovery and output placement

use std::path::{Path, PathBuf};

/// Extensions treated as video input, compared case-insensitively
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "mkv", "avi"];

/// Name of the default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "converted";

/// Path utilities for locating inputs and outputs
pub struct PathUtils;

impl PathUtils {
    /// Get lowercase file extension from path
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Whether the path carries a recognised video extension
    pub fn is_video_file(path: &Path) -> bool {
        Self::get_extension(path)
            .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// `<input>/converted` for a directory, sibling `converted/` for a file
    pub fn default_output_dir(input: &Path) -> PathBuf {
        if input.is_file() {
            input
                .parent()
                .map(|parent| parent.join(DEFAULT_OUTPUT_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
        } else {
            input.join(DEFAULT_OUTPUT_DIR)
        }
    }

    /// Whether `path` lives inside `dir`
    pub fn is_within(path: &Path, dir: &Path) -> bool {
        match (path.canonicalize(), dir.canonicalize()) {
            (Ok(path), Ok(dir)) => path.starts_with(dir),
            _ => path.starts_with(dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file_case_insensitive() {
        assert!(PathUtils::is_video_file(Path::new("a.mp4")));
        assert!(PathUtils::is_video_file(Path::new("a.MOV")));
        assert!(PathUtils::is_video_file(Path::new("dir/b.Mkv")));
        assert!(PathUtils::is_video_file(Path::new("c.AVI")));
        assert!(!PathUtils::is_video_file(Path::new("d.webm")));
        assert!(!PathUtils::is_video_file(Path::new("mp4")));
    }

    #[test]
    fn test_default_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(
            PathUtils::default_output_dir(&file),
            dir.path().join("converted")
        );
        assert_eq!(
            PathUtils::default_output_dir(dir.path()),
            dir.path().join("converted")
        );
    }
}
