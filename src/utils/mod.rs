//! Common utilities and helpers

use std::time::Duration;

pub mod path;

/// Utility functions for display formatting
pub struct Utils;

impl Utils {
    /// Format elapsed time as `12.3s`, `4m 5s` or `1h 2m`
    pub fn format_duration(duration: Duration) -> String {
        let seconds = duration.as_secs_f64();
        if seconds < 60.0 {
            format!("{:.1}s", seconds)
        } else if seconds < 3600.0 {
            let total = duration.as_secs();
            format!("{}m {}s", total / 60, total % 60)
        } else {
            let total = duration.as_secs();
            format!("{}h {}m", total / 3600, (total % 3600) / 60)
        }
    }
}
