// Console report adapter - Per-job lines and the final summary on stdout

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use crate::domain::model::*;
use crate::ports::*;
use crate::utils::Utils;

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Green,
    Red,
    Yellow,
    Cyan,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[92m",
            Tone::Red => "\x1b[91m",
            Tone::Yellow => "\x1b[93m",
            Tone::Cyan => "\x1b[96m",
        }
    }
}

/// Writes human-readable progress to stdout
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    output_dir: PathBuf,
    colored: bool,
}

impl ConsoleReporter {
    /// Colour is enabled only when stdout is a terminal
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            colored: io::stdout().is_terminal(),
        }
    }

    fn paint(&self, tone: Tone, text: &str) -> String {
        if self.colored {
            format!("{}{}\x1b[0m", tone.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Lines printed for one finished job
    pub fn job_lines(&self, completed: usize, total: usize, report: &JobReport) -> Vec<String> {
        let prefix = format!("[{}/{}]", completed, total);
        match &report.result {
            JobResult::Success { .. } => vec![self.paint(
                Tone::Green,
                &format!("{} SUCCESS: {} ({})", prefix, report.name, Utils::format_duration(report.elapsed)),
            )],
            JobResult::Skipped { .. } => vec![self.paint(
                Tone::Cyan,
                &format!("{} SKIPPED: {} (already exists)", prefix, report.name),
            )],
            JobResult::Failed { reason, attempts } => vec![
                self.paint(Tone::Red, &format!("{} FAILED: {}", prefix, report.name)),
                self.paint(
                    Tone::Red,
                    &format!("           Error: {} (attempts: {})", reason, attempts),
                ),
            ],
        }
    }

    /// Lines printed once the batch is over
    pub fn summary_lines(&self, summary: &BatchSummary) -> Vec<String> {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![
            String::new(),
            rule.clone(),
            self.paint(Tone::Cyan, "CONVERSION SUMMARY"),
            rule.clone(),
            self.paint(
                Tone::Green,
                &format!(
                    "Successful: {}/{} ({} converted, {} skipped)",
                    summary.succeeded + summary.skipped,
                    summary.total,
                    summary.succeeded,
                    summary.skipped
                ),
            ),
        ];
        if summary.failed > 0 {
            lines.push(self.paint(
                Tone::Red,
                &format!("Failed: {}/{}", summary.failed, summary.total),
            ));
        }
        if summary.interrupted {
            lines.push(self.paint(
                Tone::Yellow,
                &format!(
                    "Interrupted: {} job(s) never finished",
                    summary.total.saturating_sub(summary.completed())
                ),
            ));
        }
        lines.push(format!("Total time: {}", Utils::format_duration(summary.elapsed)));
        lines.push(format!("Output location: {}", self.output_dir.display()));

        if !summary.failures.is_empty() {
            lines.push(String::new());
            lines.push("-".repeat(RULE_WIDTH));
            lines.push(self.paint(Tone::Red, "FAILED FILES:"));
            for failure in &summary.failures {
                lines.push(self.paint(Tone::Red, &format!("   - {}", failure.name)));
                lines.push(self.paint(Tone::Yellow, &format!("     Reason: {}", failure.reason)));
            }
        }
        lines.push(rule);
        lines
    }

    fn emit(lines: &[String]) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for line in lines {
            let _ = writeln!(handle, "{}", line);
        }
        let _ = handle.flush();
    }
}

impl ReportPort for ConsoleReporter {
    fn job_finished(&self, completed: usize, total: usize, report: &JobReport) {
        Self::emit(&self.job_lines(completed, total, report));
    }

    fn batch_finished(&self, summary: &BatchSummary) {
        Self::emit(&self.summary_lines(summary));
    }
}
