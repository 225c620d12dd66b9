//! Progress indicators

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// A single scan step backed by an indicatif spinner.
///
/// On a non-TTY the spinner draws nothing, but the finish lines are still
/// emitted via `eprintln!` so stdout stays clean for machine formats.
pub struct Step {
    pb: ProgressBar,
    label: String,
}

impl Step {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("{}...", label));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { pb, label }
    }

    /// Finish successfully: prints `"  label... done ({summary})"`.
    pub fn finish(&self, summary: &str) {
        self.pb.finish_and_clear();
        eprintln!("  {}... {} ({})", self.label, "done".green(), summary);
    }

    /// Print a warning line above the spinner (or inline on non-TTY)
    pub fn warn(&self, msg: impl std::fmt::Display) {
        self.pb
            .suspend(|| eprintln!("  {}: {}", "warn".yellow(), msg));
    }
}
