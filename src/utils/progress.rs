//! Progress indicators for CLI mode
//!
//! This module provides progress display using indicatif and console.

use crate::models::CertificateStatus;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress tracker for a batch of host checks
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a new progress tracker for `total_hosts` checks
    pub fn new(total_hosts: u64) -> Self {
        let bar = ProgressBar::new(total_hosts);
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(bar_style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Show which host is being checked
    pub fn host_started(&self, host_name: &str) {
        self.bar.set_message(format!("Checking {}", host_name));
    }

    /// Print a status line above the bar and advance it
    pub fn host_completed(&self, host_name: &str, status: CertificateStatus) {
        let icon = match status {
            CertificateStatus::Valid => style(status.icon()).green(),
            CertificateStatus::Warning => style(status.icon()).yellow(),
            CertificateStatus::Expired | CertificateStatus::Error => style(status.icon()).red(),
        };
        self.bar.println(format!("  {} {}", icon, host_name));
        self.bar.inc(1);
    }

    /// Finish and clear the progress bar
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Create a simple spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(spinner_style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print a pass status
pub fn print_pass(message: &str) {
    println!("  {} {}", style("✓").green(), message);
}

/// Print a fail status
pub fn print_fail(message: &str) {
    println!("  {} {}", style("✗").red(), message);
}

/// Print a warning status
pub fn print_warning(message: &str) {
    println!("  {} {}", style("⚠").yellow(), message);
}

/// Print an info status
pub fn print_info(message: &str) {
    println!("  {} {}", style("ℹ").cyan(), message);
}
