//! Progress reporting while requests are in flight

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use patterns_application::ports::progress::ProgressNotifier;
use patterns_domain::RequestId;
use std::sync::Mutex;

/// Reports progress with an indicatif bar drawn on stderr
pub struct ProgressReporter {
    prefix: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    /// `prefix` labels the bar, e.g. "Sectioning"
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_dispatch_start(&self, total_requests: usize) {
        let pb = ProgressBar::with_draw_target(
            Some(total_requests as u64),
            ProgressDrawTarget::stderr(),
        );
        pb.set_style(Self::bar_style());
        pb.set_prefix(self.prefix.clone());
        pb.set_message("Waiting for responses...");
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_request_complete(&self, id: &RequestId, success: bool) {
        if let Ok(slot) = self.bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), id)
            } else {
                format!("{} {}", "x".red(), id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_dispatch_complete(&self) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple line-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_dispatch_start(&self, total_requests: usize) {
        eprintln!(
            "{} {} ({} requests)",
            "->".cyan(),
            "Dispatching".bold(),
            total_requests
        );
    }

    fn on_request_complete(&self, id: &RequestId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), id);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), id);
        }
    }

    fn on_dispatch_complete(&self) {
        eprintln!();
    }
}
