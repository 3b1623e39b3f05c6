use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

/// Spinner shown while a phase of the run is working.
///
/// Disabled progress accepts every call and prints nothing, so commands do
/// not branch on interactivity themselves.
pub struct Progress {
    enabled: bool,
    started: Instant,
    phase: Option<(ProgressBar, Instant)>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: Instant::now(),
            phase: None,
        }
    }

    pub fn begin(&mut self, label: &str) {
        if !self.enabled {
            return;
        }
        self.clear();

        let bar = ProgressBar::new_spinner()
            .with_style(spinner_style())
            .with_message(format!("{label}..."));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.phase = Some((bar, Instant::now()));
    }

    /// Replaces the running spinner with a check line and its details.
    pub fn end(&mut self, label: &str, details: &[String]) {
        let Some((bar, since)) = self.phase.take() else {
            return;
        };
        bar.finish_and_clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {label:<44} {:>6.2}s",
            since.elapsed().as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m›\x1b[0m {detail}");
        }
    }

    pub fn finish(mut self, outcome: &str) {
        if !self.enabled {
            return;
        }
        self.clear();

        let total = format!("{:.2}s total", self.started.elapsed().as_secs_f64());
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  \x1b[32m●\x1b[0m {outcome:<40} \x1b[2m{total:>14}\x1b[0m");
        let _ = writeln!(stderr);
    }

    fn clear(&mut self) {
        if let Some((bar, _)) = self.phase.take() {
            bar.finish_and_clear();
        }
    }
}

// A failed phase must not leave its spinner over the error report.
impl Drop for Progress {
    fn drop(&mut self) {
        self.clear();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("  {spinner:.cyan} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICKS)
}
