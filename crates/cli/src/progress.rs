//! Progress reporting backed by an `indicatif` spinner.

use indicatif::{ProgressBar, ProgressStyle};
use orthograph_core::ProgressMonitor;

/// Monitor driving a terminal spinner; never cancels.
pub struct SpinnerMonitor {
    bar: ProgressBar,
}

impl SpinnerMonitor {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("static template is valid"),
        );
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressMonitor for SpinnerMonitor {
    fn update_with_phase(&self, done: u64, phase: &str) -> bool {
        self.bar.set_message(format!("{phase} (round {done})"));
        self.bar.tick();
        true
    }

    fn keep_going(&self) -> bool {
        true
    }
}
