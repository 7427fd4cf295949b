//! Progress display for batches of force maps

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Maps: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many maps of a batch have been processed
///
/// A manager created with `visible == false` keeps counting but draws nothing.
pub struct ProgressManager {
    bar: ProgressBar,
    completed: usize,
    skipped: usize,
}

impl ProgressManager {
    /// Create a progress bar for `map_count` maps
    pub fn new(map_count: usize, visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new(map_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            bar
        } else {
            ProgressBar::hidden()
        };
        Self {
            bar,
            completed: 0,
            skipped: 0,
        }
    }

    /// Show the map currently being processed
    pub fn start_map(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
    }

    /// Count a map whose outputs were written
    pub fn complete_map(&mut self) {
        self.completed += 1;
        self.bar.inc(1);
    }

    /// Count a map that was skipped
    pub fn skip_map(&mut self) {
        self.skipped += 1;
        self.bar.inc(1);
    }

    /// Maps completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Maps skipped so far
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
