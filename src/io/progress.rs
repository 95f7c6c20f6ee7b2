//! Progress display for solve attempts and per-item placement

use crate::algorithm::solver::{PlacementOutcome, SolveReport};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display across solve attempts
///
/// One bar tracks items within the current attempt; a second bar is added
/// when more than one attempt is requested.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    attempt_bar: Option<ProgressBar>,
    item_bar: Option<ProgressBar>,
    attempts: usize,
    item_count: usize,
    best_unplaced: Option<usize>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ITEM_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Attempts: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager drawing to the terminal
    pub fn new() -> Self {
        Self::with_multi_progress(MultiProgress::new())
    }

    /// Create a progress manager that tracks state without drawing
    pub fn hidden() -> Self {
        Self::with_multi_progress(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    fn with_multi_progress(multi_progress: MultiProgress) -> Self {
        Self {
            multi_progress,
            attempt_bar: None,
            item_bar: None,
            attempts: 0,
            item_count: 0,
            best_unplaced: None,
        }
    }

    /// Create bars for the given number of attempts and items
    pub fn initialize(&mut self, attempts: usize, item_count: usize) {
        self.attempts = attempts;
        self.item_count = item_count;
        self.best_unplaced = None;

        // A single attempt needs no attempt counter
        if attempts > 1 {
            let bar = ProgressBar::new(attempts as u64);
            bar.set_style(ATTEMPT_STYLE.clone());
            self.attempt_bar = Some(self.multi_progress.add(bar));
        }

        let bar = ProgressBar::new(item_count as u64);
        bar.set_style(ITEM_STYLE.clone());
        self.item_bar = Some(self.multi_progress.add(bar));
    }

    /// Reset the item bar for a new attempt
    pub fn start_attempt(&mut self, attempt: usize) {
        if let Some(ref bar) = self.item_bar {
            bar.reset();
            bar.set_length(self.item_count as u64);
            bar.set_prefix(format!("Attempt {}/{}", attempt + 1, self.attempts));
            bar.set_message(String::new());
        }
    }

    /// Advance the item bar after one placement
    pub fn record_item(&self, outcome: &PlacementOutcome) {
        if let Some(ref bar) = self.item_bar {
            bar.inc(1);
            let status = if outcome.is_placed() { "placed" } else { "unplaced" };
            bar.set_message(format!("{} {status}", outcome.item));
        }
    }

    /// Close out an attempt and remember the best result so far
    pub fn complete_attempt(&mut self, report: &SolveReport) {
        let unplaced = report.unplaced_count();
        let best = self.best_unplaced.map_or(unplaced, |best| best.min(unplaced));
        self.best_unplaced = Some(best);

        if let Some(ref bar) = self.attempt_bar {
            bar.inc(1);
            bar.set_message(format!("best: {best} unplaced"));
        }
    }

    /// Fewest unplaced items seen across completed attempts
    pub const fn best_unplaced(&self) -> Option<usize> {
        self.best_unplaced
    }

    /// Items recorded in the current attempt
    pub fn items_recorded(&self) -> u64 {
        self.item_bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref bar) = self.attempt_bar {
            bar.finish_with_message("All attempts processed");
        }
        if let Some(ref bar) = self.item_bar {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
