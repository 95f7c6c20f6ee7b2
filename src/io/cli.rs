//! Command-line interface for solving a room and exporting the result

use crate::algorithm::random::RandomSelector;
use crate::algorithm::rules::RuleTriple;
use crate::algorithm::solver::{RoomLayout, RulePolicy};
use crate::io::configuration::{
    AVOID_RADIUS, DEFAULT_ATTEMPTS, DEFAULT_OUTPUT, DEFAULT_ROOM_LENGTH, DEFAULT_ROOM_WIDTH,
    DEFAULT_SEED,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{ColorAssignment, Palette, export_layout_as_png};
use crate::io::progress::ProgressManager;
use crate::io::text::render_text;
use crate::spatial::items::{Item, furniture_catalog, sort_by_area_descending};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "roomlayout")]
#[command(
    author,
    version,
    about = "Place furniture in a walled room using a randomized greedy scan"
)]
/// Command-line arguments for the layout tool
// CLI tools commonly need multiple boolean flags for output selection
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Room length in grid units (rows)
    #[arg(short = 'L', long, default_value_t = DEFAULT_ROOM_LENGTH)]
    pub length: usize,

    /// Room width in grid units (columns)
    #[arg(short = 'W', long, default_value_t = DEFAULT_ROOM_WIDTH)]
    pub width: usize,

    /// Random seed for reproducible layouts
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Item to place, as LENGTHxWIDTH:NAME:CLASS (repeatable; defaults to the furniture set)
    #[arg(short, long = "item", value_name = "LxW:NAME:CLASS")]
    pub items: Vec<Item>,

    /// Placement rule, as KIND:A:B (repeatable), e.g. Avoid:DeskAndChair:Wall
    #[arg(short, long = "rule", value_name = "KIND:A:B")]
    pub rules: Vec<RuleTriple>,

    /// How rule-aware searches are chosen when rules are given
    #[arg(short, long, value_enum, default_value_t = RulePolicy::CoinFlip)]
    pub policy: RulePolicy,

    /// Reach of avoidance zones in cells
    #[arg(long, default_value_t = AVOID_RADIUS)]
    pub radius: usize,

    /// Independent attempts; the one with the fewest unplaced items is kept
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Place the largest items first
    #[arg(long)]
    pub largest_first: bool,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Skip writing the PNG
    #[arg(long)]
    pub no_image: bool,

    /// Print the layout as text to stdout
    #[arg(short, long)]
    pub text: bool,

    /// Colour override, as NAME=R,G,B (repeatable)
    #[arg(short, long = "color", value_name = "NAME=R,G,B")]
    pub colors: Vec<ColorAssignment>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with an error if any item is left unplaced
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Items to place, falling back to the stock furniture set
    pub fn catalog(&self) -> Vec<Item> {
        let mut items = if self.items.is_empty() {
            furniture_catalog()
        } else {
            self.items.clone()
        };
        if self.largest_first {
            sort_by_area_descending(&mut items);
        }
        items
    }

    /// Default palette with command-line overrides applied
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        for assignment in &self.colors {
            palette.insert(assignment.name.clone(), assignment.rgb);
        }
        palette
    }

    /// Search family policy for this run; without rules every search is naive
    pub const fn effective_policy(&self) -> RulePolicy {
        if self.rules.is_empty() {
            RulePolicy::Ignore
        } else {
            self.policy
        }
    }
}

/// Runs solve attempts and writes the chosen layout
pub struct LayoutRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl LayoutRunner {
    /// Create a runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve the room and write every requested output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The room dimensions or attempt count are invalid
    /// - Rule propagation or placement touches cells outside the grid
    /// - The PNG cannot be written
    /// - `--strict` is set and an item could not be placed
    pub fn run(&mut self) -> Result<RoomLayout> {
        let start_time = Instant::now();
        let layout = self.best_attempt()?;

        if !self.cli.no_image {
            export_layout_as_png(layout.grid(), &self.cli.palette(), &self.cli.output)?;
            info!("Wrote {}", self.cli.output.display());
        }

        if self.cli.text {
            Self::print_layout(&layout);
        }

        self.report_summary(&layout, start_time);

        if self.cli.strict {
            layout.report().require_all_placed()?;
        }

        Ok(layout)
    }

    /// Run up to `--attempts` independent passes, shuffling the item order
    /// between them, and keep the pass with the fewest unplaced items
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero attempt count and propagates
    /// layout errors
    pub fn best_attempt(&mut self) -> Result<RoomLayout> {
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"at least one attempt is required",
            ));
        }

        let mut random = RandomSelector::new(self.cli.seed);
        let mut order = self.cli.catalog();
        let policy = self.cli.effective_policy();
        let mut best: Option<RoomLayout> = None;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.attempts, order.len());
        }

        for attempt in 0..self.cli.attempts {
            if attempt > 0 {
                random.shuffle(&mut order);
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.start_attempt(attempt);
            }

            let mut layout = RoomLayout::new(self.cli.length, self.cli.width, order.clone())?;
            if !self.cli.rules.is_empty() {
                layout.add_rules(&self.cli.rules, self.cli.radius)?;
            }

            let progress = self.progress_manager.as_ref();
            let report = layout.solve_observed(policy, &mut random, |outcome| {
                if let Some(pm) = progress {
                    pm.record_item(outcome);
                }
            })?;
            let unplaced = report.unplaced_count();

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_attempt(layout.report());
            }

            info!("Attempt {} left {unplaced} items unplaced", attempt + 1);

            best = match best {
                Some(kept) if kept.report().unplaced_count() <= unplaced => Some(kept),
                _ => Some(layout),
            };

            if unplaced == 0 {
                break;
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        best.ok_or_else(|| invalid_parameter("attempts", &self.cli.attempts, &"no attempt ran"))
    }

    // Allow print since the text layout is the requested output
    #[allow(clippy::print_stdout)]
    fn print_layout(layout: &RoomLayout) {
        print!("{}", render_text(layout.grid()));
    }

    // Allow print for the user-facing summary line
    #[allow(clippy::print_stderr)]
    fn report_summary(&self, layout: &RoomLayout, start_time: Instant) {
        if self.cli.quiet {
            return;
        }

        let report = layout.report();
        eprintln!(
            "Placed {}/{} items in a {}x{} room ({:.2?})",
            report.placed_count(),
            report.outcomes.len(),
            layout.length(),
            layout.width(),
            start_time.elapsed()
        );
        for outcome in report.unplaced() {
            eprintln!("  unplaced: {}", outcome.item);
        }
    }
}
