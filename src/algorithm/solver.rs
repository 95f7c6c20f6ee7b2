use crate::{
    algorithm::random::RandomSelector,
    algorithm::rules::{PropagationSummary, RuleTriple, propagate_with_radius},
    algorithm::search::{Anchor, ScanDirection, SearchPolicy, Strategy, find_placement},
    io::configuration::{AVOID_RADIUS, DEFAULT_SEED},
    io::error::{LayoutError, Result},
    spatial::grid::{CellView, RoomGrid},
    spatial::items::{Item, sort_by_area_descending},
};
use log::{debug, info, warn};

/// How the solver picks between naive and rule-aware searches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum RulePolicy {
    /// Always search without avoidance checks
    Ignore,
    /// Fair coin per item
    #[default]
    CoinFlip,
    /// Always honour avoidance zones
    Enforce,
}

/// Runtime parameters for a solve pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Seed for every random choice
    pub seed: u64,
    /// Search family selection when rules are present
    pub rule_policy: RulePolicy,
    /// Reach of avoidance zones in cells
    pub avoid_radius: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            rule_policy: RulePolicy::default(),
            avoid_radius: AVOID_RADIUS,
        }
    }
}

/// Result of one item's placement attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Position of the item in the item list
    pub index: usize,
    /// Item name
    pub item: String,
    /// Strategy the solver chose
    pub strategy: Strategy,
    /// Committed anchor, or `None` if the search found nothing
    pub anchor: Option<Anchor>,
}

impl PlacementOutcome {
    /// Whether the item was committed to the grid
    pub const fn is_placed(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Per-item outcomes of the most recent solve pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveReport {
    /// Outcomes in item-list order
    pub outcomes: Vec<PlacementOutcome>,
}

impl SolveReport {
    /// Number of items committed
    pub fn placed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_placed()).count()
    }

    /// Number of items left out
    pub fn unplaced_count(&self) -> usize {
        self.outcomes.len() - self.placed_count()
    }

    /// Outcomes of items left out
    pub fn unplaced(&self) -> impl Iterator<Item = &PlacementOutcome> {
        self.outcomes.iter().filter(|o| !o.is_placed())
    }

    /// Whether every item was committed
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(PlacementOutcome::is_placed)
    }

    /// Turn the first unplaced item into an error
    ///
    /// # Errors
    ///
    /// Returns `PlacementFailure` for the first item without an anchor
    pub fn require_all_placed(&self) -> Result<()> {
        match self.unplaced().next() {
            Some(outcome) => Err(LayoutError::PlacementFailure {
                item: outcome.item.clone(),
                index: outcome.index,
            }),
            None => Ok(()),
        }
    }
}

/// A room, its grid and the items to place in it
///
/// The grid is owned exclusively by the layout; independent rooms each get
/// their own instance.
#[derive(Debug)]
pub struct RoomLayout {
    grid: RoomGrid,
    items: Vec<Item>,
    rules: Vec<RuleTriple>,
    avoid_radius: usize,
    report: SolveReport,
}

impl RoomLayout {
    /// Create a layout with a freshly initialized grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero
    pub fn new(length: usize, width: usize, items: Vec<Item>) -> Result<Self> {
        Ok(Self {
            grid: RoomGrid::initialize(length, width)?,
            items,
            rules: Vec::new(),
            avoid_radius: AVOID_RADIUS,
            report: SolveReport::default(),
        })
    }

    /// Number of rows
    pub const fn length(&self) -> usize {
        self.grid.length()
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.grid.width()
    }

    /// The underlying grid
    pub const fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    /// Mutable access for callers that place or annotate cells by hand
    pub const fn grid_mut(&mut self) -> &mut RoomGrid {
        &mut self.grid
    }

    /// Items in placement order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Rules applied to the current grid
    pub fn rules(&self) -> &[RuleTriple] {
        &self.rules
    }

    /// Outcomes of the most recent solve pass
    pub const fn report(&self) -> &SolveReport {
        &self.report
    }

    /// Snapshot a cell of the grid
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate lies outside the grid
    pub fn query_cell(&self, x: usize, y: usize) -> Result<CellView> {
        self.grid.query_cell(x, y)
    }

    /// Discard all placements and relations and re-seed the walls
    ///
    /// Rules previously added are stamped again on the fresh grid.
    ///
    /// # Errors
    ///
    /// Propagates grid initialization and rule propagation errors
    pub fn initialize(&mut self) -> Result<()> {
        self.grid = RoomGrid::initialize(self.grid.length(), self.grid.width())?;
        self.report = SolveReport::default();
        if !self.rules.is_empty() {
            propagate_with_radius(&mut self.grid, &self.rules, self.avoid_radius)?;
        }
        Ok(())
    }

    /// Stamp avoidance zones for `rules` and remember them for re-initialization
    ///
    /// # Errors
    ///
    /// Propagates errors from rule propagation
    pub fn add_rules(&mut self, rules: &[RuleTriple], radius: usize) -> Result<PropagationSummary> {
        let summary = propagate_with_radius(&mut self.grid, rules, radius)?;
        info!(
            "Applied {} avoid pairs from {} sources ({} rules ignored, {} cells stamped)",
            summary.pairs, summary.sources, summary.ignored, summary.stamped
        );
        self.rules.extend_from_slice(rules);
        self.avoid_radius = radius;
        Ok(summary)
    }

    /// Re-seed the grid and shuffle the item order
    ///
    /// # Errors
    ///
    /// Propagates errors from [`RoomLayout::initialize`]
    pub fn shuffle(&mut self, random: &mut RandomSelector) -> Result<()> {
        self.initialize()?;
        random.shuffle(&mut self.items);
        Ok(())
    }

    /// Put the largest items first
    pub fn sort_items_by_area_descending(&mut self) {
        sort_by_area_descending(&mut self.items);
    }

    /// Place every item once, in list order
    ///
    /// # Errors
    ///
    /// Propagates grid errors; an item with no feasible anchor is recorded in
    /// the report, not returned as an error
    pub fn solve(&mut self, policy: RulePolicy, random: &mut RandomSelector) -> Result<&SolveReport> {
        self.solve_observed(policy, random, |_| {})
    }

    /// [`RoomLayout::solve`] with a callback after each item
    ///
    /// # Errors
    ///
    /// Propagates grid errors
    pub fn solve_observed<F>(
        &mut self,
        policy: RulePolicy,
        random: &mut RandomSelector,
        mut on_item: F,
    ) -> Result<&SolveReport>
    where
        F: FnMut(&PlacementOutcome),
    {
        let mut outcomes = Vec::with_capacity(self.items.len());

        for (index, item) in self.items.iter().enumerate() {
            let strategy = choose_strategy(policy, random);
            let anchor = find_placement(&self.grid, item, strategy, random)?;

            match anchor {
                Some(found) => {
                    self.grid.place_item(found.x, found.y, item)?;
                    debug!("Placed '{}' at {found} using {strategy} scan", item.name());
                }
                None => {
                    warn!(
                        "No feasible anchor for '{}' ({}x{}) using {strategy} scan",
                        item.name(),
                        item.length(),
                        item.width()
                    );
                }
            }

            let outcome = PlacementOutcome {
                index,
                item: item.name().to_string(),
                strategy,
                anchor,
            };
            on_item(&outcome);
            outcomes.push(outcome);
        }

        self.report = SolveReport { outcomes };
        info!(
            "Placed {}/{} items",
            self.report.placed_count(),
            self.report.outcomes.len()
        );
        Ok(&self.report)
    }
}

/// Pick the search family and scan direction for one item
///
/// The orientation coin decides between the randomized scans and the
/// transpose scan; a second coin then picks forward or mirrored.
pub fn choose_strategy(policy: RulePolicy, random: &mut RandomSelector) -> Strategy {
    let search = match policy {
        RulePolicy::Ignore => SearchPolicy::Naive,
        RulePolicy::Enforce => SearchPolicy::RuleAware,
        RulePolicy::CoinFlip => {
            if random.coin_flip() {
                SearchPolicy::RuleAware
            } else {
                SearchPolicy::Naive
            }
        }
    };

    let direction = if random.coin_flip() {
        if random.coin_flip() {
            ScanDirection::Forward
        } else {
            ScanDirection::Mirrored
        }
    } else {
        ScanDirection::Transpose
    };

    Strategy::new(direction, search)
}

/// Solve a `length × width` room with the default configuration
///
/// Without rules every item uses the naive search.
///
/// # Errors
///
/// Returns `InvalidParameter` for zero room dimensions and propagates grid errors
pub fn solve(
    length: usize,
    width: usize,
    items: Vec<Item>,
    rules: Option<&[RuleTriple]>,
    seed: u64,
) -> Result<RoomLayout> {
    let config = SolverConfig {
        seed,
        ..SolverConfig::default()
    };
    solve_with_config(length, width, items, rules, &config)
}

/// Solve a room with explicit solver parameters
///
/// # Errors
///
/// Returns `InvalidParameter` for zero room dimensions and propagates grid errors
pub fn solve_with_config(
    length: usize,
    width: usize,
    items: Vec<Item>,
    rules: Option<&[RuleTriple]>,
    config: &SolverConfig,
) -> Result<RoomLayout> {
    let mut layout = RoomLayout::new(length, width, items)?;
    let mut random = RandomSelector::new(config.seed);

    let policy = match rules {
        Some(rules) => {
            layout.add_rules(rules, config.avoid_radius)?;
            config.rule_policy
        }
        None => RulePolicy::Ignore,
    };

    layout.solve(policy, &mut random)?;
    Ok(layout)
}
