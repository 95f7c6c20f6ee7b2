//! Anchor search strategies
//!
//! Every strategy walks candidate top-left anchors in a fixed order and
//! returns the first one whose rectangle lies inside the grid and passes the
//! required checks. Exhausting the scan yields `None`; there is no sentinel
//! coordinate to confuse with a real anchor.

use crate::algorithm::collision::{check_avoid_label, check_collision};
use crate::algorithm::random::RandomSelector;
use crate::io::error::Result;
use crate::spatial::grid::{Rect, RoomGrid};
use crate::spatial::items::Item;
use crate::spatial::labels::Label;
use std::fmt;

/// Top-left corner at which an item's rectangle begins
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor {
    /// Row
    pub x: usize,
    /// Column
    pub y: usize,
}

impl Anchor {
    /// Legacy "not found" pair expected by coordinate-only consumers
    pub const SENTINEL: (i64, i64) = (-1, -1);

    /// Create an anchor
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Flatten a search result into a signed pair, using [`Anchor::SENTINEL`] for `None`
    pub fn to_signed_or_sentinel(anchor: Option<Self>) -> (i64, i64) {
        anchor.map_or(Self::SENTINEL, |found| {
            (
                i64::try_from(found.x).unwrap_or(i64::MAX),
                i64::try_from(found.y).unwrap_or(i64::MAX),
            )
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which checks a candidate rectangle must pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchPolicy {
    /// Collision only
    Naive,
    /// Collision and avoidance
    RuleAware,
}

/// Order in which candidate anchors are visited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanDirection {
    /// Rows ascending; each row scanned in a randomly chosen column direction
    Forward,
    /// Rows descending from the far wall; each row scanned in a random direction
    Mirrored,
    /// Columns ascending, rows ascending within each column, no randomness
    Transpose,
}

/// A scan direction paired with a search policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Strategy {
    /// Candidate order
    pub direction: ScanDirection,
    /// Checks applied to each candidate
    pub policy: SearchPolicy,
}

impl Strategy {
    /// Create a strategy
    pub const fn new(direction: ScanDirection, policy: SearchPolicy) -> Self {
        Self { direction, policy }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self.policy {
            SearchPolicy::Naive => "naive",
            SearchPolicy::RuleAware => "rule-aware",
        };
        let direction = match self.direction {
            ScanDirection::Forward => "forward",
            ScanDirection::Mirrored => "mirrored",
            ScanDirection::Transpose => "transpose",
        };
        write!(f, "{policy} {direction}")
    }
}

/// Candidate filter resolved once per search
struct Feasibility<'a> {
    grid: &'a RoomGrid,
    item: &'a Item,
    avoid_label: Option<Label>,
}

impl<'a> Feasibility<'a> {
    fn new(grid: &'a RoomGrid, item: &'a Item, policy: SearchPolicy) -> Self {
        // An item never interned cannot be listed in any avoid set
        let avoid_label = match policy {
            SearchPolicy::Naive => None,
            SearchPolicy::RuleAware => grid.label_of(item.name()),
        };
        Self {
            grid,
            item,
            avoid_label,
        }
    }

    fn accepts(&self, x: usize, y: usize) -> Result<bool> {
        let Some(rect) = Rect::for_item(x, y, self.item) else {
            return Ok(false);
        };
        if !self.grid.contains_rect(&rect) {
            return Ok(false);
        }
        if !check_collision(self.grid, &rect, self.item.collision_class())? {
            return Ok(false);
        }
        match self.avoid_label {
            Some(label) => check_avoid_label(self.grid, &rect, label),
            None => Ok(true),
        }
    }

    /// Scan the columns of one anchor row in a randomly chosen direction
    ///
    /// Descending scans treat the column index as the rectangle's exclusive
    /// right edge, so the anchor sits `item.width()` columns to its left.
    fn scan_row(&self, x: usize, random: &mut RandomSelector) -> Result<Option<Anchor>> {
        let columns = self.grid.width();
        if random.coin_flip() {
            for y in 0..columns {
                if self.accepts(x, y)? {
                    return Ok(Some(Anchor::new(x, y)));
                }
            }
        } else {
            for edge in (0..columns).rev() {
                let Some(y) = edge.checked_sub(self.item.width()) else {
                    continue;
                };
                if self.accepts(x, y)? {
                    return Ok(Some(Anchor::new(x, y)));
                }
            }
        }
        Ok(None)
    }
}

/// Run the scan described by `strategy`
///
/// # Errors
///
/// Propagates `OutOfRange` from the grid; candidates are bounds-checked
/// first, so this only surfaces on an inconsistent grid
pub fn find_placement(
    grid: &RoomGrid,
    item: &Item,
    strategy: Strategy,
    random: &mut RandomSelector,
) -> Result<Option<Anchor>> {
    match strategy.direction {
        ScanDirection::Forward => find_forward(grid, item, strategy.policy, random),
        ScanDirection::Mirrored => find_mirrored(grid, item, strategy.policy, random),
        ScanDirection::Transpose => find_transposed(grid, item, strategy.policy),
    }
}

/// Rows ascending from the near wall
///
/// # Errors
///
/// Propagates `OutOfRange` from the grid
pub fn find_forward(
    grid: &RoomGrid,
    item: &Item,
    policy: SearchPolicy,
    random: &mut RandomSelector,
) -> Result<Option<Anchor>> {
    let feasibility = Feasibility::new(grid, item, policy);
    for x in 0..grid.length() {
        if let Some(anchor) = feasibility.scan_row(x, random)? {
            return Ok(Some(anchor));
        }
    }
    Ok(None)
}

/// Rows descending from the far wall, each row index taken as the exclusive
/// bottom edge of the rectangle
///
/// # Errors
///
/// Propagates `OutOfRange` from the grid
pub fn find_mirrored(
    grid: &RoomGrid,
    item: &Item,
    policy: SearchPolicy,
    random: &mut RandomSelector,
) -> Result<Option<Anchor>> {
    let feasibility = Feasibility::new(grid, item, policy);
    for edge in (0..grid.length()).rev() {
        let Some(x) = edge.checked_sub(item.length()) else {
            continue;
        };
        if let Some(anchor) = feasibility.scan_row(x, random)? {
            return Ok(Some(anchor));
        }
    }
    Ok(None)
}

/// Columns ascending, rows ascending within each column
///
/// # Errors
///
/// Propagates `OutOfRange` from the grid
pub fn find_transposed(
    grid: &RoomGrid,
    item: &Item,
    policy: SearchPolicy,
) -> Result<Option<Anchor>> {
    let feasibility = Feasibility::new(grid, item, policy);
    for y in 0..grid.width() {
        for x in 0..grid.length() {
            if feasibility.accepts(x, y)? {
                return Ok(Some(Anchor::new(x, y)));
            }
        }
    }
    Ok(None)
}
