//! Rule parsing and avoidance-zone propagation
//!
//! Rules arrive as `(kind, A, B)` triples. Only avoid rules are interpreted:
//! every cell holding `B` gets `A` stamped into the avoid set of each cell in
//! the square neighbourhood around it, and symmetrically for `A`. Other kinds
//! are ignored and logged.

use crate::io::configuration::AVOID_RADIUS;
use crate::io::error::{LayoutError, Result, invalid_parameter};
use crate::spatial::grid::RoomGrid;
use crate::spatial::labels::Label;
use log::{debug, warn};
use ndarray::{Array2, Axis, Slice};
use std::fmt;
use std::str::FromStr;

/// Relation kinds the propagator recognises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The two items keep apart
    Avoid,
    /// The two items belong together; recognised but not propagated
    NextTo,
}

impl RelationKind {
    /// Parse a relation keyword, accepting `Avoids` as an alias of `Avoid`
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "Avoid" | "Avoids" => Some(Self::Avoid),
            "NextTo" => Some(Self::NextTo),
            _ => None,
        }
    }
}

/// One rule as supplied by the caller
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleTriple {
    /// Relation keyword
    pub kind: String,
    /// First item name
    pub first: String,
    /// Second item name
    pub second: String,
}

impl RuleTriple {
    /// Create a rule triple
    pub fn new(kind: impl Into<String>, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Shorthand for an avoid rule between two items
    pub fn avoid(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::new("Avoid", first, second)
    }

    /// Recognised relation kind, if any
    pub fn relation(&self) -> Option<RelationKind> {
        RelationKind::parse(&self.kind)
    }
}

impl From<[&str; 3]> for RuleTriple {
    fn from([kind, first, second]: [&str; 3]) -> Self {
        Self::new(kind, first, second)
    }
}

impl fmt::Display for RuleTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.first, self.second)
    }
}

impl FromStr for RuleTriple {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [kind, first, second] if !kind.is_empty() && !first.is_empty() && !second.is_empty() => {
                Ok(Self::new(*kind, *first, *second))
            }
            _ => Err(invalid_parameter("rule", &text, &"expected KIND:A:B")),
        }
    }
}

/// Symmetric avoid pair extracted from the rule list
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AvoidRule {
    /// Item whose zone is stamped around occurrences of `second`
    pub first: String,
    /// Item whose zone is stamped around occurrences of `first`
    pub second: String,
}

/// Outcome of one propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    /// Avoid pairs applied
    pub pairs: usize,
    /// Rules skipped because their kind is not propagated
    pub ignored: usize,
    /// Cells whose occupants triggered a zone
    pub sources: usize,
    /// Avoid entries newly added across all cells
    pub stamped: usize,
}

/// Reduce a rule list to avoid pairs, keyed on the first item name
///
/// Pairs keep the position of the first rule naming a given `first` item; a
/// later rule for the same item replaces its `second`. Returns the pairs and
/// the number of rules skipped.
pub fn collect_avoid_rules(rules: &[RuleTriple]) -> (Vec<AvoidRule>, usize) {
    let mut pairs: Vec<AvoidRule> = Vec::new();
    let mut ignored = 0;

    for rule in rules {
        match rule.relation() {
            Some(RelationKind::Avoid) => {
                if let Some(existing) = pairs.iter_mut().find(|pair| pair.first == rule.first) {
                    debug!(
                        "Avoid rule for '{}' now targets '{}' instead of '{}'",
                        rule.first, rule.second, existing.second
                    );
                    existing.second.clone_from(&rule.second);
                } else {
                    pairs.push(AvoidRule {
                        first: rule.first.clone(),
                        second: rule.second.clone(),
                    });
                }
            }
            Some(RelationKind::NextTo) => {
                debug!("Next-to rule '{rule}' is stored but not propagated");
                ignored += 1;
            }
            None => {
                warn!("Ignoring rule '{rule}': unknown relation '{}'", rule.kind);
                ignored += 1;
            }
        }
    }

    (pairs, ignored)
}

/// Stamp avoidance zones of the default radius
///
/// # Errors
///
/// Returns `OutOfRange` only if the grid's own cells are inconsistent
pub fn propagate_rules(grid: &mut RoomGrid, rules: &[RuleTriple]) -> Result<PropagationSummary> {
    propagate_with_radius(grid, rules, AVOID_RADIUS)
}

/// Stamp avoidance zones reaching `radius` cells along each axis
///
/// The zone around a source cell is the square `[x-r, x+r] × [y-r, y+r]`
/// clipped to the grid, source cell included. Each direction of a pair is
/// stamped on its own, so a cell holding both items avoids both.
///
/// # Errors
///
/// Returns `OutOfRange` only if the grid's own cells are inconsistent
pub fn propagate_with_radius(
    grid: &mut RoomGrid,
    rules: &[RuleTriple],
    radius: usize,
) -> Result<PropagationSummary> {
    let (pairs, ignored) = collect_avoid_rules(rules);
    let mut summary = PropagationSummary {
        pairs: pairs.len(),
        ignored,
        ..PropagationSummary::default()
    };

    for pair in &pairs {
        let first = grid.intern(&pair.first);
        let second = grid.intern(&pair.second);

        for (source, avoided) in [(second, first), (first, second)] {
            let (zone, sources) = zone_around(grid, source, radius);
            summary.sources += sources;
            summary.stamped += stamp_zone(grid, &zone, avoided)?;
        }

        debug!(
            "Avoid '{}' <-> '{}': {} sources so far",
            pair.first, pair.second, summary.sources
        );
    }

    Ok(summary)
}

/// Mask of every cell within `radius` of a cell holding `source`
fn zone_around(grid: &RoomGrid, source: Label, radius: usize) -> (Array2<bool>, usize) {
    let (length, width) = grid.dimensions();
    let mut zone = Array2::from_elem((length, width), false);
    let mut sources = 0;

    for cell in grid.iter().filter(|cell| cell.has_occupant(source)) {
        sources += 1;
        let rows = cell.x.saturating_sub(radius)..reach(cell.x, radius).min(length);
        let cols = cell.y.saturating_sub(radius)..reach(cell.y, radius).min(width);
        zone.slice_axis_mut(Axis(0), Slice::from(rows))
            .slice_axis_move(Axis(1), Slice::from(cols))
            .fill(true);
    }

    (zone, sources)
}

/// Exclusive upper bound of a radius around `center`, clamped at `usize::MAX`
const fn reach(center: usize, radius: usize) -> usize {
    center.saturating_add(radius).saturating_add(1)
}

fn stamp_zone(grid: &mut RoomGrid, zone: &Array2<bool>, avoided: Label) -> Result<usize> {
    let mut stamped = 0;
    for ((x, y), _) in zone.indexed_iter().filter(|(_, inside)| **inside) {
        if grid.mark_avoid(x, y, avoided)? {
            stamped += 1;
        }
    }
    Ok(stamped)
}
