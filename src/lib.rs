//! Randomized greedy placement of rectangular items in a walled grid room
//!
//! Items are placed one at a time in list order. Each placement scans the
//! grid for the first anchor whose rectangle neither overlaps a blocked cell
//! nor, when rules are in force, lands inside another item's avoidance zone.
//! Scan direction is chosen by seeded coin flips, so different seeds give
//! different layouts and the same seed always gives the same one.

#![forbid(unsafe_code)]

/// Collision queries, rule propagation, placement search and the solver driver
pub mod algorithm;
/// Command-line shell, configuration, errors, rendering and progress display
pub mod io;
/// Room grid, items and interned labels
pub mod spatial;

pub use algorithm::solver::{RoomLayout, RulePolicy, SolverConfig, solve, solve_with_config};
pub use io::error::{LayoutError, Result};
