//! Read-only feasibility tests over rectangular cell ranges

use crate::io::configuration::HARD_BLOCK_SCORE;
use crate::io::error::Result;
use crate::spatial::grid::{Rect, RoomGrid};
use crate::spatial::items::CollisionClass;
use crate::spatial::labels::Label;

/// Test whether an item of the given class may cover `rect`
///
/// Ghost items always pass without touching the grid. Empty cells accept any
/// class; a cell that already carries weight rejects the rectangle once the
/// incoming weight would bring it to the hard-block score.
///
/// # Errors
///
/// Returns `OutOfRange` if a non-ghost check addresses cells outside the grid
pub fn check_collision(grid: &RoomGrid, rect: &Rect, incoming: CollisionClass) -> Result<bool> {
    if incoming == CollisionClass::Ghost {
        return Ok(true);
    }

    let weight = incoming.weight();
    Ok(!grid.region(rect)?.iter().any(|cell| {
        cell.collision_score > 0 && cell.collision_score + weight >= HARD_BLOCK_SCORE
    }))
}

/// Test that no cell of `rect` lists the named item as avoided
///
/// A name the grid has never seen cannot be avoided anywhere.
///
/// # Errors
///
/// Returns `OutOfRange` if the rectangle leaves the grid
pub fn check_avoid(grid: &RoomGrid, rect: &Rect, item_name: &str) -> Result<bool> {
    match grid.label_of(item_name) {
        Some(label) => check_avoid_label(grid, rect, label),
        None => grid.region(rect).map(|_| true),
    }
}

/// Label-based form of [`check_avoid`] for callers that already interned the name
///
/// # Errors
///
/// Returns `OutOfRange` if the rectangle leaves the grid
pub fn check_avoid_label(grid: &RoomGrid, rect: &Rect, label: Label) -> Result<bool> {
    Ok(!grid
        .region(rect)?
        .iter()
        .any(|cell| cell.avoid.contains(label)))
}
