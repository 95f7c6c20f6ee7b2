//! Spatial data structures for the room
//!
//! This module contains:
//! - The cell grid and its mutation operations
//! - Item descriptors
//! - Interned labels and label sets

/// Cell grid with collision and relation accounting
pub mod grid;
/// Placeable item descriptors
pub mod items;
/// Label interning and compact label sets
pub mod labels;

pub use grid::{CellView, Rect, RoomGrid};
pub use items::{CollisionClass, Item};
