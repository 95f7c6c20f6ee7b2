//! Plain-text rendering of a solved layout

use crate::io::configuration::HARD_BLOCK_SCORE;
use crate::spatial::RoomGrid;

/// Marker for hard-blocked cells
pub const BLOCKED_MARKER: char = '*';
/// Marker for empty cells
pub const EMPTY_MARKER: char = ' ';
/// Marker for soft cells whose topmost occupant has no name
pub const UNNAMED_MARKER: char = '?';

/// Render one line per row
///
/// Hard-blocked cells print as `*`, empty cells as a space, and soft cells
/// as the first character of their topmost occupant's name.
pub fn render_text(grid: &RoomGrid) -> String {
    let mut out = String::with_capacity(grid.length() * (grid.width() + 1));
    for cell in grid.iter() {
        let marker = if cell.collision_score >= HARD_BLOCK_SCORE {
            BLOCKED_MARKER
        } else if cell.collision_score == 0 {
            EMPTY_MARKER
        } else {
            cell.occupants
                .last()
                .and_then(|&label| grid.labels().resolve(label).chars().next())
                .unwrap_or(UNNAMED_MARKER)
        };
        out.push(marker);
        if cell.y + 1 == grid.width() {
            out.push('\n');
        }
    }
    out
}
