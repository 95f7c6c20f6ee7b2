//! Layout constants and runtime configuration defaults

/// Name written into every perimeter cell when a grid is initialized
pub const WALL_NAME: &str = "Wall";

// Avoidance zones reach this many cells along each axis from the source cell
/// Radius of the square neighbourhood stamped by rule propagation
pub const AVOID_RADIUS: usize = 20;

/// Score at which a cell counts as hard-blocked
pub const HARD_BLOCK_SCORE: u32 = 2;

// Default values for configurable parameters
/// Fixed seed for reproducible layouts
pub const DEFAULT_SEED: u64 = 42;

/// Default room length (rows)
pub const DEFAULT_ROOM_LENGTH: usize = 300;

/// Default room width (columns)
pub const DEFAULT_ROOM_WIDTH: usize = 200;

/// Default number of independent solve attempts
pub const DEFAULT_ATTEMPTS: usize = 1;

// Output settings
/// Default path of the rendered layout image
pub const DEFAULT_OUTPUT: &str = "layout.png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
