//! Error types for grid access, placement and layout export

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Every failure the layout engine and its shell can report
#[derive(Debug)]
pub enum LayoutError {
    /// A cell coordinate or rectangle fell outside the grid
    OutOfRange {
        /// Requested row
        x: usize,
        /// Requested column
        y: usize,
        /// Grid size as (length, width)
        dimensions: (usize, usize),
    },

    /// A placement search exhausted its scan without a feasible anchor
    PlacementFailure {
        /// Item left out
        item: String,
        /// Position of the item in the item list
        index: usize,
    },

    /// A room, item, rule or option value was rejected
    InvalidParameter {
        /// Which input was rejected
        parameter: &'static str,
        /// The rejected value as text
        value: String,
        /// What was expected instead
        reason: String,
    },

    /// The rendered layout could not be encoded or written
    ImageExport {
        /// Destination of the PNG
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Preparing the output location failed
    Io {
        /// Path being prepared
        path: PathBuf,
        /// Step that failed, e.g. "create directory"
        action: &'static str,
        /// I/O error reported by the OS
        source: std::io::Error,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { x, y, dimensions } => write!(
                f,
                "Cell ({x}, {y}) is outside the {}x{} grid",
                dimensions.0, dimensions.1
            ),
            Self::PlacementFailure { item, index } => {
                write!(f, "No feasible anchor for item '{item}' (position {index})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Rejected {parameter} '{value}': {reason}"),
            Self::ImageExport { path, source } => {
                write!(f, "Could not write layout to '{}': {source}", path.display())
            }
            Self::Io {
                path,
                action,
                source,
            } => write!(f, "Could not {action} '{}': {source}", path.display()),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::OutOfRange { .. } | Self::PlacementFailure { .. } | Self::InvalidParameter { .. } => {
                None
            }
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Build an `InvalidParameter` error from any displayable value and reason
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LayoutError {
    LayoutError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Build an `OutOfRange` error for a coordinate on a grid of the given size
pub const fn out_of_range(x: usize, y: usize, dimensions: (usize, usize)) -> LayoutError {
    LayoutError::OutOfRange { x, y, dimensions }
}
