//! Input/output shell around the layout engine

/// Command-line interface and attempt orchestration
pub mod cli;
/// Layout constants and runtime configuration defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// PNG rendering of a solved layout
pub mod image;
/// Progress display for solve attempts
pub mod progress;
/// Plain-text rendering of a solved layout
pub mod text;
