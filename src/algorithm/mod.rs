/// Read-only collision and avoidance checks
pub mod collision;
/// Seeded random source for coin flips and shuffles
pub mod random;
/// Rule parsing and avoidance-zone propagation
pub mod rules;
/// Anchor search strategies
pub mod search;
/// Item-by-item solver driver and the room layout aggregate
pub mod solver;
