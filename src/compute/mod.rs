//! Compute module - Grid search and evolution for maze solving.

mod grid;
mod path;

pub mod evolution;

pub use grid::*;
pub use path::*;
