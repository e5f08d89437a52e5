//! Schema module - Configuration and published state types for maze evolution.

mod config;
mod evolution;
mod maze;

pub use config::*;
pub use evolution::*;
pub use maze::*;
