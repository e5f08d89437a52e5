//! Maze Evolver - Evolving move sequences through grid mazes.
//!
//! This crate evolves fixed-length sequences of moves (down, up, right,
//! left) that walk from a start cell towards an end cell of a grid maze.
//! Candidates are scored by the breadth-first distance still left between
//! where their walk stops and the goal; the best few are kept and mutated
//! to refill the next population.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `schema`: Configuration and published state types
//! - `compute`: Grid lookup, shortest-path search and the evolution engine
//! - `animation`: Frame-by-frame replay of the best candidate
//!
//! # Example
//!
//! ```rust,no_run
//! use maze_evolver::{
//!     compute::evolution::EvolutionController,
//!     schema::{EvolutionConfig, MazeConfig},
//! };
//!
//! let maze = MazeConfig::default();
//! let mut controller = EvolutionController::initialize(&maze, EvolutionConfig::default())?;
//!
//! // One generation: score, elect, demonstrate, breed
//! for _ in 0..3 {
//!     controller.advance();
//! }
//! controller.play_replay(|cell| println!("best candidate at {cell}"));
//! controller.advance();
//!
//! println!("Now at generation {}", controller.generation());
//! # Ok::<(), maze_evolver::compute::evolution::EngineError>(())
//! ```

pub mod animation;
pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::evolution::{Candidate, EngineError, EvolutionController};
pub use compute::{Cell, Grid, Move, min_steps};
pub use schema::{EvolutionConfig, MazeConfig, PhaseResult, RunSnapshot, Score};
