//! Evolutionary search over move sequences.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Genome Operations** (`genome`): Random move sequences, mutation and
//!   the elite fan-out that refills a population
//! - **Fitness** (`fitness`): Walks a sequence through the maze and scores
//!   its endpoint by remaining BFS distance
//! - **Search** (`search`): Elite selection and the four-phase controller
//!
//! # Example
//!
//! ```rust,no_run
//! use maze_evolver::compute::evolution::EvolutionController;
//! use maze_evolver::schema::{EvolutionConfig, MazeConfig, PhaseResult};
//!
//! let mut controller =
//!     EvolutionController::initialize(&MazeConfig::default(), EvolutionConfig::default())
//!         .expect("default maze is solvable");
//!
//! while !controller.reached_goal() {
//!     if let PhaseResult::Elected { elites, .. } = controller.advance() {
//!         println!("Generation {}: {} elites", controller.generation(), elites.len());
//!     }
//!     controller.play_replay(|cell| println!("  at {cell}"));
//! }
//! ```

mod fitness;
mod genome;
mod search;

pub use fitness::{FitnessEvaluator, Trace};
pub use genome::{MoveRng, offspring_counts};
pub use search::{Candidate, EngineError, EvolutionController, select_top};
