//! Evolution state types published to callers.
//!
//! These are the read-only views a front-end consumes: the phase cursor,
//! per-candidate scores, the payload of each `advance`, and a full snapshot
//! of a run for rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compute::evolution::Candidate;
use crate::compute::{Cell, Grid};

/// Fitness of a candidate: remaining BFS distance from its endpoint to the goal.
///
/// Ordering puts every reachable score before `Unreachable`, and smaller step
/// counts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Score {
    /// Number of moves still needed; `0` means the goal was reached.
    Steps(usize),
    /// No path from the endpoint to the goal.
    Unreachable,
}

impl Score {
    pub fn steps(self) -> Option<usize> {
        match self {
            Score::Steps(n) => Some(n),
            Score::Unreachable => None,
        }
    }

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Score::Steps(_))
    }
}

impl From<Option<usize>> for Score {
    fn from(steps: Option<usize>) -> Self {
        steps.map_or(Score::Unreachable, Score::Steps)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Steps(n) => write!(f, "{n}"),
            Score::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Phase of one generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionPhase {
    /// Population generated, not yet scored.
    #[default]
    Seeded,
    /// Every candidate has a score.
    Scored,
    /// Elite set selected.
    Elected,
    /// Best candidate exposed for replay.
    Demonstrated,
}

impl EvolutionPhase {
    /// The phase reached by the next `advance`.
    pub fn next(self) -> Self {
        match self {
            EvolutionPhase::Seeded => EvolutionPhase::Scored,
            EvolutionPhase::Scored => EvolutionPhase::Elected,
            EvolutionPhase::Elected => EvolutionPhase::Demonstrated,
            EvolutionPhase::Demonstrated => EvolutionPhase::Seeded,
        }
    }
}

/// Payload returned by one `advance` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseResult {
    /// Full population with scores, in population order.
    Scored { population: Vec<Candidate> },
    /// Elite set, best first. `starved` is set when fewer than the
    /// configured number of candidates could reach the goal.
    Elected { elites: Vec<Candidate>, starved: bool },
    /// Best elite and the cells its moves visit, start included.
    Demonstrated {
        best: Option<Candidate>,
        path: Vec<Cell>,
    },
    /// A new population was bred.
    Seeded { generation: u64 },
    /// A replay is still running; nothing changed.
    Busy,
}

/// Score statistics of one elected generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: u64,
    /// Lowest score among the elites.
    pub best: Option<usize>,
    /// Mean score over reachable candidates.
    pub mean: Option<f32>,
    /// Candidates with a reachable score.
    pub reachable: usize,
    /// Size of the elite set.
    pub elites: usize,
}

/// Read-only view of a run for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub phase: EvolutionPhase,
    pub generation: u64,
    /// Cell currently shown by the replay (the start cell when idle).
    pub animation_position: Cell,
    /// Set once a replay has stepped onto the goal.
    pub reached_goal: bool,
    /// True while a replay is in progress.
    pub animating: bool,
    /// Fixed length of every candidate in this run.
    pub candidate_length: usize,
    pub start: Cell,
    pub end: Cell,
    pub grid: Grid,
    pub population: Vec<Candidate>,
    pub elites: Vec<Candidate>,
    pub best: Option<Candidate>,
    pub history: Vec<GenerationSummary>,
}
