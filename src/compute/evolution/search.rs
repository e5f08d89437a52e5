//! Selection and the phase-by-phase evolution controller.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::Replay;
use crate::compute::{Cell, Grid, Move, min_steps};
use crate::schema::{
    ConfigError, EvolutionConfig, EvolutionPhase, GenerationSummary, MazeConfig, PhaseResult,
    RunSnapshot, Score,
};

use super::fitness::FitnessEvaluator;
use super::genome::MoveRng;

/// Errors that prevent a run from starting.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("No path from {start} to {end} in the initial maze")]
    NoInitialSolution { start: Cell, end: Cell },
}

/// A candidate individual in the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier.
    pub id: u64,
    /// The move sequence.
    pub moves: Vec<Move>,
    /// Score, once evaluated.
    pub score: Option<Score>,
    /// Generation created.
    pub generation: u64,
    /// Elite this candidate was bred from.
    pub parent: Option<u64>,
}

/// Keep the `k` best reachable candidates, lowest score first.
///
/// Unscored and unreachable candidates are discarded. The sort is stable,
/// so equal scores keep their population order.
pub fn select_top(population: &[Candidate], k: usize) -> Vec<Candidate> {
    let mut ranked: Vec<&Candidate> = population
        .iter()
        .filter(|c| c.score.is_some_and(Score::is_reachable))
        .collect();
    ranked.sort_by_key(|c| c.score);
    ranked.into_iter().take(k).cloned().collect()
}

/// Drives one maze run through seed, score, select, replay and breed.
///
/// Each call to [`advance`](Self::advance) performs exactly one phase
/// transition; nothing happens in the background.
pub struct EvolutionController {
    config: EvolutionConfig,
    rng: MoveRng,
    grid: Grid,
    start: Cell,
    end: Cell,
    candidate_length: usize,
    phase: EvolutionPhase,
    generation: u64,
    population: Vec<Candidate>,
    elites: Vec<Candidate>,
    best: Option<Candidate>,
    replay: Option<Replay>,
    animation_position: Cell,
    reached_goal: bool,
    history: Vec<GenerationSummary>,
    next_id: u64,
}

impl EvolutionController {
    /// Validate the maze and parameters and seed the first population.
    ///
    /// Candidate length is fixed here to the shortest start-to-end distance.
    pub fn initialize(maze: &MazeConfig, config: EvolutionConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = maze.validate()?;
        let start = maze.start_cell();
        let end = maze.end_cell();

        let candidate_length =
            min_steps(&grid, start, end).ok_or(EngineError::NoInitialSolution { start, end })?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        log::info!(
            "Starting run on {}x{} maze, {start} -> {end}, candidate length {candidate_length}, seed {seed}",
            grid.width(),
            grid.height(),
        );

        let mut controller = Self {
            config,
            rng: MoveRng::new(seed),
            grid,
            start,
            end,
            candidate_length,
            phase: EvolutionPhase::Seeded,
            generation: 1,
            population: Vec::new(),
            elites: Vec::new(),
            best: None,
            replay: None,
            animation_position: start,
            reached_goal: false,
            history: Vec::new(),
            next_id: 0,
        };
        controller.reseed();
        Ok(controller)
    }

    /// Perform one phase transition.
    ///
    /// Returns [`PhaseResult::Busy`] without changing anything while a
    /// replay is still running.
    pub fn advance(&mut self) -> PhaseResult {
        if self.is_animating() {
            log::debug!("Advance ignored while replay is running");
            return PhaseResult::Busy;
        }

        match self.phase {
            EvolutionPhase::Seeded => {
                self.evaluate_population();
                self.phase = self.phase.next();
                PhaseResult::Scored {
                    population: self.population.clone(),
                }
            }
            EvolutionPhase::Scored => {
                let wanted = self.config.population.elite_count;
                self.elites = select_top(&self.population, wanted);
                let starved = self.elites.len() < wanted;
                if starved {
                    log::warn!(
                        "Generation {}: only {} of {} elites reachable",
                        self.generation,
                        self.elites.len(),
                        wanted
                    );
                }
                self.record_summary();
                self.phase = self.phase.next();
                PhaseResult::Elected {
                    elites: self.elites.clone(),
                    starved,
                }
            }
            EvolutionPhase::Elected => {
                self.best = self.elites.first().cloned();
                let path = match &self.best {
                    Some(best) => self.evaluator().trace(&best.moves).cells,
                    None => vec![self.start],
                };
                self.animation_position = self.start;
                let replay = Replay::new(&path, self.end, self.config.animation.frame_interval());
                // A replay that starts on the goal has no frames to step onto it.
                if replay.reached_goal() {
                    self.mark_goal_reached();
                }
                self.replay = Some(replay);
                self.phase = self.phase.next();
                log::debug!(
                    "Generation {}: best score {}",
                    self.generation,
                    self.best
                        .as_ref()
                        .and_then(|b| b.score)
                        .unwrap_or(Score::Unreachable)
                );
                PhaseResult::Demonstrated {
                    best: self.best.clone(),
                    path,
                }
            }
            EvolutionPhase::Demonstrated => {
                // Breeding always ends in a freshly seeded round.
                self.step_generation();
                PhaseResult::Seeded {
                    generation: self.generation,
                }
            }
        }
    }

    /// Show the next replay frame. Returns `None` when no replay is running.
    pub fn tick(&mut self) -> Option<Cell> {
        let replay = self.replay.as_mut()?;
        let cell = replay.next_frame()?;
        let at_goal = replay.reached_goal();
        self.animation_position = cell;
        if at_goal {
            self.mark_goal_reached();
        }
        Some(cell)
    }

    /// Run the current replay to completion, pausing for the replay's
    /// frame interval after each move.
    pub fn play_replay<F: FnMut(Cell)>(&mut self, mut on_frame: F) {
        let interval = self
            .replay
            .as_ref()
            .map_or(Duration::ZERO, Replay::interval);
        while let Some(cell) = self.tick() {
            on_frame(cell);
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }
    }

    /// Toggle a wall and reseed the population.
    ///
    /// Ignored while a replay runs, for cells outside the grid, and for the
    /// start and end cells. Returns true when the edit was applied. The
    /// candidate length stays at the value fixed by `initialize`.
    pub fn edit_cell(&mut self, row: usize, col: usize) -> bool {
        let cell = Cell::new(row, col);
        if self.is_animating() {
            log::debug!("Edit of {cell} ignored while replay is running");
            return false;
        }
        if cell == self.start || cell == self.end {
            log::warn!("Edit of {cell} ignored: start and end must stay open");
            return false;
        }
        let Some(wall) = self.grid.toggle(cell) else {
            log::warn!("Edit of {cell} ignored: outside the grid");
            return false;
        };

        log::debug!(
            "{cell} is now {}; reseeding",
            if wall { "a wall" } else { "open" }
        );
        self.reseed();
        true
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            phase: self.phase,
            generation: self.generation,
            animation_position: self.animation_position,
            reached_goal: self.reached_goal,
            animating: self.is_animating(),
            candidate_length: self.candidate_length,
            start: self.start,
            end: self.end,
            grid: self.grid.clone(),
            population: self.population.clone(),
            elites: self.elites.clone(),
            best: self.best.clone(),
            history: self.history.clone(),
        }
    }

    #[inline]
    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn candidate_length(&self) -> usize {
        self.candidate_length
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    pub fn elites(&self) -> &[Candidate] {
        &self.elites
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[inline]
    pub fn animation_position(&self) -> Cell {
        self.animation_position
    }

    /// True once any replay has stepped onto the goal.
    #[inline]
    pub fn reached_goal(&self) -> bool {
        self.reached_goal
    }

    /// True while a replay has frames left to show.
    pub fn is_animating(&self) -> bool {
        self.replay.as_ref().is_some_and(|r| !r.is_finished())
    }

    fn mark_goal_reached(&mut self) {
        if !self.reached_goal {
            self.reached_goal = true;
            log::info!("Generation {}: goal reached", self.generation);
        }
    }

    fn evaluator(&self) -> FitnessEvaluator<'_> {
        FitnessEvaluator::new(&self.grid, self.start, self.end)
    }

    /// Evaluate all candidates in the population.
    #[cfg(not(target_arch = "wasm32"))]
    fn evaluate_population(&mut self) {
        let evaluator = FitnessEvaluator::new(&self.grid, self.start, self.end);

        // Parallel evaluation; par_iter_mut keeps population order
        self.population.par_iter_mut().for_each(|candidate| {
            candidate.score = Some(evaluator.evaluate(&candidate.moves));
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn evaluate_population(&mut self) {
        let evaluator = FitnessEvaluator::new(&self.grid, self.start, self.end);

        // Sequential evaluation for WASM
        for candidate in &mut self.population {
            candidate.score = Some(evaluator.evaluate(&candidate.moves));
        }
    }

    /// Breed the next population from the elite set.
    fn step_generation(&mut self) {
        let size = self.config.population.size;
        let parents: Vec<&[Move]> = self.elites.iter().map(|c| c.moves.as_slice()).collect();
        let offspring = self.rng.breed(&parents, size, self.config.mutation_rate);

        self.generation += 1;
        if offspring.is_empty() {
            log::warn!(
                "Generation {}: no elites to breed from, starting from random candidates",
                self.generation
            );
            self.reseed();
            return;
        }

        let mut next_gen = Vec::with_capacity(size);
        for (parent, moves) in offspring {
            let id = self.take_id();
            next_gen.push(Candidate {
                id,
                moves,
                score: None,
                generation: self.generation,
                parent: Some(self.elites[parent].id),
            });
        }

        self.population = next_gen;
        self.clear_round();
        log::info!("Generation {} bred", self.generation);
    }

    /// Fresh random population of the run's fixed length.
    fn reseed(&mut self) {
        let sequences = self
            .rng
            .random_population(self.config.population.size, self.candidate_length);
        let mut population = Vec::with_capacity(sequences.len());
        for moves in sequences {
            let id = self.take_id();
            population.push(Candidate {
                id,
                moves,
                score: None,
                generation: self.generation,
                parent: None,
            });
        }
        self.population = population;
        self.clear_round();
    }

    fn clear_round(&mut self) {
        self.elites.clear();
        self.best = None;
        self.replay = None;
        self.animation_position = self.start;
        self.phase = EvolutionPhase::Seeded;
    }

    fn record_summary(&mut self) {
        let reachable: Vec<usize> = self
            .population
            .iter()
            .filter_map(|c| c.score.and_then(Score::steps))
            .collect();
        let mean = (!reachable.is_empty())
            .then(|| reachable.iter().sum::<usize>() as f32 / reachable.len() as f32);

        self.history.push(GenerationSummary {
            generation: self.generation,
            best: self.elites.first().and_then(|c| c.score).and_then(Score::steps),
            mean,
            reachable: reachable.len(),
            elites: self.elites.len(),
        });
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
