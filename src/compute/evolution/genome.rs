//! Move-sequence generation and mutation.
//!
//! Provides random candidate generation and the mutation fan-out that turns
//! an elite set into the next population.

use rand::prelude::*;

use crate::compute::Move;

/// Random number generator wrapper for move-sequence operations.
pub struct MoveRng {
    rng: StdRng,
}

impl MoveRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw from the four directions.
    pub fn random_move(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }

    /// Independent uniform moves.
    pub fn random_moves(&mut self, length: usize) -> Vec<Move> {
        (0..length).map(|_| self.random_move()).collect()
    }

    /// `count` random sequences of `length` moves each.
    pub fn random_population(&mut self, count: usize, length: usize) -> Vec<Vec<Move>> {
        (0..count).map(|_| self.random_moves(length)).collect()
    }

    /// With probability `rate`, replace the move by a fresh uniform draw
    /// (which may be the same direction).
    pub fn mutate_move(&mut self, mv: Move, rate: f32) -> Move {
        if self.rng.r#gen::<f32>() < rate {
            self.random_move()
        } else {
            mv
        }
    }

    /// Mutated copy of a sequence, every position considered independently.
    pub fn mutate(&mut self, moves: &[Move], rate: f32) -> Vec<Move> {
        moves.iter().map(|&mv| self.mutate_move(mv, rate)).collect()
    }

    /// Breed a population of `size` from `elites` (best first).
    ///
    /// Each elite contributes one unchanged copy followed by mutated copies.
    /// The population is split evenly; when it does not divide, the better
    /// elites take one extra child each. Returns `(elite index, moves)` in
    /// output order. An empty elite set yields an empty population.
    pub fn breed<S: AsRef<[Move]>>(
        &mut self,
        elites: &[S],
        size: usize,
        rate: f32,
    ) -> Vec<(usize, Vec<Move>)> {
        let mut next_gen = Vec::with_capacity(size);

        for (parent, count) in offspring_counts(elites.len(), size).into_iter().enumerate() {
            let moves = elites[parent].as_ref();
            if count == 0 {
                continue;
            }
            next_gen.push((parent, moves.to_vec()));
            for _ in 1..count {
                next_gen.push((parent, self.mutate(moves, rate)));
            }
        }

        next_gen
    }
}

/// Children per elite when `size` slots are shared among `elites` parents.
pub fn offspring_counts(elites: usize, size: usize) -> Vec<usize> {
    if elites == 0 {
        return Vec::new();
    }
    let base = size / elites;
    let extra = size % elites;
    (0..elites).map(|i| base + usize::from(i < extra)).collect()
}
