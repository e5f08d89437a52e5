//! Candidate simulation and scoring.

use crate::compute::{Cell, Grid, Move, min_steps};
use crate::schema::Score;

/// Walk of a move sequence through the maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Visited cells, starting with the start cell.
    pub cells: Vec<Cell>,
    /// Moves applied before the walk stopped.
    pub moves_taken: usize,
    /// True when a blocked or out-of-bounds move ended the walk early.
    pub truncated: bool,
}

impl Trace {
    /// Final cell of the walk.
    pub fn end(&self) -> Cell {
        // cells always holds at least the start cell
        self.cells[self.cells.len() - 1]
    }
}

/// Scores move sequences against one maze.
///
/// Borrows the grid, so a single evaluator can be shared across threads
/// while a population is scored.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    grid: &'a Grid,
    start: Cell,
    goal: Cell,
}

impl<'a> FitnessEvaluator<'a> {
    /// Create a new fitness evaluator.
    pub fn new(grid: &'a Grid, start: Cell, goal: Cell) -> Self {
        Self { grid, start, goal }
    }

    /// Walk the moves from the start cell, stopping at the first move into
    /// a wall or off the grid.
    pub fn trace(&self, moves: &[Move]) -> Trace {
        let mut cells = Vec::with_capacity(moves.len() + 1);
        let mut current = self.start;
        cells.push(current);

        for &mv in moves {
            match self.grid.step(current, mv) {
                Some(next) => {
                    current = next;
                    cells.push(current);
                }
                None => {
                    return Trace {
                        moves_taken: cells.len() - 1,
                        cells,
                        truncated: true,
                    };
                }
            }
        }

        Trace {
            moves_taken: cells.len() - 1,
            cells,
            truncated: false,
        }
    }

    /// Remaining shortest distance from where the moves end up to the goal.
    pub fn evaluate(&self, moves: &[Move]) -> Score {
        let end = self.trace(moves).end();
        if end == self.goal {
            return Score::Steps(0);
        }
        min_steps(self.grid, end, self.goal).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MazeConfig;

    fn moves(s: &str) -> Vec<Move> {
        s.chars().filter_map(Move::from_symbol).collect()
    }

    fn classic() -> Grid {
        MazeConfig::default().validate().unwrap()
    }

    #[test]
    fn test_blocked_first_move_scores_start() {
        let grid = classic();
        let eval = FitnessEvaluator::new(&grid, Cell::new(0, 0), Cell::new(4, 4));

        // Down from (0, 0) hits the wall at (1, 0).
        let trace = eval.trace(&moves("drrr"));
        assert_eq!(trace.moves_taken, 0);
        assert!(trace.truncated);
        assert_eq!(trace.end(), Cell::new(0, 0));
        assert_eq!(eval.evaluate(&moves("drrr")), Score::Steps(12));

        // Up leaves the grid.
        assert_eq!(eval.evaluate(&moves("urrr")), Score::Steps(12));
    }

    #[test]
    fn test_truncation_ignores_remaining_moves() {
        let grid = classic();
        let eval = FitnessEvaluator::new(&grid, Cell::new(0, 0), Cell::new(4, 4));
        // r to (0, 1), d to (1, 1), r into wall at (1, 2); the rest is ignored.
        let trace = eval.trace(&moves("rdrdd"));
        assert_eq!(trace.cells, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]);
        assert!(trace.truncated);
        assert_eq!(eval.evaluate(&moves("rdrdd")), Score::Steps(10));
    }

    #[test]
    fn test_optimal_sequence_reaches_goal() {
        let grid = classic();
        let eval = FitnessEvaluator::new(&grid, Cell::new(0, 0), Cell::new(4, 4));
        let solution = moves("rddlddrrurrd");
        let trace = eval.trace(&solution);
        assert!(!trace.truncated);
        assert_eq!(trace.end(), Cell::new(4, 4));
        assert_eq!(eval.evaluate(&solution), Score::Steps(0));
    }

    #[test]
    fn test_passing_through_goal_scores_final_cell() {
        let grid = Grid::open(3, 1);
        let eval = FitnessEvaluator::new(&grid, Cell::new(0, 0), Cell::new(0, 1));
        assert_eq!(eval.evaluate(&moves("rr")), Score::Steps(1));
    }

    #[test]
    fn test_isolated_endpoint_is_unreachable() {
        let mut grid = classic();
        grid.set_wall(Cell::new(3, 4), true);
        let eval = FitnessEvaluator::new(&grid, Cell::new(0, 0), Cell::new(4, 4));
        assert_eq!(eval.evaluate(&moves("rd")), Score::Unreachable);
    }

    #[test]
    fn test_trace_stays_on_open_cells() {
        let grid = classic();
        let eval = FitnessEvaluator::new(&grid, Cell::new(0, 0), Cell::new(4, 4));
        let mut rng = crate::compute::evolution::MoveRng::new(11);
        for candidate in rng.random_population(200, 12) {
            let trace = eval.trace(&candidate);
            assert!(trace.cells.iter().all(|&c| grid.is_open(c)));
            assert!(trace.moves_taken <= candidate.len());
        }
    }
}
