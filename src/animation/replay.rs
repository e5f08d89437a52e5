//! Move-by-move replay of a candidate's walk.

use std::time::Duration;

use crate::compute::Cell;

/// Replay of the cells a candidate visits, one frame per move.
///
/// Frames stop at the first visit to the goal even if the walk went on.
///
/// Usage:
/// ```ignore
/// let mut replay = Replay::new(&trace.cells, goal, Duration::from_millis(200));
/// while let Some(cell) = replay.next_frame() {
///     draw(cell);
///     std::thread::sleep(replay.interval());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Replay {
    frames: Vec<Cell>,
    cursor: usize,
    position: Cell,
    goal: Cell,
    interval: Duration,
}

impl Replay {
    /// Build from visited cells, the first being the start cell.
    pub fn new(cells: &[Cell], goal: Cell, interval: Duration) -> Self {
        let position = cells.first().copied().unwrap_or(goal);
        let moves = cells.get(1..).unwrap_or_default();
        let frames = match moves.iter().position(|&c| c == goal) {
            Some(idx) => moves[..=idx].to_vec(),
            None => moves.to_vec(),
        };

        Self {
            frames,
            cursor: 0,
            position,
            goal,
            interval,
        }
    }

    /// Advance one move. Returns the new position, or `None` once finished.
    pub fn next_frame(&mut self) -> Option<Cell> {
        let cell = *self.frames.get(self.cursor)?;
        self.cursor += 1;
        self.position = cell;
        Some(cell)
    }

    /// Cell currently shown.
    #[inline]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    /// True once the replay has stepped onto the goal.
    pub fn reached_goal(&self) -> bool {
        self.position == self.goal
    }

    /// Pause between frames.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Frames not yet shown.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }

    /// Total frames in this replay.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Iterator for Replay {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        self.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}
