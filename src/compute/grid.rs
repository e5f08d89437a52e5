//! Maze grid storage and cell lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::ConfigError;

/// A 0-based `(row, col)` grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One unit step through the maze.
///
/// Serialized with the single-letter alphabet `d`, `u`, `r`, `l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "d")]
    Down,
    #[serde(rename = "u")]
    Up,
    #[serde(rename = "r")]
    Right,
    #[serde(rename = "l")]
    Left,
}

impl Move {
    /// All moves, in BFS expansion order.
    pub const ALL: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

    /// `(d_row, d_col)` unit vector.
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Move::Down => (1, 0),
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Left => (0, -1),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Move::Down => 'd',
            Move::Up => 'u',
            Move::Right => 'r',
            Move::Left => 'l',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'd' => Some(Move::Down),
            'u' => Some(Move::Up),
            'r' => Some(Move::Right),
            'l' => Some(Move::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a move sequence as `d, r, r, u`.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.symbol().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rectangular maze of open cells and walls.
///
/// Cells are stored row-major in a flat buffer. On the wire a grid is a
/// list of rows of `0` (open) and `1` (wall).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct Grid {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl Grid {
    /// Build a grid from rows of `0`/`1` values.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut walls = Vec::with_capacity(width * height);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => walls.push(false),
                    1 => walls.push(true),
                    _ => return Err(ConfigError::InvalidTile { row, col, value }),
                }
            }
        }

        Ok(Self {
            width,
            height,
            walls,
        })
    }

    /// An all-open grid.
    #[cfg(test)]
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            walls: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Flat buffer index of an in-bounds cell.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// True when the cell is in bounds and not a wall.
    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.walls[self.index(cell)]
    }

    /// True when the cell is in bounds and a wall.
    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.contains(cell) && self.walls[self.index(cell)]
    }

    /// Set the wall state of an in-bounds cell.
    pub fn set_wall(&mut self, cell: Cell, wall: bool) {
        if self.contains(cell) {
            let idx = self.index(cell);
            self.walls[idx] = wall;
        }
    }

    /// Flip a cell between open and wall. Returns the new wall state,
    /// or `None` if the cell is out of bounds.
    pub fn toggle(&mut self, cell: Cell) -> Option<bool> {
        if !self.contains(cell) {
            return None;
        }
        let idx = self.index(cell);
        self.walls[idx] = !self.walls[idx];
        Some(self.walls[idx])
    }

    /// The neighbour reached by `mv`, if it is in bounds and open.
    #[inline]
    pub fn step(&self, cell: Cell, mv: Move) -> Option<Cell> {
        let (dr, dc) = mv.delta();
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        let next = Cell::new(row, col);
        self.is_open(next).then_some(next)
    }

    /// Open neighbours in BFS expansion order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Move::ALL.into_iter().filter_map(move |mv| self.step(cell, mv))
    }

    /// Number of open cells.
    pub fn open_cells(&self) -> usize {
        self.walls.iter().filter(|&&w| !w).count()
    }

    /// Rows of `0` (open) and `1` (wall).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.walls
            .chunks(self.width)
            .map(|row| row.iter().map(|&w| u8::from(w)).collect())
            .collect()
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Grid::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&[vec![0, 1, 0], vec![0, 0, 0]]).unwrap()
    }

    #[test]
    fn test_from_rows_dimensions() {
        let grid = sample();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.open_cells(), 5);
    }

    #[test]
    fn test_from_rows_rejects_malformed() {
        assert_eq!(Grid::from_rows(&[]), Err(ConfigError::EmptyGrid));
        assert_eq!(Grid::from_rows(&[vec![]]), Err(ConfigError::EmptyGrid));
        assert_eq!(
            Grid::from_rows(&[vec![0, 0], vec![0]]),
            Err(ConfigError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Grid::from_rows(&[vec![0, 2]]),
            Err(ConfigError::InvalidTile {
                row: 0,
                col: 1,
                value: 2
            })
        );
    }

    #[test]
    fn test_is_open_bounds_and_walls() {
        let grid = sample();
        assert!(grid.is_open(Cell::new(0, 0)));
        assert!(!grid.is_open(Cell::new(0, 1)));
        assert!(grid.is_wall(Cell::new(0, 1)));
        assert!(!grid.is_open(Cell::new(2, 0)));
        assert!(!grid.is_open(Cell::new(0, 3)));
        assert!(!grid.is_wall(Cell::new(5, 5)));
    }

    #[test]
    fn test_step_blocks_edges_and_walls() {
        let grid = sample();
        let origin = Cell::new(0, 0);
        assert_eq!(grid.step(origin, Move::Up), None);
        assert_eq!(grid.step(origin, Move::Left), None);
        assert_eq!(grid.step(origin, Move::Right), None);
        assert_eq!(grid.step(origin, Move::Down), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_neighbors_order() {
        let grid = Grid::open(3, 3);
        let n: Vec<_> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![
                Cell::new(2, 1),
                Cell::new(0, 1),
                Cell::new(1, 2),
                Cell::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_toggle() {
        let mut grid = sample();
        assert_eq!(grid.toggle(Cell::new(0, 1)), Some(false));
        assert!(grid.is_open(Cell::new(0, 1)));
        assert_eq!(grid.toggle(Cell::new(0, 1)), Some(true));
        assert_eq!(grid.toggle(Cell::new(9, 9)), None);
    }

    #[test]
    fn test_serde_as_rows() {
        let grid = sample();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[[0,1,0],[0,0,0]]");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert!(serde_json::from_str::<Grid>("[[0,1],[0]]").is_err());
    }

    #[test]
    fn test_move_symbols() {
        for mv in Move::ALL {
            assert_eq!(Move::from_symbol(mv.symbol()), Some(mv));
        }
        assert_eq!(Move::from_symbol('x'), None);
        assert_eq!(serde_json::to_string(&Move::Left).unwrap(), "\"l\"");
        assert_eq!(format_moves(&[Move::Down, Move::Right]), "d, r");
    }
}
