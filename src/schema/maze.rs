//! Maze layout configuration.

use serde::{Deserialize, Serialize};

use super::config::{ConfigError, Endpoint};
use crate::compute::{Cell, Grid};

/// A maze as supplied by the caller: rows of `0`/`1` plus start and end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Rows of cells, `0` for open and `1` for wall.
    pub grid: Vec<Vec<u8>>,
    /// Start cell as `[row, col]`.
    pub start: (usize, usize),
    /// End cell as `[row, col]`.
    pub end: (usize, usize),
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            grid: vec![
                vec![0, 0, 0, 1, 0],
                vec![1, 0, 1, 0, 0],
                vec![0, 0, 1, 0, 1],
                vec![0, 1, 0, 0, 0],
                vec![0, 0, 0, 1, 0],
            ],
            start: (0, 0),
            end: (4, 4),
        }
    }
}

impl MazeConfig {
    #[inline]
    pub fn start_cell(&self) -> Cell {
        self.start.into()
    }

    #[inline]
    pub fn end_cell(&self) -> Cell {
        self.end.into()
    }

    /// Parse the rows into a grid without checking the endpoints.
    pub fn build_grid(&self) -> Result<Grid, ConfigError> {
        Grid::from_rows(&self.grid)
    }

    /// Parse the grid and check that start and end are open, in-bounds cells.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        let grid = self.build_grid()?;
        for (endpoint, cell) in [
            (Endpoint::Start, self.start_cell()),
            (Endpoint::End, self.end_cell()),
        ] {
            if !grid.contains(cell) {
                return Err(ConfigError::EndpointOutOfBounds { endpoint, cell });
            }
            if grid.is_wall(cell) {
                return Err(ConfigError::EndpointBlocked { endpoint, cell });
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maze_is_valid() {
        let grid = MazeConfig::default().validate().unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 5));
    }

    #[test]
    fn test_endpoint_out_of_bounds() {
        let maze = MazeConfig {
            end: (5, 4),
            ..Default::default()
        };
        assert_eq!(
            maze.validate().unwrap_err(),
            ConfigError::EndpointOutOfBounds {
                endpoint: Endpoint::End,
                cell: Cell::new(5, 4)
            }
        );
    }

    #[test]
    fn test_endpoint_on_wall() {
        let maze = MazeConfig {
            start: (1, 0),
            ..Default::default()
        };
        assert_eq!(
            maze.validate().unwrap_err(),
            ConfigError::EndpointBlocked {
                endpoint: Endpoint::Start,
                cell: Cell::new(1, 0)
            }
        );
    }

    #[test]
    fn test_json_uses_pair_arrays() {
        let json = r#"{ "grid": [[0, 0], [1, 0]], "start": [0, 0], "end": [1, 1] }"#;
        let maze: MazeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(maze.start_cell(), Cell::new(0, 0));
        assert_eq!(maze.end_cell(), Cell::new(1, 1));
        assert!(maze.validate().is_ok());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.json");
        std::fs::write(
            &path,
            serde_json::to_string_pretty(&MazeConfig::default()).unwrap(),
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let maze: MazeConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(maze.grid, MazeConfig::default().grid);
    }
}
