//! Breadth-first shortest-path search over a maze grid.
//!
//! Every call allocates its own queue and visited buffer, so searches are
//! independent and safe to run from many threads against a shared grid.

use std::collections::VecDeque;

use super::grid::{Cell, Grid};

/// Minimum number of unit moves from `origin` to `goal`.
///
/// Returns `None` when the goal cannot be reached, or when either endpoint
/// is out of bounds or a wall. Neighbours are expanded in the order
/// down, up, right, left.
pub fn min_steps(grid: &Grid, origin: Cell, goal: Cell) -> Option<usize> {
    if !grid.is_open(origin) || !grid.is_open(goal) {
        return None;
    }

    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    visited[grid.index(origin)] = true;
    queue.push_back((origin, 0usize));

    while let Some((cell, steps)) = queue.pop_front() {
        if cell == goal {
            return Some(steps);
        }
        for next in grid.neighbors(cell) {
            let idx = grid.index(next);
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back((next, steps + 1));
            }
        }
    }

    None
}

/// One shortest path from `origin` to `goal`, both endpoints included.
pub fn shortest_path(grid: &Grid, origin: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !grid.is_open(origin) || !grid.is_open(goal) {
        return None;
    }

    let mut parent: Vec<Option<Cell>> = vec![None; grid.len()];
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    visited[grid.index(origin)] = true;
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            let mut path = vec![goal];
            let mut current = goal;
            while let Some(prev) = parent[grid.index(current)] {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            return Some(path);
        }
        for next in grid.neighbors(cell) {
            let idx = grid.index(next);
            if !visited[idx] {
                visited[idx] = true;
                parent[idx] = Some(cell);
                queue.push_back(next);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MazeConfig;
    use proptest::prelude::*;

    fn classic() -> Grid {
        MazeConfig::default().build_grid().unwrap()
    }

    /// Bellman-Ford style relaxation over every cell until nothing improves.
    fn relaxed_distance(grid: &Grid, origin: Cell, goal: Cell) -> Option<usize> {
        let mut dist: Vec<Option<usize>> = vec![None; grid.len()];
        dist[grid.index(origin)] = Some(0);
        for _ in 0..grid.len() {
            let mut changed = false;
            for row in 0..grid.height() {
                for col in 0..grid.width() {
                    let cell = Cell::new(row, col);
                    let Some(d) = dist[grid.index(cell)] else {
                        continue;
                    };
                    for next in grid.neighbors(cell) {
                        let idx = grid.index(next);
                        if dist[idx].is_none_or(|old| d + 1 < old) {
                            dist[idx] = Some(d + 1);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist[grid.index(goal)]
    }

    #[test]
    fn test_classic_maze_distance() {
        let grid = classic();
        assert_eq!(min_steps(&grid, Cell::new(0, 0), Cell::new(4, 4)), Some(12));
        assert_eq!(min_steps(&grid, Cell::new(2, 0), Cell::new(4, 4)), Some(8));
        assert_eq!(min_steps(&grid, Cell::new(0, 4), Cell::new(4, 4)), Some(6));
    }

    #[test]
    fn test_origin_is_goal() {
        let grid = classic();
        assert_eq!(min_steps(&grid, Cell::new(4, 4), Cell::new(4, 4)), Some(0));
    }

    #[test]
    fn test_unreachable_goal() {
        let mut grid = classic();
        grid.set_wall(Cell::new(3, 4), true);
        assert_eq!(min_steps(&grid, Cell::new(0, 0), Cell::new(4, 4)), None);
        assert_eq!(shortest_path(&grid, Cell::new(0, 0), Cell::new(4, 4)), None);
    }

    #[test]
    fn test_blocked_or_outside_endpoints() {
        let grid = classic();
        assert_eq!(min_steps(&grid, Cell::new(1, 0), Cell::new(4, 4)), None);
        assert_eq!(min_steps(&grid, Cell::new(0, 0), Cell::new(9, 9)), None);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let grid = classic();
        let a = min_steps(&grid, Cell::new(0, 0), Cell::new(4, 4));
        let b = min_steps(&grid, Cell::new(0, 0), Cell::new(4, 4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shortest_path_is_walkable() {
        let grid = classic();
        let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        assert_eq!(path.len(), 13);
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(4, 4)));
        for pair in path.windows(2) {
            assert!(grid.neighbors(pair[0]).any(|n| n == pair[1]));
        }
    }

    fn grid_strategy() -> impl Strategy<Value = Grid> {
        (1usize..=6, 1usize..=6).prop_flat_map(|(w, h)| {
            prop::collection::vec(prop::bool::weighted(0.3), w * h).prop_map(move |cells| {
                let rows: Vec<Vec<u8>> = cells
                    .chunks(w)
                    .map(|r| r.iter().map(|&b| u8::from(b)).collect())
                    .collect();
                Grid::from_rows(&rows).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_bfs_matches_relaxation(grid in grid_strategy(), a in 0usize..36, b in 0usize..36) {
            let origin = Cell::new(a / 6 % grid.height(), a % grid.width());
            let goal = Cell::new(b / 6 % grid.height(), b % grid.width());
            prop_assume!(grid.is_open(origin) && grid.is_open(goal));

            let expected = relaxed_distance(&grid, origin, goal);

            prop_assert_eq!(min_steps(&grid, origin, goal), expected);
            let path = shortest_path(&grid, origin, goal);
            prop_assert_eq!(path.map(|p| p.len() - 1), expected);
        }
    }
}
