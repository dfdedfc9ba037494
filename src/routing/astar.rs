use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use super::grid::{GridCoord, ObstacleGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    Unseen,
    Open,
    Closed,
}

/// Per-search bookkeeping for one grid cell. Lives in an arena parallel to
/// the grid's cells and is dropped when the search returns.
#[derive(Debug, Clone, Copy)]
struct SearchCell {
    g: usize,
    h: usize,
    f: usize,
    parent: Option<usize>,
    state: CellState,
    /// Order in which the cell first entered the open set.
    seq: usize,
}

impl SearchCell {
    const UNSEEN: Self = Self {
        g: 0,
        h: 0,
        f: 0,
        parent: None,
        state: CellState::Unseen,
        seq: 0,
    };
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    f: usize,
    seq: usize,
    idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lowest f first, then earliest opened.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one grid search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPath {
    /// Cells from start to goal. When the goal was unreachable this is the
    /// two-cell stand-in `[start, goal]`.
    pub cells: Vec<GridCoord>,
    pub reached: bool,
    /// Cells moved to the closed set.
    pub expanded: usize,
}

/// A* over the 4-connected walkable cells with unit step cost and a
/// Manhattan heuristic.
///
/// Closed cells are never reopened. Among open cells with equal `f` the one
/// opened first is expanded first, so the result is fully deterministic.
/// A blocked start is still expanded; a blocked goal is simply never reached.
pub fn find_path(grid: &ObstacleGrid, start: GridCoord, goal: GridCoord) -> GridPath {
    let fallback = |expanded| GridPath {
        cells: vec![start, goal],
        reached: false,
        expanded,
    };
    if !grid.contains(start) || !grid.contains(goal) {
        return fallback(0);
    }

    let mut arena = vec![SearchCell::UNSEEN; grid.len()];
    let mut open = BinaryHeap::new();
    let mut next_seq = 0usize;
    let mut expanded = 0usize;

    let start_idx = grid.index(start);
    let goal_idx = grid.index(goal);
    let h = start.manhattan(goal);
    arena[start_idx] = SearchCell {
        g: 0,
        h,
        f: h,
        parent: None,
        state: CellState::Open,
        seq: next_seq,
    };
    open.push(OpenEntry {
        f: h,
        seq: next_seq,
        idx: start_idx,
    });
    next_seq += 1;

    while let Some(entry) = open.pop() {
        let current = arena[entry.idx];
        // Superseded by a cheaper entry for the same cell.
        if current.state != CellState::Open || current.f != entry.f {
            continue;
        }

        if entry.idx == goal_idx {
            trace!("grid search reached goal after {expanded} expansions");
            return GridPath {
                cells: reconstruct(grid, &arena, goal_idx),
                reached: true,
                expanded,
            };
        }

        arena[entry.idx].state = CellState::Closed;
        expanded += 1;

        let coord = grid.coord_at(entry.idx);
        for neighbor in grid.walkable_neighbors(coord) {
            let n_idx = grid.index(neighbor);
            let node = &mut arena[n_idx];
            if node.state == CellState::Closed {
                continue;
            }
            let tentative = current.g + 1;
            if node.state == CellState::Unseen || tentative < node.g {
                if node.state == CellState::Unseen {
                    node.state = CellState::Open;
                    node.seq = next_seq;
                    next_seq += 1;
                }
                node.parent = Some(entry.idx);
                node.g = tentative;
                node.h = neighbor.manhattan(goal);
                node.f = node.g + node.h;
                open.push(OpenEntry {
                    f: node.f,
                    seq: node.seq,
                    idx: n_idx,
                });
            }
        }
    }

    trace!("grid search exhausted after {expanded} expansions");
    fallback(expanded)
}

fn reconstruct(grid: &ObstacleGrid, arena: &[SearchCell], goal_idx: usize) -> Vec<GridCoord> {
    let mut cells = Vec::new();
    let mut cursor = Some(goal_idx);
    while let Some(idx) = cursor {
        cells.push(grid.coord_at(idx));
        cursor = arena[idx].parent;
    }
    cells.reverse();
    cells
}

/// First walkable cell around `origin`, scanning square rings of radius
/// `1..=max_radius` row by row. Returns `origin` itself when it is walkable
/// or when nothing walkable lies within reach.
pub fn nearest_walkable(grid: &ObstacleGrid, origin: GridCoord, max_radius: usize) -> GridCoord {
    if grid.is_walkable(origin) {
        return origin;
    }
    let ox = origin.gx as i64;
    let oy = origin.gy as i64;
    for radius in 1..=max_radius as i64 {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() != radius && dy.abs() != radius {
                    continue;
                }
                let (nx, ny) = (ox + dx, oy + dy);
                if nx < 0 || ny < 0 {
                    continue;
                }
                let candidate = GridCoord::new(nx as usize, ny as usize);
                if grid.is_walkable(candidate) {
                    return candidate;
                }
            }
        }
    }
    origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::grid::SearchBounds;

    fn open_grid(cols: usize, rows: usize) -> ObstacleGrid {
        let bounds = SearchBounds {
            min_x: 0.0,
            max_x: cols as f64 * 10.0,
            min_y: 0.0,
            max_y: rows as f64 * 10.0,
        };
        ObstacleGrid::new(bounds, 10.0, cols * rows).expect("grid fits")
    }

    fn c(gx: usize, gy: usize) -> GridCoord {
        GridCoord::new(gx, gy)
    }

    fn assert_connected(path: &[GridCoord]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn straight_run_on_open_grid() {
        let grid = open_grid(6, 3);
        let result = find_path(&grid, c(0, 1), c(5, 1));
        assert!(result.reached);
        assert_eq!(result.cells.len(), 6);
        assert!(result.cells.iter().all(|cell| cell.gy == 1));
    }

    #[test]
    fn shortest_detour_around_wall() {
        let mut grid = open_grid(7, 7);
        for gy in 0..6 {
            grid.set_walkable(c(3, gy), false);
        }
        let result = find_path(&grid, c(0, 0), c(6, 0));
        assert!(result.reached);
        assert_connected(&result.cells);
        assert_eq!(result.cells.first(), Some(&c(0, 0)));
        assert_eq!(result.cells.last(), Some(&c(6, 0)));
        // Down to row 6, across, back up.
        assert_eq!(result.cells.len(), 6 + 6 + 6 + 1);
        assert!(result.cells.iter().all(|cell| grid.is_walkable(*cell)));
    }

    #[test]
    fn start_equal_to_goal_is_a_single_cell() {
        let grid = open_grid(3, 3);
        let result = find_path(&grid, c(1, 1), c(1, 1));
        assert!(result.reached);
        assert_eq!(result.cells, vec![c(1, 1)]);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut grid = open_grid(12, 12);
        for gx in 2..10 {
            grid.set_walkable(c(gx, 5), false);
        }
        let first = find_path(&grid, c(0, 0), c(11, 11));
        let second = find_path(&grid, c(0, 0), c(11, 11));
        assert_eq!(first, second);
    }

    #[test]
    fn equal_scores_expand_in_opening_order() {
        // Down is opened before right, so on an open grid the route to a
        // diagonal goal runs down the first column, then along the last row.
        let grid = open_grid(3, 3);
        let result = find_path(&grid, c(0, 0), c(2, 2));
        assert_eq!(
            result.cells,
            vec![c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]
        );
    }

    #[test]
    fn disconnected_goal_falls_back_to_two_cells() {
        let mut grid = open_grid(8, 8);
        for gy in 0..8 {
            for gx in 0..8 {
                grid.set_walkable(c(gx, gy), false);
            }
        }
        grid.set_walkable(c(1, 1), true);
        grid.set_walkable(c(6, 6), true);
        let result = find_path(&grid, c(1, 1), c(6, 6));
        assert!(!result.reached);
        assert_eq!(result.cells, vec![c(1, 1), c(6, 6)]);
        assert_eq!(result.expanded, 1);
    }

    #[test]
    fn blocked_goal_is_never_reached() {
        let mut grid = open_grid(5, 5);
        grid.set_walkable(c(4, 4), false);
        let result = find_path(&grid, c(0, 0), c(4, 4));
        assert!(!result.reached);
        assert_eq!(result.expanded, 24);
    }

    #[test]
    fn nearest_walkable_scans_rings_row_major() {
        let mut grid = open_grid(9, 9);
        for gy in 2..=6 {
            for gx in 2..=6 {
                grid.set_walkable(c(gx, gy), false);
            }
        }
        assert_eq!(nearest_walkable(&grid, c(0, 0), 5), c(0, 0));
        // Radius 1 and 2 rings are all blocked; radius 3 starts at (1, 1).
        assert_eq!(nearest_walkable(&grid, c(4, 4), 5), c(1, 1));
        assert_eq!(nearest_walkable(&grid, c(4, 4), 2), c(4, 4));
        assert_eq!(nearest_walkable(&grid, c(2, 2), 5), c(1, 1));
    }

    #[test]
    fn nearest_walkable_skips_cells_off_the_grid() {
        let mut grid = open_grid(4, 4);
        grid.set_walkable(c(0, 0), false);
        grid.set_walkable(c(1, 0), false);
        assert_eq!(nearest_walkable(&grid, c(0, 0), 5), c(0, 1));
    }
}
