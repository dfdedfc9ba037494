use crate::config::RouterConfig;
use crate::ir::Point;

/// Hard ceiling on grid cells, whatever the configured limit.
pub const GRID_CELL_LIMIT: usize = 16_000_000;

/// Canvas-space rectangle the search grid covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SearchBounds {
    /// Smallest box holding the endpoints and every anchor, grown by
    /// `padding` on each side.
    pub fn around<I>(source: Point, target: Point, anchors: I, padding: f64) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut bounds = Self {
            min_x: source.x.min(target.x),
            max_x: source.x.max(target.x),
            min_y: source.y.min(target.y),
            max_y: source.y.max(target.y),
        };
        for p in anchors {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds.min_x -= padding;
        bounds.max_x += padding;
        bounds.min_y -= padding;
        bounds.max_y += padding;
        bounds
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
    }
}

/// Padded rectangle an obstacle occupies around its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Footprint {
    pub fn from_config(config: &RouterConfig) -> Self {
        Self {
            width: config.node_width,
            height: config.node_height,
            padding: config.node_padding,
        }
    }

    fn half_extents(&self) -> (f64, f64) {
        (
            (self.width + self.padding * 2.0) / 2.0,
            (self.height + self.padding * 2.0) / 2.0,
        )
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub gx: usize,
    pub gy: usize,
}

impl GridCoord {
    pub const fn new(gx: usize, gy: usize) -> Self {
        Self { gx, gy }
    }

    pub fn manhattan(self, other: GridCoord) -> usize {
        self.gx.abs_diff(other.gx) + self.gy.abs_diff(other.gy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub coord: GridCoord,
    pub walkable: bool,
}

/// Uniform grid over [`SearchBounds`] with obstacle footprints rasterised
/// as unwalkable cells. Cells are stored row-major.
#[derive(Debug, Clone)]
pub struct ObstacleGrid {
    cell_size: f64,
    min_x: f64,
    min_y: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl ObstacleGrid {
    /// An all-walkable grid, or `None` when the bounds are not finite or the
    /// grid would hold more than `max_cells` cells (never more than
    /// [`GRID_CELL_LIMIT`]).
    pub fn new(bounds: SearchBounds, cell_size: f64, max_cells: usize) -> Option<Self> {
        if !bounds.is_finite() || !cell_size.is_finite() || cell_size <= 0.0 {
            return None;
        }
        let cols_f = ((bounds.max_x - bounds.min_x) / cell_size).ceil().max(1.0);
        let rows_f = ((bounds.max_y - bounds.min_y) / cell_size).ceil().max(1.0);
        let limit = max_cells.min(GRID_CELL_LIMIT);
        if cols_f * rows_f > limit as f64 {
            return None;
        }
        let cols = cols_f as usize;
        let rows = rows_f as usize;
        let total = cols.checked_mul(rows).filter(|&total| total <= limit)?;
        let mut cells = Vec::with_capacity(total);
        for gy in 0..rows {
            for gx in 0..cols {
                cells.push(Cell {
                    coord: GridCoord::new(gx, gy),
                    walkable: true,
                });
            }
        }
        Some(Self {
            cell_size,
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            cols,
            rows,
            cells,
        })
    }

    /// Builds the grid and blocks the padded footprint of every anchor.
    pub fn build<I>(
        anchors: I,
        bounds: SearchBounds,
        cell_size: f64,
        footprint: Footprint,
        max_cells: usize,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut grid = Self::new(bounds, cell_size, max_cells)?;
        for anchor in anchors {
            grid.block_footprint(anchor, footprint);
        }
        Some(grid)
    }

    /// Marks every cell touched by the footprint centred on `anchor`.
    /// Spans are floor/ceil of the padded extents; whatever falls outside
    /// the grid is skipped.
    pub fn block_footprint(&mut self, anchor: Point, footprint: Footprint) {
        let (half_w, half_h) = footprint.half_extents();
        let start_x = ((anchor.x - half_w - self.min_x) / self.cell_size).floor();
        let end_x = ((anchor.x + half_w - self.min_x) / self.cell_size).ceil();
        let start_y = ((anchor.y - half_h - self.min_y) / self.cell_size).floor();
        let end_y = ((anchor.y + half_h - self.min_y) / self.cell_size).ceil();
        let Some((x0, x1)) = clamp_span(start_x, end_x, self.cols) else {
            return;
        };
        let Some((y0, y1)) = clamp_span(start_y, end_y, self.rows) else {
            return;
        };
        for gy in y0..=y1 {
            for gx in x0..=x1 {
                let idx = self.index(GridCoord::new(gx, gy));
                self.cells[idx].walkable = false;
            }
        }
    }

    pub fn set_walkable(&mut self, coord: GridCoord, walkable: bool) {
        if self.contains(coord) {
            let idx = self.index(coord);
            self.cells[idx].walkable = walkable;
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.gx < self.cols && coord.gy < self.rows
    }

    pub(crate) fn index(&self, coord: GridCoord) -> usize {
        coord.gy * self.cols + coord.gx
    }

    pub(crate) fn coord_at(&self, idx: usize) -> GridCoord {
        self.cells[idx].coord
    }

    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        if !self.contains(coord) {
            return None;
        }
        self.cells.get(self.index(coord))
    }

    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.walkable)
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.walkable).count()
    }

    /// Cell under a canvas point, clamped into the grid. NaN maps to 0.
    pub fn to_grid(&self, point: Point) -> GridCoord {
        let gx = ((point.x - self.min_x) / self.cell_size).floor();
        let gy = ((point.y - self.min_y) / self.cell_size).floor();
        GridCoord::new(clamp_index(gx, self.cols), clamp_index(gy, self.rows))
    }

    /// Canvas position of a cell's top-left corner.
    pub fn to_canvas(&self, coord: GridCoord) -> Point {
        Point::new(
            coord.gx as f64 * self.cell_size + self.min_x,
            coord.gy as f64 * self.cell_size + self.min_y,
        )
    }

    /// Walkable 4-neighbours in up, down, left, right order.
    pub fn walkable_neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        let GridCoord { gx, gy } = coord;
        let up = (gy > 0).then(|| GridCoord::new(gx, gy - 1));
        let down = (gy + 1 < self.rows).then(|| GridCoord::new(gx, gy + 1));
        let left = (gx > 0).then(|| GridCoord::new(gx - 1, gy));
        let right = (gx + 1 < self.cols).then(|| GridCoord::new(gx + 1, gy));
        [up, down, left, right]
            .into_iter()
            .flatten()
            .filter(|n| self.is_walkable(*n))
    }
}

fn clamp_index(value: f64, len: usize) -> usize {
    let max = len.saturating_sub(1) as f64;
    // `f64::max` discards NaN, so NaN lands on 0.
    value.max(0.0).min(max) as usize
}

fn clamp_span(start: f64, end: f64, len: usize) -> Option<(usize, usize)> {
    if start.is_nan() || end.is_nan() || len == 0 {
        return None;
    }
    let lo = start.max(0.0);
    let hi = end.min((len - 1) as f64);
    if lo > hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> SearchBounds {
        SearchBounds {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[test]
    fn bounds_pad_every_input() {
        let b = SearchBounds::around(
            Point::new(0.0, 0.0),
            Point::new(300.0, 0.0),
            [Point::new(150.0, -40.0), Point::new(-20.0, 90.0)],
            200.0,
        );
        assert_eq!(b, bounds(-220.0, 500.0, -240.0, 290.0));
    }

    #[test]
    fn dimensions_round_up_and_never_vanish() {
        let grid = ObstacleGrid::new(bounds(0.0, 101.0, 0.0, 40.0), 20.0, 10_000).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (6, 2));
        let tiny = ObstacleGrid::new(bounds(5.0, 5.0, 5.0, 5.0), 20.0, 10_000).unwrap();
        assert_eq!((tiny.cols(), tiny.rows()), (1, 1));
    }

    #[test]
    fn refuses_oversized_or_non_finite_grids() {
        assert!(ObstacleGrid::new(bounds(0.0, 1000.0, 0.0, 1000.0), 1.0, 10_000).is_none());
        assert!(ObstacleGrid::new(bounds(0.0, f64::INFINITY, 0.0, 10.0), 1.0, 10_000).is_none());
        assert!(ObstacleGrid::new(bounds(0.0, f64::NAN, 0.0, 10.0), 1.0, 10_000).is_none());
    }

    #[test]
    fn unbounded_cell_limit_is_still_capped() {
        let huge = bounds(0.0, 1.0e12, 0.0, 1.0e12);
        assert!(ObstacleGrid::new(huge, 1.0, usize::MAX).is_none());
        let wide = bounds(0.0, 1.0e300, 0.0, 1.0);
        assert!(ObstacleGrid::new(wide, 1.0, usize::MAX).is_none());
        let fits = ObstacleGrid::new(bounds(0.0, 200.0, 0.0, 200.0), 20.0, usize::MAX).unwrap();
        assert_eq!(fits.len(), 100);
    }

    #[test]
    fn single_obstacle_blocks_a_contiguous_rectangle() {
        let b = SearchBounds::around(Point::new(0.0, 0.0), Point::new(0.0, 0.0), std::iter::empty(), 400.0);
        let grid = ObstacleGrid::build(
            [Point::new(0.0, 0.0)],
            b,
            20.0,
            Footprint::default(),
            1_000_000,
        )
        .unwrap();
        // 280 x 220 padded box around (0,0) on a grid starting at -400.
        // x: floor(260/20)=13 ..= ceil(540/20)=27, y: floor(290/20)=14 ..= ceil(510/20)=26
        let center = grid.to_grid(Point::new(0.0, 0.0));
        assert!(!grid.is_walkable(center));
        for gy in 0..grid.rows() {
            for gx in 0..grid.cols() {
                let inside = (13..=27).contains(&gx) && (14..=26).contains(&gy);
                assert_eq!(
                    grid.is_walkable(GridCoord::new(gx, gy)),
                    !inside,
                    "cell ({gx},{gy})"
                );
            }
        }
        assert_eq!(grid.blocked_count(), 15 * 13);
    }

    #[test]
    fn overlapping_obstacles_are_idempotent_and_clipped() {
        let b = bounds(0.0, 200.0, 0.0, 200.0);
        let footprint = Footprint {
            width: 40.0,
            height: 40.0,
            padding: 0.0,
        };
        let mut grid = ObstacleGrid::build(
            [Point::new(190.0, 190.0)],
            b,
            20.0,
            footprint,
            10_000,
        )
        .unwrap();
        let once = grid.blocked_count();
        grid.block_footprint(Point::new(190.0, 190.0), footprint);
        assert_eq!(grid.blocked_count(), once);
        // Span 8..=11 clipped to the last column/row index 9.
        assert_eq!(once, 4);
        grid.block_footprint(Point::new(-500.0, -500.0), footprint);
        assert_eq!(grid.blocked_count(), once);
    }

    #[test]
    fn maps_between_canvas_and_grid() {
        let grid = ObstacleGrid::new(bounds(-200.0, 500.0, -200.0, 200.0), 20.0, 10_000).unwrap();
        assert_eq!(grid.to_grid(Point::new(0.0, 0.0)), GridCoord::new(10, 10));
        assert_eq!(grid.to_grid(Point::new(9999.0, -9999.0)), GridCoord::new(34, 0));
        assert_eq!(grid.to_grid(Point::new(f64::NAN, 0.0)), GridCoord::new(0, 10));
        assert_eq!(grid.to_canvas(GridCoord::new(10, 10)), Point::new(0.0, 0.0));
    }

    #[test]
    fn neighbors_skip_edges_and_blocked_cells() {
        let mut grid = ObstacleGrid::new(bounds(0.0, 60.0, 0.0, 60.0), 20.0, 100).unwrap();
        grid.set_walkable(GridCoord::new(1, 0), false);
        let corner: Vec<_> = grid.walkable_neighbors(GridCoord::new(0, 0)).collect();
        assert_eq!(corner, vec![GridCoord::new(0, 1)]);
        let middle: Vec<_> = grid.walkable_neighbors(GridCoord::new(1, 1)).collect();
        assert_eq!(
            middle,
            vec![
                GridCoord::new(1, 2),
                GridCoord::new(0, 1),
                GridCoord::new(2, 1)
            ]
        );
    }
}
