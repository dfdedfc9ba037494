//! Edge path routing: dispatch over the four edge styles and the
//! obstacle-aware step router.
//!
//! Every entry point is synchronous and infallible. Each smart-step call
//! builds its own grid and search arena and drops both before returning;
//! nothing is cached between calls.

mod astar;
mod grid;
mod simplify;
mod step;

use log::{debug, trace, warn};

use crate::config::RouterConfig;
use crate::ir::{CanvasNode, PathStyle, Point};
use crate::path::{bezier_path, polyline_path, straight_path};

pub use astar::{GridPath, find_path, nearest_walkable};
pub use grid::{Cell, Footprint, GRID_CELL_LIMIT, GridCoord, ObstacleGrid, SearchBounds};
pub use simplify::simplify;
pub use step::step_path;

use step::step_points;

/// Anything that occupies canvas space around an anchor point.
pub trait Anchored {
    fn anchor(&self) -> Point;
}

impl Anchored for Point {
    fn anchor(&self) -> Point {
        *self
    }
}

impl Anchored for CanvasNode {
    fn anchor(&self) -> Point {
        CanvasNode::anchor(self)
    }
}

impl<T: Anchored + ?Sized> Anchored for &T {
    fn anchor(&self) -> Point {
        (**self).anchor()
    }
}

/// Per-call tuning for the smart step router.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteOptions {
    /// Cell size in canvas units; unusable values fall back to the
    /// configured size.
    pub grid_size: Option<f64>,
}

impl RouteOptions {
    pub fn with_grid_size(grid_size: f64) -> Self {
        Self {
            grid_size: Some(grid_size),
        }
    }
}

/// Path for one edge in the given style, using the default router settings.
pub fn get_path<S, O>(style: S, source: Point, target: Point, obstacles: &[O]) -> String
where
    S: Into<PathStyle>,
    O: Anchored,
{
    get_path_with(style, source, target, obstacles, &RouterConfig::default())
}

pub fn get_path_with<S, O>(
    style: S,
    source: Point,
    target: Point,
    obstacles: &[O],
    config: &RouterConfig,
) -> String
where
    S: Into<PathStyle>,
    O: Anchored,
{
    match style.into() {
        PathStyle::Straight => straight_path(source, target),
        PathStyle::Bezier => bezier_path(source, target),
        PathStyle::Step => step_path(source, target),
        PathStyle::StepSmart => {
            smart_step_path_with(source, target, obstacles, RouteOptions::default(), config)
        }
    }
}

/// Orthogonal path that detours around the padded footprints of `obstacles`.
pub fn smart_step_path<O: Anchored>(
    source: Point,
    target: Point,
    obstacles: &[O],
    options: RouteOptions,
) -> String {
    smart_step_path_with(source, target, obstacles, options, &RouterConfig::default())
}

pub fn smart_step_path_with<O: Anchored>(
    source: Point,
    target: Point,
    obstacles: &[O],
    options: RouteOptions,
    config: &RouterConfig,
) -> String {
    polyline_path(&smart_step_points(source, target, obstacles, options, config))
}

/// Canvas waypoints of the smart step route. The first and last points are
/// always exactly `source` and `target`.
///
/// Without obstacles this is the plain step route. When the grid search
/// cannot connect the endpoints the route is just `[source, target]`.
pub fn smart_step_points<O: Anchored>(
    source: Point,
    target: Point,
    obstacles: &[O],
    options: RouteOptions,
    config: &RouterConfig,
) -> Vec<Point> {
    if obstacles.is_empty() {
        return step_points(source, target).to_vec();
    }

    let cell_size = config.cell_size(options.grid_size);
    let bounds = SearchBounds::around(
        source,
        target,
        obstacles.iter().map(Anchored::anchor),
        config.bounds_padding,
    );
    let Some(grid) = ObstacleGrid::build(
        obstacles.iter().map(Anchored::anchor),
        bounds,
        cell_size,
        Footprint::from_config(config),
        config.max_grid_cells,
    ) else {
        warn!(
            "routing grid over {bounds:?} at cell size {cell_size} is unusable; using plain step path"
        );
        return step_points(source, target).to_vec();
    };
    trace!(
        "routing grid {}x{} ({} blocked) for {} obstacles",
        grid.cols(),
        grid.rows(),
        grid.blocked_count(),
        obstacles.len()
    );

    let start = resolve_endpoint(&grid, source, config.walkable_search_radius);
    let end = resolve_endpoint(&grid, target, config.walkable_search_radius);

    let found = find_path(&grid, start, end);
    if !found.reached {
        debug!(
            "no obstacle-free route from {start:?} to {end:?} after {} expansions",
            found.expanded
        );
    }
    let cells = simplify(&found.cells);
    if cells.len() < 2 {
        return vec![source, target];
    }

    let mut points: Vec<Point> = cells.iter().map(|&cell| grid.to_canvas(cell)).collect();
    let last = points.len() - 1;
    points[0] = source;
    points[last] = target;
    points
}

fn resolve_endpoint(grid: &ObstacleGrid, point: Point, radius: usize) -> GridCoord {
    let cell = grid.to_grid(point);
    let resolved = nearest_walkable(grid, cell, radius);
    if resolved != cell {
        debug!("endpoint {point:?} moved from blocked cell {cell:?} to {resolved:?}");
    } else if !grid.is_walkable(cell) {
        debug!("no walkable cell within {radius} of {cell:?}; searching from it anyway");
    }
    resolved
}
