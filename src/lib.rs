//! Edge path routing for node canvases.
//!
//! Given two canvas points and a style, produces SVG path data for the edge
//! between them. The `step-smart` style routes an orthogonal path around
//! node footprints with a grid A* search.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod path;
pub mod render;
pub mod route_dump;
pub mod routing;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RouterConfig, load_config};
pub use ir::{CanvasEdge, CanvasNode, HandleSide, PathStyle, Point, Scene};
pub use path::{bezier_path, polyline_path, straight_path};
pub use routing::{
    Anchored, RouteOptions, get_path, get_path_with, smart_step_path, smart_step_path_with,
    smart_step_points, step_path,
};
pub use scene::{RoutedEdge, SceneError, route_scene, route_scene_as};
pub use theme::Theme;
