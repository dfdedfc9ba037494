//! Routes every edge of a host canvas document.

use serde::Serialize;
use thiserror::Error;

use crate::config::RouterConfig;
use crate::ir::{CanvasNode, HandleSide, PathStyle, Point, Scene};
use crate::routing::{RouteOptions, get_path_with, smart_step_path_with};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownNode { edge: String, node: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub style: PathStyle,
    pub start: Point,
    pub end: Point,
    pub path: String,
}

/// Where a handle sits on the node footprint centred on the node anchor.
pub fn handle_point(node: &CanvasNode, side: HandleSide, config: &RouterConfig) -> Point {
    let anchor = node.anchor();
    let half_w = config.node_width / 2.0;
    let half_h = config.node_height / 2.0;
    match side {
        HandleSide::Top => Point::new(anchor.x, anchor.y - half_h),
        HandleSide::Bottom => Point::new(anchor.x, anchor.y + half_h),
        HandleSide::Left => Point::new(anchor.x - half_w, anchor.y),
        HandleSide::Right => Point::new(anchor.x + half_w, anchor.y),
    }
}

/// Routes all edges in the scene's own style.
pub fn route_scene(scene: &Scene, config: &RouterConfig) -> Result<Vec<RoutedEdge>, SceneError> {
    route_scene_as(scene, scene.path_type, RouteOptions::default(), config)
}

/// Routes all edges in `style`, passing every node as an obstacle to the
/// smart step router.
pub fn route_scene_as(
    scene: &Scene,
    style: PathStyle,
    options: RouteOptions,
    config: &RouterConfig,
) -> Result<Vec<RoutedEdge>, SceneError> {
    let lookup = |edge: &str, id: &str| {
        scene.node(id).ok_or_else(|| SceneError::UnknownNode {
            edge: edge.to_string(),
            node: id.to_string(),
        })
    };

    let mut routed = Vec::with_capacity(scene.edges.len());
    for edge in &scene.edges {
        let from = lookup(&edge.id, &edge.source)?;
        let to = lookup(&edge.id, &edge.target)?;
        let start = handle_point(from, edge.source_side(), config);
        let end = handle_point(to, edge.target_side(), config);
        let path = match style {
            PathStyle::StepSmart => {
                smart_step_path_with(start, end, &scene.nodes, options, config)
            }
            other => get_path_with(other, start, end, &scene.nodes, config),
        };
        routed.push(RoutedEdge {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            style,
            start,
            end,
            path,
        });
    }
    Ok(routed)
}
