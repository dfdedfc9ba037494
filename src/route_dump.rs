use crate::ir::{PathStyle, Scene};
use crate::scene::RoutedEdge;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDump {
    pub path_type: PathStyle,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub d: String,
}

impl RouteDump {
    pub fn from_routes(scene: &Scene, routes: &[RoutedEdge]) -> Self {
        let nodes = scene
            .nodes
            .iter()
            .map(|node| {
                let anchor = node.anchor();
                NodeDump {
                    id: node.id.clone(),
                    x: anchor.x,
                    y: anchor.y,
                }
            })
            .collect();

        let edges = routes
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                start: [edge.start.x, edge.start.y],
                end: [edge.end.x, edge.end.y],
                d: edge.path.clone(),
            })
            .collect();

        RouteDump {
            path_type: routes.first().map(|edge| edge.style).unwrap_or(scene.path_type),
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_route_dump(path: &Path, scene: &Scene, routes: &[RoutedEdge]) -> anyhow::Result<()> {
    let dump = RouteDump::from_routes(scene, routes);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
