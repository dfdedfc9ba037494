use canvas_edge_router::{
    CanvasNode, PathStyle, Point, RouteOptions, get_path as edge_path, smart_step_path,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgePathOptions {
    grid_size: Option<f64>,
}

fn parse<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|error| error.to_string())
}

fn build_path(
    path_type: Option<&str>,
    source_json: &str,
    target_json: &str,
    nodes_json: Option<&str>,
    options_json: Option<&str>,
) -> Result<String, String> {
    let source: Point = parse(source_json)?;
    let target: Point = parse(target_json)?;
    let nodes: Vec<CanvasNode> = match nodes_json {
        Some(raw) => parse::<Option<Vec<CanvasNode>>>(raw)?.unwrap_or_default(),
        None => Vec::new(),
    };
    let options = match options_json {
        Some(raw) => parse::<Option<EdgePathOptions>>(raw)?.unwrap_or_default(),
        None => EdgePathOptions::default(),
    };

    let style = PathStyle::from_id(path_type);
    if style == PathStyle::StepSmart {
        let route_options = RouteOptions {
            grid_size: options.grid_size,
        };
        return Ok(smart_step_path(source, target, &nodes, route_options));
    }
    Ok(edge_path(style, source, target, &nodes))
}

/// SVG path data for an edge between two canvas points.
#[wasm_bindgen]
pub fn get_path(
    path_type: Option<String>,
    source_json: &str,
    target_json: &str,
    nodes_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    build_path(
        path_type.as_deref(),
        source_json,
        target_json,
        nodes_json.as_deref(),
        options_json.as_deref(),
    )
    .map_err(|error| JsValue::from_str(&error))
}
