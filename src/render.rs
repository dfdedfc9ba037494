use crate::config::{Config, RenderConfig};
use crate::ir::Scene;
use crate::path::Coord;
use crate::scene::RoutedEdge;
use anyhow::Result;
use std::path::Path;

/// Canvas-space box `(min_x, min_y, max_x, max_y)` holding every node
/// footprint and edge endpoint.
fn scene_extent(scene: &Scene, routes: &[RoutedEdge], config: &Config) -> (f64, f64, f64, f64) {
    let half_w = config.router.node_width / 2.0;
    let half_h = config.router.node_height / 2.0;
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for node in &scene.nodes {
        let a = node.anchor();
        min_x = min_x.min(a.x - half_w);
        min_y = min_y.min(a.y - half_h);
        max_x = max_x.max(a.x + half_w);
        max_y = max_y.max(a.y + half_h);
    }
    for edge in routes {
        for p in [edge.start, edge.end] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return (0.0, 0.0, 0.0, 0.0);
    }
    (min_x, min_y, max_x, max_y)
}

/// Preview of a routed scene: node footprints with labels, then every edge.
pub fn render_svg(scene: &Scene, routes: &[RoutedEdge], config: &Config) -> String {
    let theme = &config.theme;
    let margin = config.render.margin.max(0.0) as f64;
    let (min_x, min_y, max_x, max_y) = scene_extent(scene, routes, config);
    let vx = min_x - margin;
    let vy = min_y - margin;
    let width = (max_x - min_x + margin * 2.0).max(200.0);
    let height = (max_y - min_y + margin * 2.0).max(200.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">",
        Coord(width),
        Coord(height),
        Coord(vx),
        Coord(vy),
        Coord(width),
        Coord(height)
    ));
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        Coord(vx),
        Coord(vy),
        config.render.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.edge_color
    ));
    let gs = config.router.cell_size(None);
    svg.push_str(&format!(
        "<pattern id=\"canvas-grid\" width=\"{}\" height=\"{}\" patternUnits=\"userSpaceOnUse\"><circle cx=\"1\" cy=\"1\" r=\"1\" fill=\"{}\"/></pattern>",
        Coord(gs),
        Coord(gs),
        theme.grid_color
    ));
    svg.push_str("</defs>");
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"url(#canvas-grid)\"/>",
        Coord(vx),
        Coord(vy),
        Coord(width),
        Coord(height)
    ));

    let w = config.router.node_width;
    let h = config.router.node_height;
    for node in &scene.nodes {
        let a = node.anchor();
        svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"8\" ry=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            Coord(a.x - w / 2.0),
            Coord(a.y - h / 2.0),
            Coord(w),
            Coord(h),
            theme.node_background,
            theme.node_border
        ));
        let label = node.label.as_deref().unwrap_or(&node.id);
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            Coord(a.x),
            Coord(a.y),
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.node_text_color,
            escape_xml(label)
        ));
    }

    for edge in routes {
        svg.push_str(&format!(
            "<path data-edge=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#arrow)\"/>",
            escape_xml(&edge.id),
            edge.path,
            theme.edge_color,
            theme.edge_width
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid default render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
