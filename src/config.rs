use crate::ir::PathStyle;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Tuning for the obstacle-aware router.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Canvas units per grid cell.
    pub grid_size: f64,
    /// Margin added around source, target and every obstacle anchor when
    /// sizing the search region.
    pub bounds_padding: f64,
    /// Assumed node footprint, centred on the node anchor.
    pub node_width: f64,
    pub node_height: f64,
    /// Clearance kept between routed edges and node borders.
    pub node_padding: f64,
    /// Largest ring searched when an endpoint lands on a blocked cell.
    pub walkable_search_radius: usize,
    /// Grids above this many cells are not searched; the plain step path is
    /// used instead. Capped at `routing::GRID_CELL_LIMIT`.
    pub max_grid_cells: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            bounds_padding: 200.0,
            node_width: 120.0,
            node_height: 60.0,
            node_padding: 80.0,
            walkable_search_radius: 5,
            max_grid_cells: 4_000_000,
        }
    }
}

impl RouterConfig {
    /// Resolves the effective cell size: the per-call override when it is a
    /// usable positive number, else the configured size, else the default.
    pub fn cell_size(&self, requested: Option<f64>) -> f64 {
        requested
            .filter(|size| size.is_finite() && *size > 0.0)
            .or(Some(self.grid_size).filter(|size| size.is_finite() && *size > 0.0))
            .unwrap_or(DEFAULT_GRID_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Blank space kept around the scene in previews.
    pub margin: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin: 40.0,
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub router: RouterConfig,
    pub render: RenderConfig,
    /// Style forced onto every edge, overriding the scene's own `pathType`.
    pub path_type: Option<PathStyle>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RouterConfigFile {
    grid_size: Option<f64>,
    bounds_padding: Option<f64>,
    node_width: Option<f64>,
    node_height: Option<f64>,
    node_padding: Option<f64>,
    walkable_search_radius: Option<usize>,
    max_grid_cells: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    background_color: Option<String>,
    node_background_color: Option<String>,
    node_border_color: Option<String>,
    node_text_color: Option<String>,
    edge_color: Option<String>,
    edge_width: Option<f32>,
    grid_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeFile>,
    router: Option<RouterConfigFile>,
    path_type: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    margin: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Overlays a JSON (or JSON5) config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "default" || theme_name == "light" {
            config.theme = Theme::canvas_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background_color {
            config.theme.background = v;
        }
        if let Some(v) = vars.node_background_color {
            config.theme.node_background = v;
        }
        if let Some(v) = vars.node_border_color {
            config.theme.node_border = v;
        }
        if let Some(v) = vars.node_text_color {
            config.theme.node_text_color = v;
        }
        if let Some(v) = vars.edge_color {
            config.theme.edge_color = v;
        }
        if let Some(v) = vars.edge_width {
            config.theme.edge_width = v;
        }
        if let Some(v) = vars.grid_color {
            config.theme.grid_color = v;
        }
    }
    config.render.background = config.theme.background.clone();

    if let Some(router) = parsed.router {
        if let Some(v) = router.grid_size {
            config.router.grid_size = v;
        }
        if let Some(v) = router.bounds_padding {
            config.router.bounds_padding = v;
        }
        if let Some(v) = router.node_width {
            config.router.node_width = v;
        }
        if let Some(v) = router.node_height {
            config.router.node_height = v;
        }
        if let Some(v) = router.node_padding {
            config.router.node_padding = v;
        }
        if let Some(v) = router.walkable_search_radius {
            config.router.walkable_search_radius = v;
        }
        if let Some(v) = router.max_grid_cells {
            config.router.max_grid_cells = v;
        }
    }

    if let Some(style) = parsed.path_type.as_deref() {
        config.path_type = Some(PathStyle::from(style));
    }
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }
    if let Some(v) = parsed.margin {
        config.render.margin = v;
    }

    Ok(config)
}
