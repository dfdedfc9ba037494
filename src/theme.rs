use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub node_background: String,
    pub node_border: String,
    pub node_text_color: String,
    pub edge_color: String,
    pub edge_width: f32,
    pub grid_color: String,
}

impl Theme {
    /// Colours of the host canvas component out of the box.
    pub fn canvas_default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#ffffff".to_string(),
            node_background: "#f9f9f9".to_string(),
            node_border: "#d0d0d0".to_string(),
            node_text_color: "#1C2430".to_string(),
            edge_color: "#999999".to_string(),
            edge_width: 2.0,
            grid_color: "#e0e0e0".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            node_background: "#2a2a2a".to_string(),
            node_border: "#444444".to_string(),
            node_text_color: "#eeeeee".to_string(),
            edge_color: "#8a8a8a".to_string(),
            grid_color: "#333333".to_string(),
            ..Self::canvas_default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::canvas_default()
    }
}
