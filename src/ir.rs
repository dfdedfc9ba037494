use serde::{Deserialize, Serialize};

/// A canvas-space coordinate pair.
///
/// Missing components deserialize to `0.0` so host documents with partial
/// positions still route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Edge rendering style.
///
/// Parsing never fails: any identifier other than the four known ones
/// (including an empty or absent one) selects [`PathStyle::Bezier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStyle {
    Straight,
    #[default]
    Bezier,
    Step,
    StepSmart,
}

impl PathStyle {
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some("straight") => PathStyle::Straight,
            Some("bezier") => PathStyle::Bezier,
            Some("step") => PathStyle::Step,
            Some("step-smart") => PathStyle::StepSmart,
            _ => PathStyle::Bezier,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PathStyle::Straight => "straight",
            PathStyle::Bezier => "bezier",
            PathStyle::Step => "step",
            PathStyle::StepSmart => "step-smart",
        }
    }
}

impl From<&str> for PathStyle {
    fn from(id: &str) -> Self {
        PathStyle::from_id(Some(id))
    }
}

impl<'de> Deserialize<'de> for PathStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(PathStyle::from_id(raw.as_ref().and_then(|v| v.as_str())))
    }
}

/// Side of a node footprint an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    fn parse_or(raw: Option<&str>, fallback: HandleSide) -> HandleSide {
        match raw {
            Some("top") => HandleSide::Top,
            Some("bottom") => HandleSide::Bottom,
            Some("left") => HandleSide::Left,
            Some("right") => HandleSide::Right,
            _ => fallback,
        }
    }
}

/// A node as the host canvas stores it.
///
/// The position may come either nested (`position: {x, y}`) or flat
/// (`positionX`/`positionY`); the nested form wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CanvasNode {
    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// Canvas anchor of the node; absent coordinates read as `0`.
    pub fn anchor(&self) -> Point {
        if let Some(position) = self.position {
            return position;
        }
        Point::new(
            self.position_x.unwrap_or(0.0),
            self.position_y.unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl CanvasEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn source_side(&self) -> HandleSide {
        HandleSide::parse_or(self.source_handle.as_deref(), HandleSide::Bottom)
    }

    pub fn target_side(&self) -> HandleSide {
        HandleSide::parse_or(self.target_handle.as_deref(), HandleSide::Top)
    }
}

/// A canvas document: nodes, the edges between them and the edge style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default, alias = "initialNodes")]
    pub nodes: Vec<CanvasNode>,
    #[serde(default, alias = "initialEdges")]
    pub edges: Vec<CanvasEdge>,
    #[serde(default)]
    pub path_type: PathStyle,
}

impl Scene {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

// Host documents carry `null` for cleared coordinates.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()))
}
