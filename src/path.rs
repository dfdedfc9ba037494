//! SVG path data builders shared by every edge style.

use std::fmt;
use std::fmt::Write as _;

use crate::ir::Point;

/// Fraction of the shorter axis delta used to push bezier control points
/// away from the endpoints.
const BEZIER_CONTROL_RATIO: f64 = 0.5;

/// Formats a coordinate the way a JS host prints numbers: shortest
/// round-trip form, no trailing `.0`, no negative zero.
#[derive(Clone, Copy)]
pub(crate) struct Coord(pub f64);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            f.write_str("0")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            write!(f, "{v}")
        }
    }
}

/// `M source L target`, with the endpoints written exactly.
pub fn straight_path(source: Point, target: Point) -> String {
    format!(
        "M {} {} L {} {}",
        Coord(source.x),
        Coord(source.y),
        Coord(target.x),
        Coord(target.y)
    )
}

/// Cubic S-curve between two points.
///
/// The control points sit vertically above/below the endpoints, offset by
/// half of `min(|dx|, |dy|)`; axis-aligned segments collapse to a straight
/// curve.
pub fn bezier_path(source: Point, target: Point) -> String {
    let dx = (target.x - source.x).abs();
    let dy = (target.y - source.y).abs();
    let offset = dx.min(dy) * BEZIER_CONTROL_RATIO;

    let c1 = Point::new(source.x, source.y + offset);
    let c2 = Point::new(target.x, target.y - offset);

    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        Coord(source.x),
        Coord(source.y),
        Coord(c1.x),
        Coord(c1.y),
        Coord(c2.x),
        Coord(c2.y),
        Coord(target.x),
        Coord(target.y)
    )
}

/// `M p0 L p1 L p2 ...`; empty input yields an empty string.
pub fn polyline_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut d = String::with_capacity(points.len() * 16);
    let _ = write!(d, "M {} {}", Coord(first.x), Coord(first.y));
    for point in rest {
        let _ = write!(d, " L {} {}", Coord(point.x), Coord(point.y));
    }
    d
}
