use crate::ir::Point;
use crate::path::polyline_path;

/// The four corners of the vertical-horizontal-vertical route through the
/// vertical midpoint between `source` and `target`.
pub(crate) fn step_points(source: Point, target: Point) -> [Point; 4] {
    let mid_y = source.y + (target.y - source.y) / 2.0;
    [
        source,
        Point::new(source.x, mid_y),
        Point::new(target.x, mid_y),
        target,
    ]
}

/// Orthogonal path with no obstacle awareness. Always three segments, even
/// when the endpoints share an axis.
pub fn step_path(source: Point, target: Point) -> String {
    polyline_path(&step_points(source, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Point::new(0.0, 0.0), Point::new(500.0, 500.0))]
    #[case(Point::new(10.0, 0.0), Point::new(10.0, 300.0))]
    #[case(Point::new(0.0, 40.0), Point::new(300.0, 40.0))]
    #[case(Point::new(200.0, 200.0), Point::new(-50.0, -80.0))]
    #[case(Point::new(7.0, 7.0), Point::new(7.0, 7.0))]
    fn always_three_segments(#[case] source: Point, #[case] target: Point) {
        let d = step_path(source, target);
        assert_eq!(d.matches('M').count(), 1);
        assert_eq!(d.matches('L').count(), 3);
    }

    #[test]
    fn bends_at_vertical_midpoint() {
        let d = step_path(Point::new(0.0, 0.0), Point::new(500.0, 500.0));
        assert_eq!(d, "M 0 0 L 0 250 L 500 250 L 500 500");
    }

    #[test]
    fn level_endpoints_produce_collinear_corners() {
        let pts = step_points(Point::new(0.0, 40.0), Point::new(300.0, 40.0));
        assert!(pts.iter().all(|p| p.y == 40.0));
    }
}
