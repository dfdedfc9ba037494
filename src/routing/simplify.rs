use super::grid::GridCoord;

fn direction(from: GridCoord, to: GridCoord) -> (i8, i8) {
    let sign = |a: usize, b: usize| match b.cmp(&a) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    };
    (sign(from.gx, to.gx), sign(from.gy, to.gy))
}

/// Drops every interior cell where the path keeps its heading, leaving the
/// endpoints and the corners. Paths of two cells or fewer come back as is.
pub fn simplify(path: &[GridCoord]) -> Vec<GridCoord> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for window in path.windows(3) {
        let [prev, curr, next] = [window[0], window[1], window[2]];
        if direction(prev, curr) != direction(curr, next) {
            out.push(curr);
        }
    }
    out.push(path[path.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[(usize, usize)]) -> Vec<GridCoord> {
        raw.iter().map(|&(gx, gy)| GridCoord::new(gx, gy)).collect()
    }

    #[test]
    fn short_paths_are_untouched() {
        assert!(simplify(&[]).is_empty());
        let one = cells(&[(3, 3)]);
        assert_eq!(simplify(&one), one);
        let two = cells(&[(0, 0), (5, 0)]);
        assert_eq!(simplify(&two), two);
    }

    #[test]
    fn keeps_only_corners() {
        let path = cells(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1)]);
        assert_eq!(simplify(&path), cells(&[(0, 0), (0, 2), (2, 2), (2, 1)]));
    }

    #[test]
    fn straight_run_collapses_to_endpoints() {
        let path = cells(&[(0, 4), (1, 4), (2, 4), (3, 4)]);
        assert_eq!(simplify(&path), cells(&[(0, 4), (3, 4)]));
    }

    #[test]
    fn simplifying_twice_changes_nothing() {
        let path = cells(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (3, 2),
            (4, 2),
            (4, 1),
            (4, 0),
        ]);
        let once = simplify(&path);
        assert_eq!(simplify(&once), once);
        assert_eq!(once, cells(&[(0, 0), (2, 0), (2, 2), (4, 2), (4, 0)]));
    }

    #[test]
    fn uneven_steps_along_one_heading_still_collapse() {
        let path = cells(&[(0, 0), (1, 0), (3, 0), (7, 0)]);
        let once = simplify(&path);
        assert_eq!(once, cells(&[(0, 0), (7, 0)]));
        assert_eq!(simplify(&once), once);
    }
}
