//! Polyline clean-up for orthogonal wire paths.

use wiregrid_core::Point;

/// Removes every interior point that is horizontally or vertically colinear
/// with both of its neighbours in the input.
///
/// The first and last points are always kept; inputs of two points or fewer
/// are returned unchanged.
pub fn simplify_path(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(3) {
        let (a, b, c) = (w[0], w[1], w[2]);
        let vertical = a.x == b.x && b.x == c.x;
        let horizontal = a.y == b.y && b.y == c.y;
        if !(vertical || horizontal) {
            out.push(b);
        }
    }
    out.push(points[points.len() - 1]);
    out
}

/// Drops points equal to their predecessor.
pub fn dedup_consecutive(points: &mut Vec<Point>) {
    points.dedup_by(|b, a| a == b);
}

/// Splits every diagonal segment into two right angles through its midpoint.
///
/// The split runs along the dominant axis first: a mostly horizontal segment
/// becomes horizontal-vertical-horizontal.
pub fn fix_diagonal_segments(points: &[Point]) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(points.len() + 4);
    out.push(*first);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.x != b.x && a.y != b.y {
            let mid_x = (a.x + b.x) / 2.0;
            let mid_y = (a.y + b.y) / 2.0;
            if (a.x - b.x).abs() > (a.y - b.y).abs() {
                out.push(Point::new(mid_x, a.y));
                out.push(Point::new(mid_x, b.y));
            } else {
                out.push(Point::new(a.x, mid_y));
                out.push(Point::new(b.x, mid_y));
            }
        }
        out.push(b);
    }
    out
}

/// Expands an orthogonal polyline into one point per cell step so that every
/// crossed cell can be registered.
pub fn densify(points: &[Point], step: f64) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut out = vec![*first];
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let span = (b.x - a.x).abs().max((b.y - a.y).abs());
        let steps = (span / step).ceil().max(1.0) as usize;
        let n = steps as f64;
        for i in 1..=steps {
            let k = i as f64;
            out.push(Point::new(
                a.x + (b.x - a.x) * k / n,
                a.y + (b.y - a.y) * k / n,
            ));
        }
    }
    out
}
