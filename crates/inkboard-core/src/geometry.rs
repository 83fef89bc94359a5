//! Stateless geometry and hit-testing helpers.
//!
//! Bounds are plain [`kurbo::Rect`] values (`x0`/`y0` = min corner,
//! `x1`/`y1` = max corner).

use kurbo::{Point, Rect, Vec2};

/// Tolerance used to classify segments as parallel.
pub const EPSILON: f64 = 1e-6;

/// 2D cross product of two vectors.
fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Smallest axis-aligned rectangle containing all points.
/// Returns [`Rect::ZERO`] for an empty slice.
pub fn bounds_from_points(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| {
            Rect::new(
                acc.x0.min(p.x),
                acc.y0.min(p.y),
                acc.x1.max(p.x),
                acc.y1.max(p.y),
            )
        })
}

/// Union of an arbitrary number of rectangles, `None` if there are none.
pub fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

/// Test if segments (a-b) and (c-d) intersect.
///
/// Uses the parametric form `a + t(b - a) = c + u(d - c)` and accepts
/// `t, u ∈ [0, 1]`. Parallel segments only intersect when they are
/// collinear (perpendicular offset within [`EPSILON`]) and overlap.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let r = b - a;
    let s = d - c;
    let ac = c - a;
    let denom = cross(r, s);

    if denom.abs() < EPSILON {
        // Parallel: reject unless collinear.
        if cross(ac, r).abs() >= EPSILON {
            return false;
        }
        let len_sq = r.hypot2();
        if len_sq < EPSILON {
            // a-b is a point; it intersects if it lies on c-d.
            return point_to_segment_dist(a, c, d) < EPSILON;
        }
        let t0 = ac.dot(r) / len_sq;
        let t1 = (d - a).dot(r) / len_sq;
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        return hi >= -EPSILON && lo <= 1.0 + EPSILON;
    }

    let t = cross(ac, s) / denom;
    let u = cross(ac, r) / denom;
    (-EPSILON..=1.0 + EPSILON).contains(&t) && (-EPSILON..=1.0 + EPSILON).contains(&u)
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Whether two rectangles overlap. Touching edges count as overlapping.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// The four edges of a rectangle, clockwise from the top edge.
pub fn rect_edges(rect: Rect) -> [(Point, Point); 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

/// Test whether the segment (a-b) crosses an edge of `rect`,
/// with the rectangle grown by `threshold` on every side.
pub fn segment_hits_rect(a: Point, b: Point, rect: Rect, threshold: f64) -> bool {
    let rect = rect.inflate(threshold, threshold);
    rect_edges(rect)
        .iter()
        .any(|&(c, d)| segments_intersect(a, b, c, d))
}

/// Test if any segment of a polyline crosses a rectangle or lies inside it.
pub fn polyline_intersects_rect(points: &[Point], rect: Rect) -> bool {
    if points.iter().any(|p| rect.contains(*p)) {
        return true;
    }
    points
        .windows(2)
        .any(|w| segment_hits_rect(w[0], w[1], rect, 0.0))
}

/// Rotate `point` around `center` by `angle` radians.
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    Point::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.x * sin + d.y * cos,
    )
}

/// Axis-aligned bounds of `rect` after rotating it around its center.
pub fn rotated_bounds(rect: Rect, rotation: f64) -> Rect {
    if rotation.abs() < f64::EPSILON {
        return rect;
    }
    let center = rect.center();
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
    .map(|p| rotate_point(p, center, rotation));
    bounds_from_points(&corners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_segments() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_disjoint_segments() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(5.0, 0.0),
            Point::new(6.0, -3.0),
        ));
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 1.0),
        ));
    }

    #[test]
    fn test_collinear_overlap() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(15.0, 0.0),
        ));
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(11.0, 0.0),
            Point::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_touching_endpoint() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_point_to_segment_projection() {
        let d = point_to_segment_dist(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_to_segment_clamps() {
        let d = point_to_segment_dist(
            Point::new(13.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_to_degenerate_segment() {
        let p = Point::new(3.0, 4.0);
        let d = point_to_segment_dist(p, Point::ZERO, Point::ZERO);
        assert!((d - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_segment_hits_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(segment_hits_rect(
            Point::new(-5.0, 5.0),
            Point::new(5.0, 5.0),
            rect,
            0.0
        ));
        assert!(!segment_hits_rect(
            Point::new(-5.0, -5.0),
            Point::new(-1.0, -1.0),
            rect,
            0.0
        ));
        // Threshold grows the box.
        assert!(segment_hits_rect(
            Point::new(-3.0, -5.0),
            Point::new(-3.0, 15.0),
            rect,
            4.0
        ));
    }

    #[test]
    fn test_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(a, Rect::new(5.0, 5.0, 20.0, 20.0)));
        assert!(rects_overlap(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!rects_overlap(a, Rect::new(11.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_bounds_from_points() {
        let b = bounds_from_points(&[
            Point::new(3.0, 7.0),
            Point::new(-1.0, 2.0),
            Point::new(5.0, 4.0),
        ]);
        assert_eq!(b, Rect::new(-1.0, 2.0, 5.0, 7.0));
        assert_eq!(bounds_from_points(&[]), Rect::ZERO);
    }

    #[test]
    fn test_rotated_bounds_quarter_turn() {
        let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
        let b = rotated_bounds(rect, std::f64::consts::FRAC_PI_2);
        assert!((b.width() - 10.0).abs() < 1e-9);
        assert!((b.height() - 20.0).abs() < 1e-9);
        assert!((b.center().x - 10.0).abs() < 1e-9);
        assert!((b.center().y - 5.0).abs() < 1e-9);
    }
}
