use crate::math::direction::{angle_between, direction, perpendicular};
use crate::math::{Point3, Vector3};

/// Rounds the corners of a control-point path by inserting flanking points.
///
/// Each pass walks the path and, for every interior corner, inserts an
/// approach point before it and a departure point after it, pulling the
/// ribbon into a rounded turn. Endpoints receive a single easing point
/// toward their neighbor. Passes compound: every pass operates on the
/// previous pass's expanded list. Original control points are never
/// removed.
#[derive(Debug)]
pub struct SmoothPath {
    points: Vec<Point3>,
    passes: u32,
    max_offset: f64,
}

impl SmoothPath {
    /// Creates a new smoothing operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, passes: u32, max_offset: f64) -> Self {
        Self {
            points,
            passes,
            max_offset,
        }
    }

    /// Executes the smoothing, returning the expanded point list.
    ///
    /// With zero passes or fewer than 2 points the input is returned
    /// unchanged.
    #[must_use]
    pub fn execute(&self) -> Vec<Point3> {
        let mut points = self.points.clone();
        for _ in 0..self.passes {
            if points.len() < 2 {
                break;
            }
            points = smooth_pass(&points, self.max_offset);
        }
        points
    }
}

/// Expands one pass over `points`, returning the new list.
///
/// The backward neighbor of each interior corner is the point *previously
/// pushed to the output* — for consecutive corners that is the departure
/// point of the corner before it, which tightens chained turns.
fn smooth_pass(points: &[Point3], max_offset: f64) -> Vec<Point3> {
    let n = points.len();
    let mut out: Vec<Point3> = Vec::with_capacity(n * 3);

    // Ease away from the first point.
    out.push(points[0]);
    if let Some(dir) = direction(&points[0], &points[1]) {
        let reach = flank_reach(&points[0], &points[1], max_offset);
        out.push(points[0] + dir * reach);
    }

    for i in 1..n - 1 {
        let b = points[i];
        let c = points[i + 1];
        // Last point already in the output, not the original neighbor.
        let a = out[out.len() - 1];

        let (Some(back), Some(fwd)) = (direction(&b, &a), direction(&b, &c)) else {
            out.push(b);
            continue;
        };

        // Perpendicular of the corner bisector, pointed toward the
        // backward direction. A collinear corner has a zero bisector and
        // gets no lateral bias.
        let bis = back + fwd;
        let mut perp = perpendicular(&bis).unwrap_or_else(Vector3::zeros);
        if angle_between(&perp, &fwd) < angle_between(&perp, &back) {
            perp = -perp;
        }

        let reach_in = flank_reach(&a, &b, max_offset);
        let reach_out = flank_reach(&c, &b, max_offset);
        out.push(b + (back + perp) * reach_in);
        out.push(b);
        out.push(b + (fwd - perp) * reach_out);
    }

    // Ease into the last point.
    let last = points[n - 1];
    let a = out[out.len() - 1];
    if let Some(dir) = direction(&last, &a) {
        let reach = flank_reach(&a, &last, max_offset);
        out.push(last + dir * reach);
    }
    out.push(last);

    out
}

/// Distance from a corner to its flanking point: a quarter of the segment
/// length, clamped to `max_offset`.
fn flank_reach(a: &Point3, b: &Point3, max_offset: f64) -> f64 {
    ((a - b).norm() / 4.0).min(max_offset)
}
