use tracing::debug;

use crate::math::{Point3, TOLERANCE, UP};
use crate::terrain::{drop_to_surface, raycast_chord, HeightQuery};

/// Sampling step (world units) for chord raycasts and crest search.
const SAMPLE_STEP: f64 = 0.2;

/// Inserts corrective height points where the road chord cuts into terrain.
///
/// A straight segment between two surface-projected points can pass through
/// a terrain bulge between them. Each pass detects such segments by casting
/// the chord in both directions against the height field and, when both
/// casts hit, inserts the highest terrain point of the intruding span so
/// the road climbs over the bulge instead of through it.
#[derive(Debug)]
pub struct ResolveClipping {
    points: Vec<Point3>,
    passes: u32,
    ground_offset: f64,
}

impl ResolveClipping {
    /// Creates a new clipping-resolution operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, passes: u32, ground_offset: f64) -> Self {
        Self {
            points,
            passes,
            ground_offset,
        }
    }

    /// Executes the resolution, returning the expanded point list.
    #[must_use]
    pub fn execute<Q: HeightQuery>(&self, terrain: &Q) -> Vec<Point3> {
        let mut points = self.points.clone();
        for _ in 0..self.passes {
            if points.len() < 2 {
                break;
            }
            let expanded = self.resolve_pass(&points, terrain);
            if expanded.len() == points.len() {
                break;
            }
            debug!(
                before = points.len(),
                after = expanded.len(),
                "inserted clipping correction points"
            );
            points = expanded;
        }
        points
    }

    fn resolve_pass<Q: HeightQuery>(&self, points: &[Point3], terrain: &Q) -> Vec<Point3> {
        let mut out: Vec<Point3> = Vec::with_capacity(points.len() + 4);

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            out.push(a);

            let lift = UP * self.ground_offset;
            let start = drop_to_surface(terrain, &a) + lift;
            let end = drop_to_surface(terrain, &b) + lift;

            // Insertion requires a hit from both directions; a chord that
            // merely grazes terrain at one end is left alone.
            let Some(hit_fwd) = raycast_chord(terrain, &start, &end, SAMPLE_STEP) else {
                continue;
            };
            let Some(hit_back) = raycast_chord(terrain, &end, &start, SAMPLE_STEP) else {
                continue;
            };

            if let Some(crest) = highest_surface_point(terrain, &hit_fwd, &hit_back) {
                out.push(crest);
            }
        }

        if let Some(last) = points.last() {
            out.push(*last);
        }
        out
    }
}

/// Samples terrain columns along the span between two hit points and
/// returns the highest surface point found.
fn highest_surface_point<Q: HeightQuery>(
    terrain: &Q,
    from: &Point3,
    to: &Point3,
) -> Option<Point3> {
    let span = to - from;
    let len = span.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = span / len;

    let mut crest: Option<Point3> = None;
    let mut t = 0.0;
    while t < len {
        let sample = from + dir * t;
        if let Some(height) = terrain.height_at(sample.x, sample.z) {
            if crest.is_none_or(|c| height >= c.y) {
                crest = Some(Point3::new(sample.x, height, sample.z));
            }
        }
        t += SAMPLE_STEP;
    }
    crest
}
