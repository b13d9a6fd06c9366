use tracing::debug;

use crate::math::{Point3, TOLERANCE};

/// Column height query against the terrain surface.
///
/// This is the seam between the generator and whatever owns the terrain
/// (a physics raycast, a noise field, a loaded height map). Queries are
/// blocking; a `None` answer means the column holds no terrain at all and
/// callers fall back to the unprojected position.
pub trait HeightQuery {
    /// Returns the height of the highest terrain surface in the vertical
    /// column at `(x, z)`, or `None` when the column misses the terrain.
    fn height_at(&self, x: f64, z: f64) -> Option<f64>;
}

impl<F> HeightQuery for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self(x, z)
    }
}

/// Drops `point` onto the terrain surface in its column.
///
/// A missed query is not an error: the point is returned unchanged and the
/// miss is reported as a debug event.
pub fn drop_to_surface<Q: HeightQuery + ?Sized>(terrain: &Q, point: &Point3) -> Point3 {
    match terrain.height_at(point.x, point.z) {
        Some(y) => Point3::new(point.x, y, point.z),
        None => {
            debug!(x = point.x, z = point.z, "height query missed, keeping original height");
            *point
        }
    }
}

/// Marches the chord from `from` toward `to` against the height field and
/// returns the first sample where the terrain rises above the chord,
/// evaluated at the terrain surface. `None` when the chord stays clear.
///
/// The sample at the origin itself is skipped: chord endpoints sit on (or
/// just above) the surface and would otherwise always register.
pub fn raycast_chord<Q: HeightQuery + ?Sized>(
    terrain: &Q,
    from: &Point3,
    to: &Point3,
    step: f64,
) -> Option<Point3> {
    let span = to - from;
    let len = span.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = span / len;

    let mut t = step;
    while t < len {
        let sample = from + dir * t;
        if let Some(height) = terrain.height_at(sample.x, sample.z) {
            if height > sample.y + TOLERANCE {
                return Some(Point3::new(sample.x, height, sample.z));
            }
        }
        t += step;
    }
    None
}
