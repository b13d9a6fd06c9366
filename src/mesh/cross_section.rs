use crate::error::{PathError, Result};
use crate::math::direction::{flatten, normalize, perpendicular, signed_turn_angle};
use crate::math::{Point3, Vector3, UP};
use crate::terrain::{drop_to_surface, HeightQuery};

/// Turns within this many degrees of a straight reversal fall back to the
/// outgoing-segment perpendicular instead of the (degenerate) bisector.
const REVERSAL_MARGIN_DEG: f64 = 2.0;

/// Left/right rail vertex pair at one path point.
#[derive(Debug, Clone, Copy)]
pub struct CrossSection {
    pub left: Point3,
    pub right: Point3,
}

/// Computes the rail vertex pair for every path point.
///
/// The cross-section direction at interior points miters the turn; the
/// rails are dropped onto the terrain and lifted clear of it, with the
/// pair raised further when the terrain crowns above their average under
/// the centerline.
#[derive(Debug)]
pub struct BuildCrossSections {
    points: Vec<Point3>,
    width: f64,
    ground_offset: f64,
}

impl BuildCrossSections {
    /// Creates a new cross-section operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, width: f64, ground_offset: f64) -> Self {
        Self {
            points,
            width,
            ground_offset,
        }
    }

    /// Executes the computation, one [`CrossSection`] per input point.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InsufficientInput`] for fewer than 2 points.
    pub fn execute<Q: HeightQuery>(&self, terrain: &Q) -> Result<Vec<CrossSection>> {
        let n = self.points.len();
        if n < 2 {
            return Err(PathError::InsufficientInput { needed: 2, got: n }.into());
        }

        let mut sections = Vec::with_capacity(n);
        // Degenerate segments reuse the last valid direction; a degenerate
        // leading segment falls back to the X axis.
        let mut last_dir = Vector3::x();

        for i in 0..n {
            let dir = self
                .section_direction(i)
                .unwrap_or(last_dir);
            last_dir = dir;
            sections.push(self.section_at(&self.points[i], &dir, terrain));
        }

        Ok(sections)
    }

    /// Cross-section direction at point `i`, or `None` when degenerate.
    ///
    /// Turn evaluation uses horizontally-flattened segment directions so a
    /// sloping path cannot tilt the rails off the ground plane.
    fn section_direction(&self, i: usize) -> Option<Vector3> {
        let points = &self.points;
        let n = points.len();

        if i == 0 {
            return perpendicular(&(points[1] - points[0]));
        }
        if i == n - 1 {
            return perpendicular(&(points[n - 1] - points[n - 2]));
        }

        let back = flatten(&(points[i - 1] - points[i]));
        let fwd = flatten(&(points[i + 1] - points[i]));

        let angle = signed_turn_angle(&back, &fwd);
        // Tuned sign convention, kept as-is: turns shallower than -90
        // mirror the bisector to the outside of the turn.
        let sign = if angle > -90.0 { -1.0 } else { 1.0 };

        if (angle.abs() - 180.0).abs() < REVERSAL_MARGIN_DEG {
            // Near-reversal (includes straight runs): the bisector is
            // degenerate, use the outgoing perpendicular.
            perpendicular(&fwd)
        } else {
            let bisector = normalize(back)? + normalize(fwd)?;
            normalize(bisector * sign)
        }
    }

    /// Builds the rail pair at `center` along `dir`.
    fn section_at<Q: HeightQuery>(
        &self,
        center: &Point3,
        dir: &Vector3,
        terrain: &Q,
    ) -> CrossSection {
        let half = self.width * 0.5;
        let left = drop_to_surface(terrain, &(center - dir * half));
        let right = drop_to_surface(terrain, &(center + dir * half));

        // When the terrain crowns under the centerline, the projected rails
        // straddle the crown below it; raise the pair until their average
        // meets the crown.
        let center_height = terrain
            .height_at(center.x, center.z)
            .unwrap_or(center.y);
        let average = f64::midpoint(left.y, right.y);
        let crown_lift = (center_height - average).max(0.0);

        let raise = UP * (self.ground_offset + crown_lift);
        CrossSection {
            left: left + raise,
            right: right + raise,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn flat(_x: f64, _z: f64) -> Option<f64> {
        Some(0.0)
    }

    fn no_terrain(_x: f64, _z: f64) -> Option<f64> {
        None
    }

    // ── Direction ──────────────────────────────────────────────

    #[test]
    fn straight_path_rails_are_perpendicular() {
        let points = vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)];
        let sections = BuildCrossSections::new(points, 4.0, 0.0)
            .execute(&flat)
            .unwrap();

        for section in &sections {
            // Rails sit at z = ±2 around the X-axis centerline.
            assert!((section.left.z.abs() - 2.0).abs() < 1e-9);
            assert!((section.right.z.abs() - 2.0).abs() < 1e-9);
            assert!((section.left.z + section.right.z).abs() < 1e-9);
        }
    }

    #[test]
    fn right_angle_corner_miters_between_perpendiculars() {
        let points = vec![p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0), p(5.0, 0.0, 5.0)];
        let sections = BuildCrossSections::new(points, 2.0, 0.0)
            .execute(&flat)
            .unwrap();

        let corner = &sections[1];
        let offset = corner.right - p(5.0, 0.0, 0.0);
        // Incoming perpendicular is ±Z, outgoing is ±X; the miter must mix
        // both components instead of collapsing to either axis.
        assert!(offset.x.abs() > 1e-6, "miter lost its X component");
        assert!(offset.z.abs() > 1e-6, "miter lost its Z component");
        assert!(
            (offset.x.abs() - offset.z.abs()).abs() < 1e-9,
            "a 90 degree turn miters along the diagonal"
        );
    }

    #[test]
    fn collinear_interior_uses_outgoing_perpendicular() {
        let points = vec![p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0), p(10.0, 0.0, 0.0)];
        let sections = BuildCrossSections::new(points, 4.0, 0.0)
            .execute(&flat)
            .unwrap();

        let mid = &sections[1];
        assert!((mid.left.z.abs() - 2.0).abs() < 1e-9);
        assert!((mid.right.z.abs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rails_stay_half_width_from_centerline() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(4.0, 0.0, 1.0),
            p(8.0, 0.0, -1.0),
            p(12.0, 0.0, 2.0),
        ];
        let width = 3.0;
        let sections = BuildCrossSections::new(points.clone(), width, 0.0)
            .execute(&flat)
            .unwrap();

        for (section, center) in sections.iter().zip(&points) {
            let l = flatten(&(section.left - center)).norm();
            let r = flatten(&(section.right - center)).norm();
            assert!((l - width / 2.0).abs() < 1e-9, "left offset {l}");
            assert!((r - width / 2.0).abs() < 1e-9, "right offset {r}");
        }
    }

    #[test]
    fn degenerate_segment_reuses_previous_direction() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(5.0, 0.0, 0.0),
            p(5.0, 0.0, 0.0),
            p(10.0, 0.0, 0.0),
        ];
        let sections = BuildCrossSections::new(points, 4.0, 0.0)
            .execute(&flat)
            .unwrap();

        // No NaN anywhere, and the duplicated point still gets a full pair.
        for section in &sections {
            assert!(section.left.coords.iter().all(|c| c.is_finite()));
            assert!(section.right.coords.iter().all(|c| c.is_finite()));
        }
        assert_eq!(sections.len(), 4);
    }

    // ── Terrain reconciliation ─────────────────────────────────

    #[test]
    fn rails_follow_terrain_height() {
        let slope = |x: f64, _z: f64| Some(x * 0.5);
        let points = vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)];
        let sections = BuildCrossSections::new(points, 4.0, 0.1)
            .execute(&slope)
            .unwrap();

        // Rails offset along Z see the same height on an X-slope.
        assert!((sections[0].left.y - 0.1).abs() < 1e-9);
        assert!((sections[1].left.y - 5.1).abs() < 1e-9);
    }

    #[test]
    fn centerline_crown_lifts_both_rails() {
        // A sharp ridge along the X axis: high under the centerline, ground
        // level under both rails.
        let ridge = |_x: f64, z: f64| {
            if z.abs() < 0.5 {
                Some(3.0)
            } else {
                Some(0.0)
            }
        };
        let points = vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)];
        let sections = BuildCrossSections::new(points, 4.0, 0.0)
            .execute(&ridge)
            .unwrap();

        // Projected rails average 0; the crown at 3 lifts both by 3.
        for section in &sections {
            assert!((section.left.y - 3.0).abs() < 1e-9);
            assert!((section.right.y - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_terrain_keeps_original_heights() {
        let points = vec![p(0.0, 1.5, 0.0), p(10.0, 1.5, 0.0)];
        let sections = BuildCrossSections::new(points, 4.0, 0.2)
            .execute(&no_terrain)
            .unwrap();

        for section in &sections {
            assert!((section.left.y - 1.7).abs() < 1e-9);
            assert!((section.right.y - 1.7).abs() < 1e-9);
        }
    }

    // ── Errors ─────────────────────────────────────────────────

    #[test]
    fn one_point_fails() {
        let result = BuildCrossSections::new(vec![p(0.0, 0.0, 0.0)], 4.0, 0.0).execute(&flat);
        assert!(result.is_err());
    }
}
