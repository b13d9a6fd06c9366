use super::{Point3, Vector3, DOWN, TOLERANCE, UP};

/// Returns the normalized direction from `a` to `b`, or `None` when the
/// points are coincident.
#[must_use]
pub fn direction(a: &Point3, b: &Point3) -> Option<Vector3> {
    normalize(b - a)
}

/// Returns `v / |v|`, or `None` when `v` is shorter than [`TOLERANCE`].
#[must_use]
pub fn normalize(v: Vector3) -> Option<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}

/// Returns the normalized horizontal perpendicular of `dir` (`dir × DOWN`).
///
/// The cross product with the vertical axis discards any vertical component
/// of `dir`, so the result always lies in the ground plane. `None` when
/// `dir` is vertical or zero.
#[must_use]
pub fn perpendicular(dir: &Vector3) -> Option<Vector3> {
    normalize(dir.cross(&DOWN))
}

/// Projects `v` onto the ground plane (zeroes the vertical component).
#[must_use]
pub fn flatten(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, 0.0, v.z)
}

/// Unsigned angle between two vectors, in degrees. Zero when either vector
/// is degenerate.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < TOLERANCE {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Signed turn angle from `from` to `to` about the [`UP`] axis, in degrees,
/// in `[-180, 180]`. The sign follows `UP · (from × to)`.
#[must_use]
pub fn signed_turn_angle(from: &Vector3, to: &Vector3) -> f64 {
    let unsigned = angle_between(from, to);
    if UP.dot(&from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn direction_is_unit_length() {
        let d = direction(&p(0.0, 0.0, 0.0), &p(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(d.z, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn direction_of_coincident_points_is_none() {
        assert!(direction(&p(1.0, 2.0, 3.0), &p(1.0, 2.0, 3.0)).is_none());
    }

    #[test]
    fn perpendicular_is_horizontal() {
        // Forward along X+ gives a perpendicular along Z-.
        let perp = perpendicular(&Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((perp.z + 1.0).abs() < 1e-12);
        assert!(perp.y.abs() < 1e-12);

        // A sloped direction still yields a horizontal perpendicular.
        let perp = perpendicular(&Vector3::new(1.0, 0.5, 0.0).normalize()).unwrap();
        assert!(perp.y.abs() < 1e-12);
        assert!((perp.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_of_vertical_is_none() {
        assert!(perpendicular(&Vector3::new(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn signed_turn_angle_sign_convention() {
        let fwd = Vector3::new(1.0, 0.0, 0.0);
        let left = Vector3::new(0.0, 0.0, 1.0);
        // cross(X+, Z+) = Y-, so turning toward Z+ is negative.
        assert_relative_eq!(signed_turn_angle(&fwd, &left), -90.0, epsilon = 1e-9);
        assert_relative_eq!(signed_turn_angle(&left, &fwd), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn angle_between_opposite_vectors() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(-1.0, 0.0, 0.0);
        assert_relative_eq!(angle_between(&a, &b), 180.0, epsilon = 1e-9);
    }
}
