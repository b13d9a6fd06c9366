use crate::error::{MeshError, PathError, Result};
use crate::math::direction::normalize;
use crate::math::{Point2, Point3, Vector3, DOWN, UP};

use super::{CrossSection, RoadMesh};

/// Inset keeping the top texture U coordinate off the ribbon edge.
const EDGE_INSET: f64 = 0.04;

/// Builds the final road mesh from cross-section rail pairs.
///
/// The flat ribbon comes first (two vertices per section), then the bottom
/// shell from side extrusion doubles the buffer; side quads and two end
/// caps close the volume. UVs accumulate longitudinal distance per rail
/// and normals are recomputed from the final triangle winding.
#[derive(Debug)]
pub struct AssembleRoad {
    sections: Vec<CrossSection>,
    thickness: f64,
    side_extrusion: f64,
    paint_distance: f64,
}

impl AssembleRoad {
    /// Creates a new assembly operation.
    #[must_use]
    pub fn new(
        sections: Vec<CrossSection>,
        thickness: f64,
        side_extrusion: f64,
        paint_distance: f64,
    ) -> Self {
        Self {
            sections,
            thickness,
            side_extrusion,
            paint_distance,
        }
    }

    /// Executes the assembly.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InsufficientInput`] for fewer than 2 sections
    /// and [`MeshError::GeometryCorruption`] if any vertex coordinate comes
    /// out non-finite.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<RoadMesh> {
        let n = self.sections.len();
        if n < 2 {
            return Err(PathError::InsufficientInput { needed: 2, got: n }.into());
        }

        // Flat ribbon: [left_0, right_0, left_1, right_1, ...]
        let mut vertices = Vec::with_capacity(n * 4);
        for section in &self.sections {
            vertices.push(section.left);
            vertices.push(section.right);
        }

        let mut indices: Vec<[u32; 3]> = Vec::with_capacity(n * 6);
        for i in 0..n - 1 {
            let t = (i * 2) as u32;
            indices.push([t, t + 2, t + 1]);
            indices.push([t + 1, t + 2, t + 3]);
        }

        self.extrude_sides(&mut vertices, &mut indices);
        let uvs = self.compute_uvs(&vertices);

        validate_finite(&vertices)?;
        let normals = vertex_normals(&vertices, &indices);

        Ok(RoadMesh {
            vertices,
            normals,
            uvs,
            indices,
        })
    }

    /// Extrudes the bottom shell and appends side and cap triangles.
    #[allow(clippy::cast_possible_truncation)]
    fn extrude_sides(&self, vertices: &mut Vec<Point3>, indices: &mut Vec<[u32; 3]>) {
        let n = vertices.len() / 2;
        let top = vertices.len();

        // Each rail vertex gets a bottom twin, sunk by the slab thickness
        // and pushed outward past the opposite rail.
        for i in 0..n {
            let left = vertices[i * 2];
            let right = vertices[i * 2 + 1];
            let outward = normalize(left - right).unwrap_or_else(Vector3::zeros);
            vertices.push(left + DOWN * self.thickness + outward * self.side_extrusion);
            vertices.push(right + DOWN * self.thickness - outward * self.side_extrusion);
        }

        // The boundary bottom pairs also lean outward longitudinally so the
        // end caps don't pinch against the top rim.
        let total = vertices.len();
        for (target, inner) in [
            (top, top + 2),
            (top + 1, top + 3),
            (total - 1, total - 3),
            (total - 2, total - 4),
        ] {
            let lean = normalize(vertices[target] - vertices[inner]).unwrap_or_else(Vector3::zeros);
            vertices[target] += lean * self.side_extrusion;
        }

        let v = top as u32;
        for i in 0..n - 1 {
            let t = (i * 2) as u32;
            let u = t + 2;
            // Left wall.
            indices.push([v + t, v + u, t]);
            indices.push([t, v + u, u]);
            // Right wall.
            indices.push([t + 1, u + 1, v + t + 1]);
            indices.push([v + t + 1, u + 1, v + u + 1]);
        }

        // End caps close the extruded volume.
        let len = total as u32;
        let half = len / 2;
        indices.push([len - 1, half - 1, len - 2]);
        indices.push([len - 2, half - 1, half - 2]);
        indices.push([half, 0, half + 1]);
        indices.push([half + 1, 0, 1]);
    }

    /// Accumulates longitudinal texture coordinates along both rails.
    ///
    /// Top rails use an inset U to avoid edge bleeding; the bottom shell
    /// reuses the same accumulation at exact U = 0/1, with the first bottom
    /// pair's V pinned to 0/1 to close the texture seam.
    fn compute_uvs(&self, vertices: &[Point3]) -> Vec<Point2> {
        let len = vertices.len();
        let half = len / 2;
        let mut uvs = vec![Point2::new(0.0, 0.0); len];
        uvs[1] = Point2::new(1.0, 0.0);

        let mut y_offset = 0.0;
        let mut i = 2;
        while i < half {
            let left_v = self.paint_length(&vertices[i], &vertices[i - 2]);
            let right_v = self.paint_length(&vertices[i + 1], &vertices[i - 1]);
            uvs[i] = Point2::new(EDGE_INSET, left_v + y_offset);
            uvs[i + 1] = Point2::new(1.0 - EDGE_INSET, right_v + y_offset);
            y_offset += f64::midpoint(left_v, right_v);
            i += 2;
        }
        while i < len {
            let left_v = self.paint_length(&vertices[i], &vertices[i - 2]);
            let right_v = self.paint_length(&vertices[i + 1], &vertices[i - 1]);
            uvs[i] = Point2::new(0.0, left_v + y_offset);
            uvs[i + 1] = Point2::new(1.0, right_v + y_offset);
            y_offset += f64::midpoint(left_v, right_v);
            i += 2;
        }

        uvs[half] = Point2::new(0.0, 0.0);
        uvs[half + 1] = Point2::new(1.0, 1.0);

        uvs
    }

    /// World distance between two vertices in texture-repeat units.
    fn paint_length(&self, a: &Point3, b: &Point3) -> f64 {
        (a - b).norm() / self.paint_distance
    }
}

/// Area-weighted vertex normals from the final triangle winding.
fn vertex_normals(vertices: &[Point3], indices: &[[u32; 3]]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];
    for tri in indices {
        let [a, b, c] = tri.map(|i| i as usize);
        let face = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for normal in &mut normals {
        *normal = normalize(*normal).unwrap_or(UP);
    }
    normals
}

/// Rejects non-finite vertex positions before they reach the output mesh.
fn validate_finite(vertices: &[Point3]) -> Result<()> {
    for (i, vertex) in vertices.iter().enumerate() {
        if !vertex.coords.iter().all(|c| c.is_finite()) {
            return Err(MeshError::GeometryCorruption(format!(
                "non-finite vertex position at index {i}"
            ))
            .into());
        }
    }
    Ok(())
}
