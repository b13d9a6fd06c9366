use tracing::debug;

use crate::error::{PathError, Result};
use crate::math::Point3;
use crate::mesh::{AssembleRoad, BuildCrossSections, RoadMesh};
use crate::path::{ResolveClipping, SmoothPath};
use crate::style::RoadStyle;
use crate::terrain::HeightQuery;

/// Generates a terrain-conforming road mesh from an ordered control-point
/// path.
///
/// The pipeline runs to completion in strict sequence: corner smoothing,
/// terrain-clipping resolution, cross-section computation, mesh assembly.
/// Each call works on a fresh copy of its input and returns a fresh mesh;
/// concurrent generations over different inputs are independent.
#[derive(Debug)]
pub struct GenerateRoad {
    points: Vec<Point3>,
    style: RoadStyle,
}

impl GenerateRoad {
    /// Creates a new generation operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, style: RoadStyle) -> Self {
        Self { points, style }
    }

    /// Executes the full generation pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidStyle`](crate::error::MeshError::InvalidStyle)
    /// for an unrealizable style, [`PathError::InsufficientInput`] for fewer
    /// than 2 control points, and
    /// [`MeshError::GeometryCorruption`](crate::error::MeshError::GeometryCorruption)
    /// if vertex computation produces a non-finite value.
    pub fn execute<Q: HeightQuery>(&self, terrain: &Q) -> Result<RoadMesh> {
        self.style.validate()?;
        if self.points.len() < 2 {
            return Err(PathError::InsufficientInput {
                needed: 2,
                got: self.points.len(),
            }
            .into());
        }

        let smoothed = SmoothPath::new(
            self.points.clone(),
            self.style.smoothing_passes,
            self.style.max_smoothing_offset,
        )
        .execute();
        let resolved = ResolveClipping::new(
            smoothed,
            self.style.clipping_passes,
            self.style.ground_offset,
        )
        .execute(terrain);
        debug!(
            input = self.points.len(),
            expanded = resolved.len(),
            "expanded control-point path"
        );

        let sections = BuildCrossSections::new(resolved, self.style.width, self.style.ground_offset)
            .execute(terrain)?;
        let mesh = AssembleRoad::new(
            sections,
            self.style.thickness,
            self.style.side_extrusion,
            self.style.paint_distance,
        )
        .execute()?;

        debug!(
            vertices = mesh.vertices.len(),
            triangles = mesh.indices.len(),
            "assembled road mesh"
        );
        Ok(mesh)
    }
}
