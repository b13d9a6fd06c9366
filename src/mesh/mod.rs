mod assemble;
mod cross_section;

pub use assemble::AssembleRoad;
pub use cross_section::{BuildCrossSections, CrossSection};

use crate::math::{Point2, Point3, Vector3};

/// Triangle mesh output of road generation.
///
/// Vertices hold the flat ribbon rail pairs first, followed by the bottom
/// shell from side extrusion. UVs are parallel to the vertex buffer.
#[derive(Debug, Clone, Default)]
pub struct RoadMesh {
    /// Vertex positions in the road's local frame.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}
