use crate::error::{MeshError, Result};

/// Parameters controlling road generation.
#[derive(Debug, Clone, Copy)]
pub struct RoadStyle {
    /// Total road width (rail to rail).
    pub width: f64,
    /// Clearance kept between the road surface and the terrain.
    pub ground_offset: f64,
    /// Vertical thickness of the extruded road slab.
    pub thickness: f64,
    /// Outward overhang of the bottom shell past the rails.
    pub side_extrusion: f64,
    /// Longitudinal world distance covered by one texture repeat.
    pub paint_distance: f64,
    /// Number of corner-rounding passes applied to the path.
    pub smoothing_passes: u32,
    /// Upper bound on the distance between a corner and its inserted
    /// smoothing points.
    pub max_smoothing_offset: f64,
    /// Number of terrain-clipping elimination passes.
    pub clipping_passes: u32,
}

impl Default for RoadStyle {
    fn default() -> Self {
        Self {
            width: 4.0,
            ground_offset: 0.1,
            thickness: 0.3,
            side_extrusion: 0.2,
            paint_distance: 4.0,
            smoothing_passes: 1,
            max_smoothing_offset: 2.0,
            clipping_passes: 2,
        }
    }
}

impl RoadStyle {
    /// Checks that the style describes a realizable road.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidStyle`] if `width` or `paint_distance`
    /// is not strictly positive, or if any parameter is not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(MeshError::InvalidStyle("width must be positive".to_owned()).into());
        }
        if !self.paint_distance.is_finite() || self.paint_distance <= 0.0 {
            return Err(
                MeshError::InvalidStyle("paint distance must be positive".to_owned()).into(),
            );
        }
        let rest = [
            self.ground_offset,
            self.thickness,
            self.side_extrusion,
            self.max_smoothing_offset,
        ];
        if rest.iter().any(|v| !v.is_finite()) {
            return Err(MeshError::InvalidStyle("parameters must be finite".to_owned()).into());
        }
        Ok(())
    }
}
