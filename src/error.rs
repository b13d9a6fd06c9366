use thiserror::Error;

/// Top-level error type for the Tarmac road generator.
#[derive(Debug, Error)]
pub enum TarmacError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Errors related to the control-point path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("at least {needed} control points are required, got {got}")]
    InsufficientInput { needed: usize, got: usize },
}

/// Errors related to mesh synthesis.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid road style: {0}")]
    InvalidStyle(String),

    #[error("geometry corruption: {0}")]
    GeometryCorruption(String),
}

/// Convenience type alias for results using [`TarmacError`].
pub type Result<T> = std::result::Result<T, TarmacError>;
