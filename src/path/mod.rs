mod clipping;
mod smooth;

pub use clipping::ResolveClipping;
pub use smooth::SmoothPath;
