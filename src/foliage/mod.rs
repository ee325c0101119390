//! Dense point-cloud foliage
//!
//! Fifteen thousand points share one morph progress; the per-point blend,
//! pointer repulsion, wind and sparkle run in the foliage shader program.

pub mod animator;
pub mod cloud;
pub mod kernel;

pub use animator::FoliageAnimator;
pub use cloud::PointCloud;
pub use kernel::{FoliageUniforms, KernelParams, VertexSample};
