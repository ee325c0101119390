//! Pointer interaction for the foliage cloud

pub mod collider;
pub mod picking;
pub mod pointer;

pub use collider::{Collider, Ray};
pub use picking::screen_ray;
pub use pointer::PointerTracker;
