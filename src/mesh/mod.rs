pub mod geometry;
pub mod primitives;

pub use geometry::{Mesh, Vertex, VERTEX_STRIDE};
pub use primitives::{cube, extrude_star, octahedron, uv_sphere};
