use rand::Rng;

use crate::math::{Vec3, sample_cone, sample_sphere};
use crate::scene::config::ShapeConfig;

/// Immutable per-vertex attributes of the dense foliage cloud.
///
/// Stored as flat arrays so they upload straight into vertex buffers.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    /// 3 floats per vertex
    pub scatter_positions: Vec<f32>,
    /// 3 floats per vertex
    pub tree_positions: Vec<f32>,
    /// 1 float per vertex in [0, 1)
    pub randoms: Vec<f32>,
}

impl PointCloud {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, shape: &ShapeConfig) -> Self {
        let mut scatter_positions = Vec::with_capacity(count * 3);
        let mut tree_positions = Vec::with_capacity(count * 3);
        let mut randoms = Vec::with_capacity(count);

        for _ in 0..count {
            let scatter = sample_sphere(rng, shape.scatter_radius);
            let tree = sample_cone(rng, shape.tree_radius, shape.tree_height);

            scatter_positions.extend_from_slice(&scatter.to_array());
            tree_positions.extend_from_slice(&tree.to_array());
            randoms.push(rng.gen::<f32>());
        }

        Self {
            scatter_positions,
            tree_positions,
            randoms,
        }
    }

    pub fn len(&self) -> usize {
        self.randoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.randoms.is_empty()
    }

    pub fn scatter_position(&self, index: usize) -> Vec3 {
        read_vec3(&self.scatter_positions, index)
    }

    pub fn tree_position(&self, index: usize) -> Vec3 {
        read_vec3(&self.tree_positions, index)
    }

    pub fn random(&self, index: usize) -> f32 {
        self.randoms[index]
    }
}

fn read_vec3(data: &[f32], index: usize) -> Vec3 {
    Vec3::new(data[index * 3], data[index * 3 + 1], data[index * 3 + 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::cone_radius_at;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_layout() {
        let mut rng = StdRng::seed_from_u64(9);
        let cloud = PointCloud::generate(&mut rng, 1000, &ShapeConfig::default());

        assert_eq!(cloud.len(), 1000);
        assert_eq!(cloud.scatter_positions.len(), 3000);
        assert_eq!(cloud.tree_positions.len(), 3000);
        assert!(cloud.randoms.iter().all(|r| (0.0..1.0).contains(r)));
    }

    #[test]
    fn test_positions_inside_shapes() {
        let mut rng = StdRng::seed_from_u64(10);
        let shape = ShapeConfig::default();
        let cloud = PointCloud::generate(&mut rng, 2000, &shape);

        for i in 0..cloud.len() {
            assert!(cloud.scatter_position(i).length() <= shape.scatter_radius + 1e-3);
            let t = cloud.tree_position(i);
            assert!(t.horizontal_length() <= cone_radius_at(shape.tree_radius, shape.tree_height, t.y) + 1e-3);
        }
    }
}
