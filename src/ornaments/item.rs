//! One-shot generation of ornament items
//!
//! Every item gets its scatter and tree positions here and never again;
//! the slot index in the returned list is its identity for the renderer.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::math::{Vec3, sample_cone, sample_sphere};
use crate::scene::config::{CategoryConfig, ShapeConfig};

/// Points this close to the trunk axis are not pushed outward
const PUFF_AXIS_EPSILON: f32 = 0.1;

/// Immutable attributes of one instanced ornament
#[derive(Debug, Clone)]
pub struct OrnamentItem {
    pub scatter_position: Vec3,
    pub tree_position: Vec3,
    /// Radians per second around each axis, already scaled by weight
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub color: Vec3,
    pub weight: f32,
    /// Phase offset for twinkling
    pub phase: f32,
}

/// Generate `config.count` items for one category
pub fn generate_items<R: Rng + ?Sized>(
    rng: &mut R,
    config: &CategoryConfig,
    colors: &[Vec3],
    shape: &ShapeConfig,
) -> Vec<OrnamentItem> {
    let weight = config.weight;
    let scatter_radius = shape.scatter_radius * (0.8 + weight * 0.1);

    (0..config.count)
        .map(|_| {
            let mut tree_position = sample_cone(rng, shape.tree_radius, shape.tree_height);
            let push = 1.0 + rng.gen::<f32>() * 0.2 * weight;
            if tree_position.horizontal_length() > PUFF_AXIS_EPSILON {
                tree_position.x *= push;
                tree_position.z *= push;
            }

            let scatter_position = sample_sphere(rng, scatter_radius);

            let rotation_speed = Vec3::new(
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
            )
            .scale(weight);

            let scale = config.base_scale * (0.8 + rng.gen::<f32>() * 0.4);
            let color = colors.choose(rng).copied().unwrap_or(Vec3::ONE);
            let phase = rng.gen::<f32>() * 100.0;

            OrnamentItem {
                scatter_position,
                tree_position,
                rotation_speed,
                scale,
                color,
                weight,
                phase,
            }
        })
        .collect()
}
