//! Host mirror of the foliage vertex and fragment programs
//!
//! The GPU evaluates these formulas for every point each frame (see
//! `render::shaders::FOLIAGE_VERTEX_SHADER`). The mirror exists so the
//! blend and the pointer repulsion can be checked off the GPU; keep the
//! two in sync.

use crate::animation::{Easing, ease, smoothstep};
use crate::math::Vec3;

/// Per-frame inputs pushed to the foliage program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageUniforms {
    pub time: f32,
    pub morph: f32,
    pub pointer: Vec3,
}

/// Fixed kernel constants
#[derive(Debug, Clone, Copy)]
pub struct KernelParams {
    pub interaction_radius: f32,
    pub push_distance: f32,
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            interaction_radius: 4.0,
            push_distance: 1.5,
        }
    }
}

/// Result of evaluating one vertex
#[derive(Debug, Clone, Copy)]
pub struct VertexSample {
    /// Eased blend before repulsion and wind
    pub blended: Vec3,
    /// Final model-space position
    pub position: Vec3,
    /// 1 at the pointer, 0 beyond the interaction radius
    pub interaction_strength: f32,
    /// Point size before depth attenuation
    pub size: f32,
    pub alpha: f32,
}

pub fn blend_position(scatter: Vec3, tree: Vec3, morph: f32) -> Vec3 {
    scatter.lerp(&tree, ease(morph, Easing::CubicInOut))
}

/// Strength of the pointer push at `distance`
pub fn interaction_strength(distance: f32, radius: f32) -> f32 {
    1.0 - smoothstep(0.0, radius, distance)
}

pub fn evaluate_vertex(
    scatter: Vec3,
    tree: Vec3,
    random: f32,
    uniforms: &FoliageUniforms,
    params: &KernelParams,
) -> VertexSample {
    let eased = ease(uniforms.morph, Easing::CubicInOut);
    let blended = scatter.lerp(&tree, eased);
    let mut position = blended;

    let strength = interaction_strength(position.distance(&uniforms.pointer), params.interaction_radius);
    if strength > 0.0 {
        let push = (position - uniforms.pointer).normalize();
        position += push.scale(strength * params.push_distance);
    }

    // Wind, damped once the tree is formed
    let breath = (uniforms.time * 2.0 + position.y * 0.5 + random * 5.0).sin() * 0.1;
    let damping = 1.0 - eased * 0.8;
    position.x += breath * damping;
    position.z += breath * damping;

    let size = (3.0 * random + 1.0) + strength * 12.0;
    let alpha = 0.8 + 0.2 * (uniforms.time * 3.0 + random * 10.0).sin() + strength * 2.0;

    VertexSample {
        blended,
        position,
        interaction_strength: strength,
        size,
        alpha,
    }
}

/// Screen-space point size at a view-space depth (positive, in front of the camera)
pub fn attenuated_point_size(size: f32, view_depth: f32) -> f32 {
    size * (30.0 / view_depth)
}

/// Fragment color at `dist_from_center` (0 at the point center, 1 at its edge).
///
/// Returns `None` where the fragment program discards.
pub fn fragment_color(dist_from_center: f32, random: f32, time: f32, base: Vec3, tip: Vec3) -> Option<Vec3> {
    if dist_from_center > 0.8 {
        return None;
    }

    let sparkle = (0.5 + 0.5 * (time * 4.0 + random * 100.0).sin()).powi(3);
    let edge = smoothstep(0.4, 0.8, dist_from_center);
    let tip_color = tip.scale(1.0 + sparkle * 1.2);

    let color = base.lerp(&tip_color, edge) + Vec3::splat(0.1 * (1.0 - dist_from_center));
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms(morph: f32, pointer: Vec3) -> FoliageUniforms {
        FoliageUniforms { time: 1.3, morph, pointer }
    }

    #[test]
    fn test_pointer_on_vertex_gives_full_strength() {
        let scatter = Vec3::new(10.0, -3.0, 4.0);
        let tree = Vec3::new(1.0, 2.0, -0.5);
        let morph = 0.37;
        let pointer = blend_position(scatter, tree, morph);

        let sample = evaluate_vertex(scatter, tree, 0.5, &uniforms(morph, pointer), &KernelParams::default());
        assert!((sample.interaction_strength - 1.0).abs() < 1e-6);
        assert!(sample.position.x.is_finite() && sample.position.y.is_finite());
        assert!((sample.size - (3.0 * 0.5 + 1.0 + 12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_beyond_radius_has_no_interaction() {
        let tree = Vec3::new(1.0, 2.0, 0.0);
        let params = KernelParams::default();
        let pointer = tree + Vec3::new(params.interaction_radius + 0.01, 0.0, 0.0);

        let sample = evaluate_vertex(Vec3::ZERO, tree, 0.2, &uniforms(1.0, pointer), &params);
        assert_eq!(sample.interaction_strength, 0.0);
        assert_eq!(sample.blended, tree);
    }

    #[test]
    fn test_sentinel_pointer_is_inert() {
        let sample = evaluate_vertex(
            Vec3::new(3.0, 3.0, 3.0),
            Vec3::ZERO,
            0.9,
            &uniforms(0.5, Vec3::splat(9999.0)),
            &KernelParams::default(),
        );
        assert_eq!(sample.interaction_strength, 0.0);
    }

    #[test]
    fn test_push_moves_away_from_pointer() {
        let tree = Vec3::new(2.0, 0.0, 0.0);
        let pointer = Vec3::new(1.0, 0.0, 0.0);
        let before = tree.distance(&pointer);

        let sample = evaluate_vertex(Vec3::ZERO, tree, 0.0, &uniforms(1.0, pointer), &KernelParams::default());
        assert!(sample.interaction_strength > 0.0 && sample.interaction_strength < 1.0);
        assert!(sample.position.distance(&pointer) > before);
    }

    #[test]
    fn test_strength_falls_off_monotonically() {
        let mut prev = 1.0;
        for i in 0..=40 {
            let s = interaction_strength(i as f32 * 0.1, 4.0);
            assert!(s <= prev + 1e-6);
            prev = s;
        }
        assert_eq!(interaction_strength(4.0, 4.0), 0.0);
    }

    #[test]
    fn test_blend_uses_cubic_easing() {
        let scatter = Vec3::ZERO;
        let tree = Vec3::new(0.0, 8.0, 0.0);
        // cubic in-out at 0.25 = 4 * 0.25^3 = 0.0625
        assert!((blend_position(scatter, tree, 0.25).y - 0.5).abs() < 1e-5);
        assert_eq!(blend_position(scatter, tree, 1.0), tree);
    }

    #[test]
    fn test_point_size_attenuation() {
        assert!((attenuated_point_size(2.0, 30.0) - 2.0).abs() < 1e-6);
        assert!(attenuated_point_size(2.0, 10.0) > attenuated_point_size(2.0, 20.0));
    }

    #[test]
    fn test_fragment_edges() {
        let base = Vec3::from_rgb_hex(0x022b1c);
        let tip = Vec3::from_rgb_hex(0xFFD700);
        assert!(fragment_color(0.9, 0.3, 0.0, base, tip).is_none());

        // Center is base color plus highlight
        let center = fragment_color(0.0, 0.3, 0.0, base, tip).unwrap();
        assert!((center.x - (base.x + 0.1)).abs() < 1e-5);

        // Edge leans toward gold
        let edge = fragment_color(0.79, 0.3, 0.0, base, tip).unwrap();
        assert!(edge.x > center.x);
    }
}
