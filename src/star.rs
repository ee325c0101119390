//! The star on top of the tree
//!
//! Rises to the apex and grows to full size in tree shape, drifts up and
//! shrinks to a speck when scattered. Emissive glow and its point light
//! pulse on two mixed sine waves.

use crate::math::{Mat4, Vec3};
use crate::scene::MorphState;

const SPIN_RATE: f32 = 0.5;
const FOLLOW_RATE: f32 = 2.0;
const SCATTERED_HEIGHT: f32 = 15.0;
const SCATTERED_SCALE: f32 = 0.01;

pub const STAR_POINTS: usize = 5;
pub const STAR_OUTER_RADIUS: f32 = 0.8;
pub const STAR_INNER_RADIUS: f32 = 0.35;

#[derive(Debug, Clone)]
pub struct StarAnimator {
    height: f32,
    scale: f32,
    spin: f32,
    tree_height: f32,
    emissive_intensity: f32,
    light_intensity: f32,
}

impl StarAnimator {
    pub fn new(tree_height: f32) -> Self {
        Self {
            height: SCATTERED_HEIGHT,
            scale: 1.0,
            spin: 0.0,
            tree_height,
            emissive_intensity: 1.5,
            light_intensity: 3.0,
        }
    }

    pub fn update(&mut self, state: MorphState, dt: f32, time: f32) {
        self.spin += dt * SPIN_RATE;

        let (target_height, target_scale) = match state {
            MorphState::TreeShape => (self.tree_height / 2.0 + 0.5, 1.0),
            MorphState::Scattered => (SCATTERED_HEIGHT, SCATTERED_SCALE),
        };

        let t = (dt * FOLLOW_RATE).clamp(0.0, 1.0);
        self.height += (target_height - self.height) * t;
        self.scale += (target_scale - self.scale) * t;

        let pulse = ((time * 2.0).sin() + (time * 5.0).sin() * 0.5) * 0.2;
        self.emissive_intensity = 1.5 + pulse;
        self.light_intensity = 3.0 + pulse * 1.5;
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::compose(Vec3::new(0.0, self.height, 0.0), Vec3::new(0.0, self.spin, 0.0), self.scale)
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn emissive_intensity(&self) -> f32 {
        self.emissive_intensity
    }

    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }
}

/// Counter-clockwise outline of a star pointing up (+Y), alternating outer
/// and inner vertices
pub fn star_outline(points: usize, outer_radius: f32, inner_radius: f32) -> Vec<(f32, f32)> {
    (0..points * 2)
        .map(|i| {
            let angle = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / points as f32;
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            (angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}
