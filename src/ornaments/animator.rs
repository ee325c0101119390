//! Per-category ornament morph animation
//!
//! Blends every item between its scatter and tree positions using the
//! category's smoothed progress, then layers on floating, rotation,
//! twinkle and the arrival pop before writing one transform per slot.

use crate::animation::{Easing, MorphProgress, ease};
use crate::math::{Mat4, Vec3};
use crate::scene::MorphState;
use super::category::Category;
use super::instance_buffer::InstanceBuffer;
use super::item::OrnamentItem;

/// Items at or above this progress stop floating
const FLOAT_CUTOFF: f32 = 0.95;
/// Weight above which items twinkle
const TWINKLE_WEIGHT: f32 = 2.0;
/// Progress window of the arrival pop
const POP_START: f32 = 0.9;
const POP_END: f32 = 0.98;
const POP_SCALE: f32 = 1.1;

/// Item-specific progress: heavy items arrive early, light ones lag
pub fn item_progress(morph: f32, weight: f32) -> f32 {
    (morph * (1.2 - weight * 0.1)).clamp(0.0, 1.0)
}

/// Animates one instanced category into its mounted instance buffer
pub struct OrnamentAnimator {
    category: Category,
    items: Vec<OrnamentItem>,
    /// Accumulated XYZ Euler rotation per slot
    rotations: Vec<Vec3>,
    progress: MorphProgress,
    /// Curve applied to item progress for the position blend
    pub easing: Easing,
    target: Option<InstanceBuffer>,
}

impl OrnamentAnimator {
    pub fn new(category: Category, items: Vec<OrnamentItem>, smoothing_rate: f32) -> Self {
        let rotations = vec![Vec3::ZERO; items.len()];
        Self {
            category,
            items,
            rotations,
            progress: MorphProgress::new(smoothing_rate),
            easing: Easing::Linear,
            target: None,
        }
    }

    /// Attach the output buffer and write each slot's color once
    pub fn mount(&mut self, mut buffer: InstanceBuffer) {
        if buffer.capacity() < self.items.len() {
            log::warn!(
                "{} buffer holds {} slots for {} items; extra items are not drawn",
                self.category.name(),
                buffer.capacity(),
                self.items.len()
            );
        }

        for (i, item) in self.items.iter().enumerate() {
            buffer.set_color_at(i, item.color);
        }
        buffer.mark_colors_dirty();

        self.target = Some(buffer);
    }

    /// Detach and hand back the output buffer
    pub fn unmount(&mut self) -> Option<InstanceBuffer> {
        self.target.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.target.is_some()
    }

    /// Advance the category one frame.
    ///
    /// Returns `false` when no buffer is mounted; progress still advances so
    /// the transition stays in step once the buffer shows up.
    pub fn update(&mut self, state: MorphState, dt: f32, time: f32) -> bool {
        let morph = self.progress.advance(state.target_progress(), dt);

        let Some(buffer) = self.target.as_mut() else {
            return false;
        };

        for (i, (item, rotation)) in self.items.iter().zip(self.rotations.iter_mut()).enumerate() {
            let p = item_progress(morph, item.weight);

            let mut position = item
                .scatter_position
                .lerp(&item.tree_position, ease(p, self.easing));

            if p < FLOAT_CUTOFF {
                let amplitude = (1.0 - p) * item.weight * 0.5;
                let frequency = 1.0 + item.weight;
                position.y += (time * frequency + item.scatter_position.x).sin() * amplitude;
                position.x += (time * frequency * 0.5 + item.scatter_position.y).cos() * amplitude * 0.5;
            }

            // X/Z settle as the item lands; Y keeps spinning
            let damping = 1.0 - p * 0.95;
            *rotation += Vec3::new(
                item.rotation_speed.x * dt * damping,
                item.rotation_speed.y * dt,
                item.rotation_speed.z * dt * damping,
            );

            let mut scale = item.scale;
            if item.weight > TWINKLE_WEIGHT {
                let twinkle = (time * 3.0 + item.phase).sin() * 0.5 + 0.5;
                scale *= 0.8 + twinkle * 0.4;
            }
            if p > POP_START && p < POP_END {
                scale *= POP_SCALE;
            }

            buffer.set_matrix_at(i, &Mat4::compose(position, *rotation, scale));
        }

        buffer.mark_matrices_dirty();
        true
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn items(&self) -> &[OrnamentItem] {
        &self.items
    }

    pub fn rotation(&self, index: usize) -> Option<Vec3> {
        self.rotations.get(index).copied()
    }

    pub fn buffer(&self) -> Option<&InstanceBuffer> {
        self.target.as_ref()
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn set_progress(&mut self, value: f32) {
        self.progress.set(value);
    }
}
