use crate::animation::MorphProgress;
use crate::interaction::{Collider, PointerTracker};
use crate::math::Vec3;
use crate::scene::config::{FoliageConfig, ShapeConfig};
use crate::scene::MorphState;
use super::cloud::PointCloud;
use super::kernel::{FoliageUniforms, KernelParams, VertexSample, evaluate_vertex};

/// Drives the dense point cloud.
///
/// The host only updates the three uniforms each frame; the blend itself
/// runs in the foliage vertex program.
pub struct FoliageAnimator {
    cloud: PointCloud,
    progress: MorphProgress,
    pointer: PointerTracker,
    params: KernelParams,
    collider_scale: f32,
    uniforms: FoliageUniforms,
}

impl FoliageAnimator {
    pub fn new(cloud: PointCloud, config: &FoliageConfig) -> Self {
        Self {
            cloud,
            progress: MorphProgress::new(config.smoothing_rate).with_snap(config.snap_epsilon),
            pointer: PointerTracker::new(config.pointer_sentinel, config.pointer_follow_rate),
            params: KernelParams {
                interaction_radius: config.interaction_radius,
                push_distance: config.push_distance,
            },
            collider_scale: config.collider_scale,
            uniforms: FoliageUniforms {
                time: 0.0,
                morph: 0.0,
                pointer: config.pointer_sentinel,
            },
        }
    }

    /// Advance one frame and return the uniforms to push
    pub fn update(&mut self, state: MorphState, dt: f32, time: f32) -> FoliageUniforms {
        self.uniforms = FoliageUniforms {
            time,
            morph: self.progress.advance(state.target_progress(), dt),
            pointer: self.pointer.update(dt),
        };
        self.uniforms
    }

    pub fn on_pointer_move(&mut self, point: Vec3) {
        self.pointer.on_move(point);
    }

    pub fn on_pointer_out(&mut self) {
        self.pointer.on_leave();
    }

    /// Pointer collider for the current arrangement
    pub fn collider(&self, state: MorphState, shape: &ShapeConfig) -> Collider {
        Collider::for_state(state, shape, self.collider_scale)
    }

    /// Evaluate one vertex with the last pushed uniforms
    pub fn sample_vertex(&self, index: usize) -> Option<VertexSample> {
        if index >= self.cloud.len() {
            return None;
        }
        Some(evaluate_vertex(
            self.cloud.scatter_position(index),
            self.cloud.tree_position(index),
            self.cloud.random(index),
            &self.uniforms,
            &self.params,
        ))
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn uniforms(&self) -> FoliageUniforms {
        self.uniforms
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn set_progress(&mut self, value: f32) {
        self.progress.set(value);
        self.uniforms.morph = self.progress.value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foliage::kernel::blend_position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn animator() -> FoliageAnimator {
        let mut rng = StdRng::seed_from_u64(21);
        let shape = ShapeConfig::default();
        let cloud = PointCloud::generate(&mut rng, 500, &shape);
        FoliageAnimator::new(cloud, &FoliageConfig::default())
    }

    #[test]
    fn test_uniforms_track_time_and_progress() {
        let mut foliage = animator();
        let u = foliage.update(MorphState::TreeShape, 0.1, 4.2);
        assert_eq!(u.time, 4.2);
        assert!((u.morph - 0.2).abs() < 1e-6);
        assert_eq!(u.pointer, Vec3::splat(9999.0));
    }

    #[test]
    fn test_progress_snaps_to_target() {
        let mut foliage = animator();
        for _ in 0..600 {
            foliage.update(MorphState::TreeShape, 1.0 / 60.0, 0.0);
        }
        assert_eq!(foliage.progress(), 1.0);
    }

    #[test]
    fn test_pointer_on_vertex_full_strength() {
        let mut foliage = animator();
        foliage.set_progress(0.6);

        let cloud = foliage.cloud();
        let target = blend_position(cloud.scatter_position(7), cloud.tree_position(7), 0.6);
        foliage.on_pointer_move(target);
        foliage.update(MorphState::TreeShape, 0.0, 0.0);

        let sample = foliage.sample_vertex(7).unwrap();
        assert!((sample.interaction_strength - 1.0).abs() < 1e-6);

        // Every vertex outside the radius is untouched
        let radius = FoliageConfig::default().interaction_radius;
        for i in 0..foliage.cloud().len() {
            let s = foliage.sample_vertex(i).unwrap();
            if s.blended.distance(&target) > radius {
                assert_eq!(s.interaction_strength, 0.0);
            }
        }
    }

    #[test]
    fn test_pointer_out_clears_interaction() {
        let mut foliage = animator();
        foliage.on_pointer_move(Vec3::ZERO);
        foliage.update(MorphState::Scattered, 0.016, 0.0);
        foliage.on_pointer_out();
        let u = foliage.update(MorphState::Scattered, 0.016, 0.016);
        assert_eq!(u.pointer, Vec3::splat(9999.0));
        assert!(foliage.sample_vertex(0).unwrap().interaction_strength == 0.0);
    }

    #[test]
    fn test_sample_out_of_range() {
        assert!(animator().sample_vertex(500).is_none());
    }
}
