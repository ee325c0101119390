use rand::Rng;

use crate::foliage::{FoliageAnimator, FoliageUniforms, PointCloud};
use crate::interaction::{Collider, Ray};
use crate::math::{Mat4, Vec3};
use crate::ornaments::{Category, InstanceBuffer, OrnamentAnimator, generate_items};
use crate::star::StarAnimator;
use super::config::SceneConfig;
use super::palette;
use super::state::MorphState;

/// Offset of the whole arrangement in world space
pub const GROUP_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Owns the morph state and every animator, advanced once per frame.
///
/// Nothing here touches the GPU; the renderer reads the mounted instance
/// buffers and the last foliage uniforms after each `tick`.
pub struct Scene {
    config: SceneConfig,
    state: MorphState,
    /// Seconds since creation, kept wide so long sessions do not drift
    time: f64,
    ornaments: Vec<OrnamentAnimator>,
    foliage: FoliageAnimator,
    star: StarAnimator,
    foliage_uniforms: FoliageUniforms,
}

impl Scene {
    /// Generate the scene with the thread-local RNG
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let shape = config.shape;

        let ornaments: Vec<OrnamentAnimator> = Category::ALL
            .iter()
            .map(|&category| {
                let category_config = config.ornaments.category(category);
                let colors = palette::colors(category.palette());
                let items = generate_items(rng, category_config, &colors, &shape);
                log::debug!(
                    "generated {} {} (weight {}, scale {})",
                    items.len(),
                    category.name(),
                    category_config.weight,
                    category_config.base_scale
                );

                let mut animator = OrnamentAnimator::new(category, items, config.ornaments.smoothing_rate);
                animator.mount(InstanceBuffer::new(category_config.count));
                animator
            })
            .collect();

        let cloud = PointCloud::generate(rng, config.foliage.count, &shape);
        log::debug!("generated {} foliage points", cloud.len());
        let foliage = FoliageAnimator::new(cloud, &config.foliage);
        let foliage_uniforms = foliage.uniforms();

        log::info!(
            "scene ready: {} ornaments, {} foliage points",
            ornaments.iter().map(|a| a.items().len()).sum::<usize>(),
            config.foliage.count
        );

        Self {
            config,
            state: MorphState::default(),
            time: 0.0,
            ornaments,
            foliage,
            star: StarAnimator::new(shape.tree_height),
            foliage_uniforms,
        }
    }

    /// Returns `true` if the state changed
    pub fn set_morph_state(&mut self, state: MorphState) -> bool {
        if self.state == state {
            return false;
        }
        log::debug!("morph state {:?} -> {:?}", self.state, state);
        self.state = state;
        true
    }

    pub fn toggle(&mut self) -> MorphState {
        self.set_morph_state(self.state.toggled());
        self.state
    }

    /// Advance every animator by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.time += f64::from(dt);
        let time = self.time();

        for animator in &mut self.ornaments {
            animator.update(self.state, dt, time);
        }
        self.foliage_uniforms = self.foliage.update(self.state, dt, time);
        self.star.update(self.state, dt, time);
    }

    /// Current pointer collider, in group-local space
    pub fn collider(&self) -> Collider {
        self.foliage.collider(self.state, &self.config.shape)
    }

    /// Cast a world-space pointer ray; a hit is forwarded to the foliage,
    /// a miss counts as the pointer leaving
    pub fn on_pointer_ray(&mut self, ray: &Ray) -> Option<Vec3> {
        let local = Ray {
            origin: ray.origin - GROUP_OFFSET,
            direction: ray.direction,
        };

        match self.collider().hit_point(&local) {
            Some(hit) => {
                self.foliage.on_pointer_move(hit);
                Some(hit)
            }
            None => {
                self.foliage.on_pointer_out();
                None
            }
        }
    }

    /// Pointer already resolved to a world-space point
    pub fn on_pointer_world(&mut self, point: Vec3) {
        self.foliage.on_pointer_move(point - GROUP_OFFSET);
    }

    pub fn on_pointer_out(&mut self) {
        self.foliage.on_pointer_out();
    }

    pub fn group_transform(&self) -> Mat4 {
        Mat4::translation(GROUP_OFFSET.x, GROUP_OFFSET.y, GROUP_OFFSET.z)
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.time as f32
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn ornaments(&self) -> &[OrnamentAnimator] {
        &self.ornaments
    }

    pub fn ornament(&self, category: Category) -> &OrnamentAnimator {
        &self.ornaments[category.index()]
    }

    pub fn foliage(&self) -> &FoliageAnimator {
        &self.foliage
    }

    pub fn foliage_uniforms(&self) -> FoliageUniforms {
        self.foliage_uniforms
    }

    pub fn star(&self) -> &StarAnimator {
        &self.star
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::config::CategoryConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_scene(seed: u64) -> Scene {
        let mut config = SceneConfig::default();
        config.ornaments.gifts = CategoryConfig { count: 8, weight: 0.3, base_scale: 0.5 };
        config.ornaments.baubles = CategoryConfig { count: 20, weight: 1.0, base_scale: 0.25 };
        config.ornaments.lights = CategoryConfig { count: 12, weight: 2.5, base_scale: 0.12 };
        config.foliage.count = 300;
        Scene::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_categories_in_index_order() {
        let scene = small_scene(1);
        for category in Category::ALL {
            assert_eq!(scene.ornament(category).category(), category);
            assert!(scene.ornament(category).is_mounted());
        }
        assert_eq!(scene.ornament(Category::Baubles).items().len(), 20);
        assert_eq!(scene.foliage().cloud().len(), 300);
    }

    #[test]
    fn test_set_state_is_idempotent() {
        let mut scene = small_scene(2);
        assert!(!scene.set_morph_state(MorphState::Scattered));
        assert!(scene.set_morph_state(MorphState::TreeShape));
        assert!(!scene.set_morph_state(MorphState::TreeShape));
        assert_eq!(scene.toggle(), MorphState::Scattered);
        assert_eq!(scene.toggle(), MorphState::TreeShape);
    }

    #[test]
    fn test_repeated_state_leaves_progress_untouched() {
        let mut repeated = small_scene(8);
        let mut single = small_scene(8);
        repeated.set_morph_state(MorphState::TreeShape);
        single.set_morph_state(MorphState::TreeShape);
        for _ in 0..20 {
            repeated.tick(1.0 / 60.0);
            single.tick(1.0 / 60.0);
        }
        let mid = repeated.ornament(Category::Gifts).progress();
        assert!(mid > 0.0 && mid < 1.0);

        assert!(!repeated.set_morph_state(MorphState::TreeShape));
        for _ in 0..10 {
            repeated.tick(1.0 / 60.0);
            single.tick(1.0 / 60.0);
        }

        for category in Category::ALL {
            assert_eq!(
                repeated.ornament(category).progress(),
                single.ornament(category).progress(),
                "{} diverged",
                category.name()
            );
        }
        assert_eq!(repeated.foliage().progress(), single.foliage().progress());
    }

    #[test]
    fn test_clock_does_not_drift() {
        let mut scene = small_scene(9);
        // Four hours in
        scene.time = 4.0 * 3600.0;
        let start = scene.time;
        for _ in 0..600 {
            scene.tick(1.0 / 60.0);
        }
        assert!((scene.time - start - 10.0).abs() < 1e-4, "advanced {}", scene.time - start);
    }

    #[test]
    fn test_baubles_settle_on_tree() {
        let mut scene = small_scene(3);
        scene.set_morph_state(MorphState::TreeShape);
        for _ in 0..600 {
            scene.tick(1.0 / 60.0);
        }

        let baubles = scene.ornament(Category::Baubles);
        assert!(baubles.progress() > 0.999);
        let buffer = baubles.buffer().unwrap();
        for (i, item) in baubles.items().iter().enumerate() {
            let placed = buffer.matrix_at(i).unwrap().position();
            assert!(placed.distance(&item.tree_position) < 1e-3, "slot {} at {:?}", i, placed);
        }

        assert_eq!(scene.foliage().progress(), 1.0);
        assert!((scene.star().height() - 6.5).abs() < 1e-3);
    }

    #[test]
    fn test_categories_progress_independently() {
        let mut scene = small_scene(4);
        scene.set_morph_state(MorphState::TreeShape);
        scene.tick(0.1);

        // Same rate, same step: every category moved, none is shared
        let gifts = scene.ornament(Category::Gifts).progress();
        let lights = scene.ornament(Category::Lights).progress();
        assert!(gifts > 0.0 && lights > 0.0);

        scene.set_morph_state(MorphState::Scattered);
        scene.tick(0.1);
        assert!(scene.ornament(Category::Gifts).progress() < gifts);
    }

    #[test]
    fn test_pointer_ray_hits_sphere_and_forwards() {
        let mut scene = small_scene(5);

        // Straight down the -Z axis from the camera start
        let ray = Ray {
            origin: Vec3::new(0.0, 2.0, 100.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = scene.on_pointer_ray(&ray).unwrap();

        // Group-local sphere of radius 25 * 1.2, ray at local y = 1
        let r = 25.0f32 * 1.2;
        let expected_z = (r * r - 1.0).sqrt();
        assert!((hit.z - expected_z).abs() < 1e-2);
        assert!((hit.y - 1.0).abs() < 1e-4);

        scene.tick(0.016);
        assert!(scene.foliage_uniforms().pointer.distance(&hit) < 1e-4);

        // A miss counts as leaving
        let miss = Ray {
            origin: Vec3::new(0.0, 200.0, 100.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(scene.on_pointer_ray(&miss).is_none());
        scene.tick(0.016);
        assert_eq!(scene.foliage_uniforms().pointer, Vec3::splat(9999.0));
    }

    #[test]
    fn test_world_pointer_is_group_local() {
        let mut scene = small_scene(6);
        scene.on_pointer_world(Vec3::new(1.0, 3.0, 0.0));
        scene.tick(0.016);
        assert!(scene.foliage_uniforms().pointer.distance(&Vec3::new(1.0, 2.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut scene = small_scene(7);
        scene.set_morph_state(MorphState::TreeShape);
        scene.tick(-1.0);
        assert_eq!(scene.time(), 0.0);
        assert_eq!(scene.ornament(Category::Gifts).progress(), 0.0);
    }
}
