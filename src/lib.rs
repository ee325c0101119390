use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, HtmlCanvasElement};

pub mod animation;
pub mod error;
pub mod foliage;
pub mod interaction;
pub mod math;
pub mod mesh;
pub mod ornaments;
pub mod render;
pub mod scene;
pub mod star;

use error::{SceneError, SceneResult};
use foliage::KernelParams;
use interaction::screen_ray;
use math::Vec3;
use mesh::Mesh;
use ornaments::Category;
use render::{FrameParams, OrbitCamera, RenderPipeline};
use scene::{MorphState, Scene, SceneConfig};
use star::{star_outline, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS};

const STAR_DEPTH: f32 = 0.2;

/// Install the panic hook and the console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            log::warn!("logger already installed");
        }
    }
}

/// Unit shape drawn for every instance of a category
fn ornament_mesh(category: Category) -> Mesh {
    match category {
        Category::Gifts => mesh::cube(1.0),
        Category::Baubles => mesh::uv_sphere(1.0, 32, 32),
        Category::Lights => mesh::octahedron(1.0),
    }
}

/// Scene controller exposed to JavaScript
#[wasm_bindgen]
pub struct MorphingTree {
    scene: Scene,
    pipeline: RenderPipeline,
    camera: OrbitCamera,
}

#[wasm_bindgen]
impl MorphingTree {
    /// Create the scene with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<MorphingTree, JsValue> {
        Ok(Self::build(canvas, SceneConfig::default())?)
    }

    /// Create the scene with YAML overrides on top of the defaults
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<MorphingTree, JsValue> {
        let config = SceneConfig::from_yaml(yaml)?;
        Ok(Self::build(canvas, config)?)
    }

    fn build(canvas: HtmlCanvasElement, config: SceneConfig) -> SceneResult<MorphingTree> {
        config.validate()?;

        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")
            .map_err(|e| SceneError::Render(format!("{:?}", e)))?
            .ok_or_else(|| SceneError::Render("WebGL2 is not available".to_string()))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| SceneError::Render("context is not WebGL2".to_string()))?;

        let kernel = KernelParams {
            interaction_radius: config.foliage.interaction_radius,
            push_distance: config.foliage.push_distance,
        };
        let mut pipeline = RenderPipeline::new(gl, width, height, kernel).map_err(SceneError::Render)?;

        let scene = Scene::new(config);

        for animator in scene.ornaments() {
            if let Some(buffer) = animator.buffer() {
                let category = animator.category();
                pipeline
                    .upload_ornaments(category, &ornament_mesh(category), buffer)
                    .map_err(SceneError::Render)?;
            }
        }
        pipeline.upload_foliage(scene.foliage().cloud()).map_err(SceneError::Render)?;

        let outline = star_outline(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS);
        pipeline
            .upload_star(&mesh::extrude_star(&outline, STAR_DEPTH))
            .map_err(SceneError::Render)?;

        Ok(MorphingTree {
            scene,
            pipeline,
            camera: OrbitCamera::default(),
        })
    }

    /// Set the arrangement: `true` for the tree, `false` for the scattered cloud
    #[wasm_bindgen]
    pub fn set_morph_state(&mut self, tree: bool) {
        self.scene.set_morph_state(MorphState::from_tree_shape(tree));
    }

    /// Flip the arrangement and return whether it is now the tree
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> bool {
        self.scene.toggle().is_tree_shape()
    }

    #[wasm_bindgen]
    pub fn is_tree_shape(&self) -> bool {
        self.scene.state().is_tree_shape()
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.scene.tick(dt);
        self.camera.update(dt.max(0.0), self.scene.state().is_tree_shape());

        for animator in self.scene.ornaments() {
            if let Some(buffer) = animator.buffer() {
                self.pipeline.sync_ornaments(animator.category(), buffer);
            }
        }

        let star = self.scene.star();
        self.pipeline.render(&FrameParams {
            camera: &self.camera,
            group: self.scene.group_transform(),
            foliage: self.scene.foliage_uniforms(),
            star_model: star.transform(),
            star_emissive: star.emissive_intensity(),
            star_light: star.light_intensity(),
        });
    }

    /// Pointer in canvas pixels; returns whether it is over the collider
    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let (width, height) = self.pipeline.size();
        let aspect = width as f32 / height as f32;
        let ray = screen_ray(
            x,
            y,
            width as f32,
            height as f32,
            &self.camera.view(),
            &self.camera.projection(aspect),
            self.camera.position(),
        );
        self.scene.on_pointer_ray(&ray).is_some()
    }

    /// Pointer already resolved to a world-space point by the host
    #[wasm_bindgen]
    pub fn on_pointer_move_world(&mut self, x: f32, y: f32, z: f32) {
        self.scene.on_pointer_world(Vec3::new(x, y, z));
    }

    #[wasm_bindgen]
    pub fn on_pointer_out(&mut self) {
        self.scene.on_pointer_out();
    }

    /// Orbit camera
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    /// Smoothed progress of a category (0 gifts, 1 baubles, 2 lights)
    #[wasm_bindgen]
    pub fn ornament_progress(&self, category: usize) -> Option<f32> {
        Category::from_index(category).map(|c| self.scene.ornament(c).progress())
    }

    #[wasm_bindgen]
    pub fn foliage_progress(&self) -> f32 {
        self.scene.foliage().progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ornament_meshes() {
        assert_eq!(ornament_mesh(Category::Gifts).triangle_count(), 12);
        assert_eq!(ornament_mesh(Category::Lights).triangle_count(), 8);
        assert!(ornament_mesh(Category::Baubles).vertex_count() > 100);
    }
}
