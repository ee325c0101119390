use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::foliage::{FoliageUniforms, KernelParams, PointCloud};
use crate::math::{Mat4, Vec3};
use crate::mesh::{Mesh, VERTEX_STRIDE};
use crate::ornaments::{Category, InstanceBuffer};
use crate::scene::palette;
use super::camera::OrbitCamera;
use super::webgl::WebGLContext;
use super::shaders::*;

/// Cached uniform locations for the lit programs
struct LitUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    specular_strength: Option<WebGlUniformLocation>,
    emissive_intensity: Option<WebGlUniformLocation>,
    star_light_pos: Option<WebGlUniformLocation>,
    star_light_intensity: Option<WebGlUniformLocation>,
}

impl LitUniforms {
    /// `model_name` is `u_group` for the instanced program, `u_model` for the star
    fn locate(ctx: &WebGLContext, program: &WebGlProgram, model_name: &str) -> Self {
        Self {
            model: ctx.get_uniform_location(program, model_name),
            view: ctx.get_uniform_location(program, "u_view"),
            projection: ctx.get_uniform_location(program, "u_projection"),
            color: ctx.get_uniform_location(program, "u_color"),
            camera_pos: ctx.get_uniform_location(program, "u_camera_pos"),
            shininess: ctx.get_uniform_location(program, "u_shininess"),
            specular_strength: ctx.get_uniform_location(program, "u_specular_strength"),
            emissive_intensity: ctx.get_uniform_location(program, "u_emissive_intensity"),
            star_light_pos: ctx.get_uniform_location(program, "u_star_light_pos"),
            star_light_intensity: ctx.get_uniform_location(program, "u_star_light_intensity"),
        }
    }
}

/// Cached uniform locations for the foliage program
struct FoliageUniformLocations {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    morph: Option<WebGlUniformLocation>,
    pointer: Option<WebGlUniformLocation>,
    interaction_radius: Option<WebGlUniformLocation>,
    push_distance: Option<WebGlUniformLocation>,
    color_base: Option<WebGlUniformLocation>,
    color_tip: Option<WebGlUniformLocation>,
}

/// Surface response of one ornament category
#[derive(Debug, Clone, Copy)]
struct Material {
    shininess: f32,
    specular_strength: f32,
    emissive_intensity: f32,
}

impl Material {
    fn for_category(category: Category) -> Self {
        match category {
            // Satin card
            Category::Gifts => Self { shininess: 48.0, specular_strength: 0.5, emissive_intensity: 0.0 },
            // Painted metal
            Category::Baubles => Self { shininess: 64.0, specular_strength: 0.8, emissive_intensity: 0.0 },
            // Self-lit, not tone mapped
            Category::Lights => Self { shininess: 8.0, specular_strength: 0.0, emissive_intensity: 1.5 },
        }
    }
}

/// GPU side of one instanced ornament category
struct InstancedBatch {
    vao: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
    matrix_buffer: WebGlBuffer,
    color_buffer: WebGlBuffer,
    instance_count: i32,
    uploaded_matrix_version: u64,
    uploaded_color_version: u64,
    material: Material,
}

/// Non-instanced indexed mesh
struct MeshHandle {
    vao: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
}

struct FoliageHandle {
    vao: WebGlVertexArrayObject,
    buffers: [WebGlBuffer; 3],
    count: i32,
}

/// Everything the pipeline needs to draw one frame
pub struct FrameParams<'a> {
    pub camera: &'a OrbitCamera,
    /// Offset shared by every object in the scene
    pub group: Mat4,
    pub foliage: FoliageUniforms,
    pub star_model: Mat4,
    pub star_emissive: f32,
    pub star_light: f32,
}

/// Render pipeline for the ornaments, the foliage cloud and the star
pub struct RenderPipeline {
    ctx: WebGLContext,

    // Shaders
    ornament_program: WebGlProgram,
    star_program: WebGlProgram,
    foliage_program: WebGlProgram,

    // Uniform locations
    ornament_uniforms: LitUniforms,
    star_uniforms: LitUniforms,
    foliage_uniforms: FoliageUniformLocations,

    batches: [Option<InstancedBatch>; 3],
    foliage: Option<FoliageHandle>,
    star: Option<MeshHandle>,
    kernel: KernelParams,

    // Dimensions
    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32, kernel: KernelParams) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        // Compile shaders
        let ornament_program = ctx.create_program(ORNAMENT_VERTEX_SHADER, LIT_FRAGMENT_SHADER)?;
        let star_program = ctx.create_program(STAR_VERTEX_SHADER, LIT_FRAGMENT_SHADER)?;
        let foliage_program = ctx.create_program(FOLIAGE_VERTEX_SHADER, FOLIAGE_FRAGMENT_SHADER)?;

        // Get uniform locations
        let ornament_uniforms = LitUniforms::locate(&ctx, &ornament_program, "u_group");
        let star_uniforms = LitUniforms::locate(&ctx, &star_program, "u_model");

        let foliage_uniforms = FoliageUniformLocations {
            model: ctx.get_uniform_location(&foliage_program, "u_model"),
            view: ctx.get_uniform_location(&foliage_program, "u_view"),
            projection: ctx.get_uniform_location(&foliage_program, "u_projection"),
            time: ctx.get_uniform_location(&foliage_program, "u_time"),
            morph: ctx.get_uniform_location(&foliage_program, "u_morph"),
            pointer: ctx.get_uniform_location(&foliage_program, "u_pointer"),
            interaction_radius: ctx.get_uniform_location(&foliage_program, "u_interaction_radius"),
            push_distance: ctx.get_uniform_location(&foliage_program, "u_push_distance"),
            color_base: ctx.get_uniform_location(&foliage_program, "u_color_base"),
            color_tip: ctx.get_uniform_location(&foliage_program, "u_color_tip"),
        };

        Ok(Self {
            ctx,
            ornament_program,
            star_program,
            foliage_program,
            ornament_uniforms,
            star_uniforms,
            foliage_uniforms,
            batches: [None, None, None],
            foliage: None,
            star: None,
            kernel,
            width,
            height,
        })
    }

    /// Bind position(3) + normal(3) from a fresh vertex buffer into the bound VAO
    fn upload_mesh_attributes(&self, mesh: &Mesh) -> Result<(WebGlBuffer, WebGlBuffer), String> {
        let gl = &self.ctx.gl;

        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        let index_buffer = self.ctx.create_index_buffer(mesh.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;

        let stride = (VERTEX_STRIDE * 4) as i32;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));

        // Position (location 0)
        self.ctx.float_attribute(0, 3, stride, 0);
        // Normal (location 1)
        self.ctx.float_attribute(1, 3, stride, 12);

        Ok((vertex_buffer, index_buffer))
    }

    /// Upload the shape and both instance streams for one ornament category
    pub fn upload_ornaments(&mut self, category: Category, mesh: &Mesh, instances: &InstanceBuffer) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let (vertex_buffer, index_buffer) = self.upload_mesh_attributes(mesh)?;

        // Colour (location 2), once per instance
        let color_buffer = self.ctx.create_buffer_f32(instances.color_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&color_buffer));
        self.ctx.instanced_vec3_attribute(2);

        // Instance matrix (locations 3..=6)
        let matrix_buffer = self.ctx.create_buffer_f32(instances.matrix_data(), WebGl2RenderingContext::DYNAMIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&matrix_buffer));
        self.ctx.instanced_mat4_attribute(3);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        let previous = self.batches[category.index()].replace(InstancedBatch {
            vao,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_data().len() as i32,
            matrix_buffer,
            color_buffer,
            instance_count: instances.capacity() as i32,
            uploaded_matrix_version: instances.matrix_version(),
            uploaded_color_version: instances.color_version(),
            material: Material::for_category(category),
        });
        if let Some(old) = previous {
            self.release_batch(&old);
        }

        log::debug!("uploaded {} {} instances", instances.capacity(), category.name());
        Ok(())
    }

    /// Re-upload instance streams whose version moved since the last upload
    pub fn sync_ornaments(&mut self, category: Category, instances: &InstanceBuffer) {
        let Some(batch) = self.batches[category.index()].as_mut() else {
            return;
        };

        if instances.matrix_version() != batch.uploaded_matrix_version {
            self.ctx.update_buffer_f32(&batch.matrix_buffer, instances.matrix_data());
            batch.uploaded_matrix_version = instances.matrix_version();
        }
        if instances.color_version() != batch.uploaded_color_version {
            self.ctx.update_buffer_f32(&batch.color_buffer, instances.color_data());
            batch.uploaded_color_version = instances.color_version();
        }
    }

    /// Upload the three immutable foliage attribute streams
    pub fn upload_foliage(&mut self, cloud: &PointCloud) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let scatter = self.ctx.create_buffer_f32(&cloud.scatter_positions, WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&scatter));
        self.ctx.float_attribute(0, 3, 0, 0);

        let tree = self.ctx.create_buffer_f32(&cloud.tree_positions, WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&tree));
        self.ctx.float_attribute(1, 3, 0, 0);

        let randoms = self.ctx.create_buffer_f32(&cloud.randoms, WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&randoms));
        self.ctx.float_attribute(2, 1, 0, 0);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        if let Some(old) = self.foliage.replace(FoliageHandle {
            vao,
            buffers: [scatter, tree, randoms],
            count: cloud.len() as i32,
        }) {
            self.release_foliage(&old);
        }

        Ok(())
    }

    pub fn upload_star(&mut self, mesh: &Mesh) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));
        let (vertex_buffer, index_buffer) = self.upload_mesh_attributes(mesh)?;
        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        if let Some(old) = self.star.replace(MeshHandle {
            vao,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_data().len() as i32,
        }) {
            self.release_mesh(&old);
        }

        Ok(())
    }

    fn set_lit_frame_uniforms(&self, uniforms: &LitUniforms, frame: &FrameParams, view: &Mat4, projection: &Mat4) {
        let star_pos = frame.group.transform_point(frame.star_model.position());

        self.ctx.uniform_matrix4fv(uniforms.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(uniforms.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_vec3(uniforms.camera_pos.as_ref(), frame.camera.position());
        self.ctx.uniform_vec3(uniforms.star_light_pos.as_ref(), star_pos);
        self.ctx.uniform_1f(uniforms.star_light_intensity.as_ref(), frame.star_light);
    }

    /// Render a frame
    pub fn render(&self, frame: &FrameParams) {
        let gl = &self.ctx.gl;

        // Calculate matrices
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let projection = frame.camera.projection(aspect);
        let view = frame.camera.view();

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.0, 0.0, 0.0, 1.0);
        self.ctx.opaque_pass();

        // Ornaments
        if self.batches.iter().any(Option::is_some) {
            gl.use_program(Some(&self.ornament_program));
            self.set_lit_frame_uniforms(&self.ornament_uniforms, frame, &view, &projection);
            self.ctx.uniform_matrix4fv(self.ornament_uniforms.model.as_ref(), frame.group.as_slice());

            for batch in self.batches.iter().flatten() {
                self.ctx.uniform_1f(self.ornament_uniforms.shininess.as_ref(), batch.material.shininess);
                self.ctx.uniform_1f(self.ornament_uniforms.specular_strength.as_ref(), batch.material.specular_strength);
                self.ctx.uniform_1f(self.ornament_uniforms.emissive_intensity.as_ref(), batch.material.emissive_intensity);

                gl.bind_vertex_array(Some(&batch.vao));
                gl.draw_elements_instanced_with_i32(
                    WebGl2RenderingContext::TRIANGLES,
                    batch.index_count,
                    WebGl2RenderingContext::UNSIGNED_INT,
                    0,
                    batch.instance_count,
                );
            }
        }

        // Star
        if let Some(star) = &self.star {
            gl.use_program(Some(&self.star_program));
            self.set_lit_frame_uniforms(&self.star_uniforms, frame, &view, &projection);

            let model = frame.group.mul(&frame.star_model);
            self.ctx.uniform_matrix4fv(self.star_uniforms.model.as_ref(), model.as_slice());
            self.ctx.uniform_vec3(self.star_uniforms.color.as_ref(), Vec3::from_rgb_hex(palette::GOLD));
            self.ctx.uniform_1f(self.star_uniforms.shininess.as_ref(), 32.0);
            self.ctx.uniform_1f(self.star_uniforms.specular_strength.as_ref(), 0.6);
            self.ctx.uniform_1f(self.star_uniforms.emissive_intensity.as_ref(), frame.star_emissive);

            gl.bind_vertex_array(Some(&star.vao));
            gl.draw_elements_with_i32(
                WebGl2RenderingContext::TRIANGLES,
                star.index_count,
                WebGl2RenderingContext::UNSIGNED_INT,
                0,
            );
        }

        // Foliage last, additive over the opaque pass
        if let Some(foliage) = self.foliage.as_ref().filter(|f| f.count > 0) {
            let u = &self.foliage_uniforms;
            gl.use_program(Some(&self.foliage_program));
            self.ctx.additive_pass();

            self.ctx.uniform_matrix4fv(u.model.as_ref(), frame.group.as_slice());
            self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(u.time.as_ref(), frame.foliage.time);
            self.ctx.uniform_1f(u.morph.as_ref(), frame.foliage.morph);
            self.ctx.uniform_vec3(u.pointer.as_ref(), frame.foliage.pointer);
            self.ctx.uniform_1f(u.interaction_radius.as_ref(), self.kernel.interaction_radius);
            self.ctx.uniform_1f(u.push_distance.as_ref(), self.kernel.push_distance);
            self.ctx.uniform_vec3(u.color_base.as_ref(), Vec3::from_rgb_hex(palette::EMERALD));
            self.ctx.uniform_vec3(u.color_tip.as_ref(), Vec3::from_rgb_hex(palette::GOLD));

            gl.bind_vertex_array(Some(&foliage.vao));
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, foliage.count);

            self.ctx.opaque_pass();
        }

        gl.bind_vertex_array(None);
    }

    /// Resize the render pipeline
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn release_batch(&self, batch: &InstancedBatch) {
        self.ctx.delete_vao(Some(&batch.vao));
        for buffer in [&batch.vertex_buffer, &batch.index_buffer, &batch.matrix_buffer, &batch.color_buffer] {
            self.ctx.delete_buffer(Some(buffer));
        }
    }

    fn release_mesh(&self, mesh: &MeshHandle) {
        self.ctx.delete_vao(Some(&mesh.vao));
        self.ctx.delete_buffer(Some(&mesh.vertex_buffer));
        self.ctx.delete_buffer(Some(&mesh.index_buffer));
    }

    fn release_foliage(&self, foliage: &FoliageHandle) {
        self.ctx.delete_vao(Some(&foliage.vao));
        for buffer in &foliage.buffers {
            self.ctx.delete_buffer(Some(buffer));
        }
    }
}

impl Drop for RenderPipeline {
    fn drop(&mut self) {
        let batches: Vec<InstancedBatch> = self.batches.iter_mut().filter_map(Option::take).collect();
        for batch in &batches {
            self.release_batch(batch);
        }
        if let Some(foliage) = self.foliage.take() {
            self.release_foliage(&foliage);
        }
        if let Some(star) = self.star.take() {
            self.release_mesh(&star);
        }
        self.ctx.delete_program(Some(&self.ornament_program));
        self.ctx.delete_program(Some(&self.star_program));
        self.ctx.delete_program(Some(&self.foliage_program));
        log::debug!("render pipeline released");
    }
}
