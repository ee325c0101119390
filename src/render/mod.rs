pub mod camera;
pub mod webgl;
pub mod shaders;
pub mod pipeline;

pub use camera::OrbitCamera;
pub use webgl::WebGLContext;
pub use pipeline::{FrameParams, RenderPipeline};
