use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced while building the scene.
///
/// The per-frame path has no error domain; everything here happens once at
/// construction or resize.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scene config: {0}")]
    InvalidConfig(String),

    #[error("render setup failed: {0}")]
    Render(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

impl From<SceneError> for JsValue {
    fn from(err: SceneError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
