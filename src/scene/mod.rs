//! Scene configuration, morph state and the per-frame controller

pub mod config;
pub mod controller;
pub mod palette;
pub mod state;

pub use config::SceneConfig;
pub use controller::{Scene, GROUP_OFFSET};
pub use state::MorphState;
