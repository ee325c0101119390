//! Instanced ornaments: gifts, baubles and lights
//!
//! Each category is generated once and animated by its own
//! [`OrnamentAnimator`] with an independent morph progress, so heavier
//! categories visibly lag lighter ones during a transition.

pub mod animator;
pub mod category;
pub mod instance_buffer;
pub mod item;

pub use animator::{OrnamentAnimator, item_progress};
pub use category::Category;
pub use instance_buffer::InstanceBuffer;
pub use item::{OrnamentItem, generate_items};
