pub mod alert_box;
mod component;
pub mod input_box;
pub mod layout;
pub mod usage;

pub use component::{Component, ComponentRender};
