pub mod action;
mod effect;
#[cfg(test)]
pub(crate) mod fixtures;
mod state;
mod state_store;

pub use self::{state::*, state_store::StateStore};
