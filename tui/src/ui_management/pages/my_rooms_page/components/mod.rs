pub mod join_modal;
pub mod room_grid;
