mod components;
mod my_rooms_page;

pub use my_rooms_page::MyRoomsPage;
