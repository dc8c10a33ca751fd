pub mod drain;
pub mod render;
