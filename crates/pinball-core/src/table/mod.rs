pub mod geometry;
pub mod layout;

pub use geometry::{generate_walls, WallSegment};
pub use layout::TableLayout;
