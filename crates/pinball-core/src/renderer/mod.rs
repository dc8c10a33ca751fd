pub mod instance;

pub use instance::{RenderBuffer, RenderInstance, SHAPE_BOX, SHAPE_CIRCLE};
