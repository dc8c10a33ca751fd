use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyKind;

/// `shape` value for boxes (walls, flippers).
pub const SHAPE_BOX: f32 = 0.0;
/// `shape` value for circles (bumpers, the ball).
pub const SHAPE_CIRCLE: f32 = 1.0;

/// Per-instance drawing hint read by the host renderer.
/// Must match the host protocol: 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position of the shape's center in world space.
    pub x: f32,
    /// Y position of the shape's center in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// `SHAPE_BOX` or `SHAPE_CIRCLE`.
    pub shape: f32,
    /// Full width (diameter for circles).
    pub width: f32,
    /// Full height (diameter for circles).
    pub height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn shape_for(kind: BodyKind) -> f32 {
        if kind.is_round() {
            SHAPE_CIRCLE
        } else {
            SHAPE_BOX
        }
    }
}

/// Render buffer holding one instance per visible table body.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The instances as one flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
