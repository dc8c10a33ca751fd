use glam::Vec2;

use crate::api::types::{BodyKind, EntityId};
use crate::config::Rgb;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// One piece of the table: a wall segment, bumper, flipper or the ball.
/// Position and rotation mirror the physics body after every step.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: BodyKind,
    /// Inactive entities are skipped by the renderer.
    pub active: bool,
    pub pos: Vec2,
    pub rotation: f32,
    /// Full width and height in world units. Round kinds use `size.x` as the diameter.
    pub size: Vec2,
    pub color: Rgb,
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    pub fn new(id: EntityId, kind: BodyKind) -> Self {
        Self {
            id,
            kind,
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            color: Rgb::new(1.0, 1.0, 1.0),
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }
}
