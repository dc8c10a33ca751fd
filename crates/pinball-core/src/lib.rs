pub mod api;
pub mod components;
pub mod config;
pub mod core;
pub mod flipper;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod table;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::types::{BodyKind, EntityId};
pub use components::entity::Entity;
pub use config::{
    preset, BallConfig, BumperDescriptor, ConfigError, FlipperConfig, Palette, PaletteColors, Rgb,
    TableConfig, TableDefinition, PRESET_NAMES,
};
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use flipper::{flipper_command, FlipperRig, Side};
pub use input::{InputEvent, InputQueue, InputState, KeyBindings};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use systems::drain::DrainRule;
pub use table::{generate_walls, TableLayout, WallSegment};

#[cfg(feature = "physics")]
pub use api::session::{PinballSession, TICK_DT};
#[cfg(feature = "physics")]
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CombineRule, JointHandle, PhysicsBody,
    PhysicsWorld,
};
#[cfg(feature = "physics")]
pub use flipper::Flipper;
