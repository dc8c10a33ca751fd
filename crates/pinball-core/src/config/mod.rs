pub mod color;
pub mod definition;
pub mod error;
pub mod presets;

pub use color::Rgb;
pub use definition::{
    BallConfig, BumperDescriptor, FlipperConfig, Palette, PaletteColors, TableConfig,
    TableDefinition, FUNNEL_DRAIN_GAP,
};
pub use error::ConfigError;
pub use presets::{preset, PRESET_NAMES};
