pub mod controller;
pub mod rig;

pub use controller::{flipper_command, Side};
pub use rig::{FlipperRig, FLIPPER_GROUP};
#[cfg(feature = "physics")]
pub use rig::Flipper;
