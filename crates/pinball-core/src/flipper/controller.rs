//! Per-tick flipper drive.
//!
//! The left flipper fires toward negative angles and the right one toward
//! positive angles; otherwise the two are exact mirror images. A command is a
//! pure function of the button state and the current angle, recomputed every
//! tick with no memory of earlier ticks.

use crate::config::FlipperConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the angular velocity that fires this flipper.
    pub fn fire_sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Angular velocity (radians per tick) to command for one flipper.
///
/// - held and short of `max_angle`: swing up at `power`
/// - released and short of `relax_threshold` on the rest side: fall back at
///   `power * relax_ratio`
/// - otherwise: hold still
pub fn flipper_command(side: Side, active: bool, angle: f32, config: &FlipperConfig) -> f32 {
    let sign = side.fire_sign();
    // Angle measured in the firing direction, so both sides share one rule.
    let swing = angle * sign;

    if active && swing < config.max_angle {
        sign * config.power
    } else if !active && swing > -config.relax_threshold {
        -sign * config.power * config.relax_ratio
    } else {
        0.0
    }
}
