//! The two built-in tables.

use super::definition::{
    BallConfig, BumperDescriptor, FlipperConfig, Palette, TableConfig, TableDefinition,
    FUNNEL_DRAIN_GAP,
};
use super::error::ConfigError;

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 2] = ["classic", "wide"];

/// Look up a built-in table by name.
pub fn preset(name: &str) -> Result<TableDefinition, ConfigError> {
    match name {
        "classic" => Ok(classic()),
        "wide" => Ok(wide()),
        other => Err(ConfigError::UnknownTable(other.to_string())),
    }
}

/// The standard table: 400 wide, five bumpers.
pub fn classic() -> TableDefinition {
    let table = TableConfig {
        width: 400.0,
        top_width: 400.0,
        bottom_width: 200.0,
        height: 700.0,
        wall_thickness: 12.0,
        funnel_start: 0.25,
        funnel_drop: 80.0,
        pivot_inset: 15.0,
        wall_chamfer: 2.0,
    };

    TableDefinition {
        name: "classic".into(),
        boundary: table.funnel_outline(),
        drain_gap: Some(FUNNEL_DRAIN_GAP),
        table,
        flipper: flipper(70.0, 0.2),
        ball: ball(10.0, 0.6),
        palette: Palette {
            background: "#1a1a2e".into(),
            walls: "#0f3460".into(),
            flippers: "#e94560".into(),
            bumpers: "#ff9a00".into(),
            ball: "#16c79a".into(),
        },
        bumpers: vec![
            BumperDescriptor::new(-70.0, 150.0, 22.0),
            BumperDescriptor::new(70.0, 150.0, 22.0),
            BumperDescriptor::new(0.0, 220.0, 25.0),
            BumperDescriptor::new(-50.0, 320.0, 18.0),
            BumperDescriptor::new(50.0, 320.0, 18.0),
        ],
        gravity: 1000.0,
    }
}

/// The second table: wider and taller, ten bumpers in rows, a diamond and a scatter.
pub fn wide() -> TableDefinition {
    let table = TableConfig {
        width: 450.0,
        top_width: 450.0,
        bottom_width: 220.0,
        height: 750.0,
        wall_thickness: 12.0,
        funnel_start: 0.25,
        funnel_drop: 80.0,
        pivot_inset: 15.0,
        wall_chamfer: 2.0,
    };

    TableDefinition {
        name: "wide".into(),
        boundary: table.funnel_outline(),
        drain_gap: Some(FUNNEL_DRAIN_GAP),
        table,
        flipper: flipper(75.0, 0.22),
        ball: ball(11.0, 0.7),
        palette: Palette {
            background: "#0d1117".into(),
            walls: "#238636".into(),
            flippers: "#f85149".into(),
            bumpers: "#a371f7".into(),
            ball: "#58a6ff".into(),
        },
        bumpers: vec![
            // Top row
            BumperDescriptor::new(-90.0, 120.0, 20.0),
            BumperDescriptor::new(0.0, 100.0, 25.0),
            BumperDescriptor::new(90.0, 120.0, 20.0),
            // Diamond
            BumperDescriptor::new(-60.0, 200.0, 22.0),
            BumperDescriptor::new(60.0, 200.0, 22.0),
            BumperDescriptor::new(0.0, 270.0, 28.0),
            // Scatter
            BumperDescriptor::new(-80.0, 370.0, 18.0),
            BumperDescriptor::new(80.0, 370.0, 18.0),
            BumperDescriptor::new(-40.0, 430.0, 15.0),
            BumperDescriptor::new(40.0, 430.0, 15.0),
        ],
        gravity: 1000.0,
    }
}

fn flipper(width: f32, power: f32) -> FlipperConfig {
    FlipperConfig {
        width,
        height: 14.0,
        gap: 10.0,
        y_offset: 50.0,
        power,
        max_angle: 0.7,
        relax_threshold: 0.4,
        relax_ratio: 0.6,
        chamfer: 6.0,
    }
}

fn ball(radius: f32, restitution: f32) -> BallConfig {
    BallConfig {
        radius,
        restitution,
        friction: 0.001,
        air_friction: 0.001,
        drain_margin: 50.0,
        spawn_offset: 50.0,
    }
}
