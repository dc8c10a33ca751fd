use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::error::ConfigError;

/// Drain gap of the 8-point funnel outline: between the right and left drain edges.
pub const FUNNEL_DRAIN_GAP: (usize, usize) = (4, 5);

/// Playfield dimensions, in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub width: f32,
    pub top_width: f32,
    pub bottom_width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Where the funnel starts, as a fraction of the height below the vertical center.
    #[serde(default = "default_funnel_start")]
    pub funnel_start: f32,
    /// Height of the vertical walls beside the drain.
    #[serde(default = "default_funnel_drop")]
    pub funnel_drop: f32,
    /// Horizontal distance from each drain edge to its flipper pivot.
    #[serde(default = "default_pivot_inset")]
    pub pivot_inset: f32,
    #[serde(default = "default_wall_chamfer")]
    pub wall_chamfer: f32,
}

impl TableConfig {
    /// Horizontal distance each side of the funnel travels inward.
    pub fn funnel_half_span(&self) -> f32 {
        self.top_width / 2.0 - self.bottom_width / 2.0
    }

    /// The playfield's inner perimeter in table-local coordinates
    /// (origin at the table center, Y down), clockwise from the top-left:
    ///
    /// ```text
    /// 0 ─────────── 1
    /// │             │
    /// 7             2
    ///  \           /
    ///   6         3
    ///   │         │
    ///   5  drain  4
    /// ```
    ///
    /// The drain gap is [`FUNNEL_DRAIN_GAP`].
    pub fn funnel_outline(&self) -> Vec<Vec2> {
        let left = -self.width / 2.0;
        let right = self.width / 2.0;
        let top = -self.height / 2.0;
        let bottom = self.height / 2.0;
        let funnel_y = self.height * self.funnel_start;
        let funnel_left = -self.bottom_width / 2.0;
        let funnel_right = self.bottom_width / 2.0;

        vec![
            Vec2::new(left, top),
            Vec2::new(right, top),
            Vec2::new(right, funnel_y),
            Vec2::new(funnel_right, bottom - self.funnel_drop),
            Vec2::new(funnel_right, bottom),
            Vec2::new(funnel_left, bottom),
            Vec2::new(funnel_left, bottom - self.funnel_drop),
            Vec2::new(left, funnel_y),
        ]
    }
}

/// Flipper shape and swing tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipperConfig {
    pub width: f32,
    pub height: f32,
    /// Authored gap between the flipper tips at rest. Pivots come from `pivot_inset`.
    pub gap: f32,
    /// Distance of the pivots above the table bottom.
    pub y_offset: f32,
    /// Swing speed in radians per tick.
    pub power: f32,
    /// Swing limit in radians.
    pub max_angle: f32,
    /// Angle past which a released flipper stops relaxing. Independent of `max_angle`.
    #[serde(default = "default_relax_threshold")]
    pub relax_threshold: f32,
    /// Relax speed as a fraction of `power`.
    #[serde(default = "default_relax_ratio")]
    pub relax_ratio: f32,
    #[serde(default = "default_flipper_chamfer")]
    pub chamfer: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallConfig {
    pub radius: f32,
    pub restitution: f32,
    #[serde(default = "default_ball_friction")]
    pub friction: f32,
    /// Fraction of velocity lost to air per tick.
    #[serde(default = "default_air_friction")]
    pub air_friction: f32,
    /// How far below the table bottom the ball must fall before it respawns.
    #[serde(default = "default_drain_margin")]
    pub drain_margin: f32,
    /// Spawn height below the table top.
    #[serde(default = "default_spawn_offset")]
    pub spawn_offset: f32,
}

/// A round, energy-adding obstacle.
/// `x` is measured from the table's center line and `y` from the table top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumperDescriptor {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    #[serde(default = "default_bumper_restitution")]
    pub restitution: f32,
}

impl BumperDescriptor {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            restitution: DEFAULT_BUMPER_RESTITUTION,
        }
    }
}

/// Hex colors handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub walls: String,
    pub flippers: String,
    pub bumpers: String,
    pub ball: String,
}

/// Parsed [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColors {
    pub background: Rgb,
    pub walls: Rgb,
    pub flippers: Rgb,
    pub bumpers: Rgb,
    pub ball: Rgb,
}

impl Palette {
    pub fn parse(&self) -> Result<PaletteColors, ConfigError> {
        fn parse_one(field: &'static str, value: &str) -> Result<Rgb, ConfigError> {
            Rgb::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
                field,
                value: value.to_string(),
            })
        }
        Ok(PaletteColors {
            background: parse_one("background", &self.background)?,
            walls: parse_one("walls", &self.walls)?,
            flippers: parse_one("flippers", &self.flippers)?,
            bumpers: parse_one("bumpers", &self.bumpers)?,
            ball: parse_one("ball", &self.ball)?,
        })
    }
}

/// Everything needed to build one table. Tables differ only in data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub table: TableConfig,
    pub flipper: FlipperConfig,
    pub ball: BallConfig,
    pub palette: Palette,
    #[serde(default)]
    pub bumpers: Vec<BumperDescriptor>,
    /// Inner perimeter in table-local coordinates. Empty means the funnel outline.
    #[serde(default)]
    pub boundary: Vec<Vec2>,
    /// Consecutive boundary indices with no wall between them.
    #[serde(default)]
    pub drain_gap: Option<(usize, usize)>,
    /// Downward acceleration in world units per second squared.
    #[serde(default = "default_gravity")]
    pub gravity: f32,
}

impl TableDefinition {
    /// Parse a definition from JSON, fill in the funnel outline when no boundary
    /// is given, and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut def: TableDefinition = serde_json::from_str(json)?;
        if def.boundary.is_empty() {
            def.boundary = def.table.funnel_outline();
            def.drain_gap.get_or_insert(FUNNEL_DRAIN_GAP);
        }
        def.validate()?;
        Ok(def)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.table;
        positive("table.width", t.width)?;
        positive("table.top_width", t.top_width)?;
        positive("table.bottom_width", t.bottom_width)?;
        positive("table.height", t.height)?;
        positive("table.wall_thickness", t.wall_thickness)?;
        non_negative("table.funnel_start", t.funnel_start)?;
        non_negative("table.funnel_drop", t.funnel_drop)?;
        non_negative("table.pivot_inset", t.pivot_inset)?;
        non_negative("table.wall_chamfer", t.wall_chamfer)?;
        if !(t.bottom_width < t.top_width) {
            return Err(ConfigError::FunnelNotTapered {
                top_width: t.top_width,
                bottom_width: t.bottom_width,
            });
        }

        let f = &self.flipper;
        positive("flipper.width", f.width)?;
        positive("flipper.height", f.height)?;
        positive("flipper.power", f.power)?;
        non_negative("flipper.gap", f.gap)?;
        non_negative("flipper.y_offset", f.y_offset)?;
        non_negative("flipper.relax_threshold", f.relax_threshold)?;
        non_negative("flipper.relax_ratio", f.relax_ratio)?;
        non_negative("flipper.chamfer", f.chamfer)?;
        if !(f.max_angle > 0.0 && f.max_angle < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::MaxAngleOutOfRange(f.max_angle));
        }

        let b = &self.ball;
        positive("ball.radius", b.radius)?;
        non_negative("ball.restitution", b.restitution)?;
        non_negative("ball.friction", b.friction)?;
        non_negative("ball.air_friction", b.air_friction)?;
        non_negative("ball.drain_margin", b.drain_margin)?;
        non_negative("ball.spawn_offset", b.spawn_offset)?;

        for (index, bumper) in self.bumpers.iter().enumerate() {
            positive("bumper.radius", bumper.radius)?;
            if !(bumper.restitution > 1.0) {
                return Err(ConfigError::BumperNotBouncy {
                    index,
                    restitution: bumper.restitution,
                });
            }
        }

        let points = self.boundary.len();
        if points < 3 {
            return Err(ConfigError::TooFewBoundaryPoints(points));
        }
        if let Some(gap) = self.drain_gap {
            if gap.0 >= points || gap.1 >= points {
                return Err(ConfigError::DrainGapOutOfBounds { gap, points });
            }
            if (gap.0 + 1) % points != gap.1 {
                return Err(ConfigError::DrainGapNotAdjacent { gap, points });
            }
        }

        non_negative("gravity", self.gravity)?;
        self.palette.parse()?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

// -- serde defaults --

pub const DEFAULT_BUMPER_RESTITUTION: f32 = 1.5;

fn default_funnel_start() -> f32 {
    0.25
}

fn default_funnel_drop() -> f32 {
    80.0
}

fn default_pivot_inset() -> f32 {
    15.0
}

fn default_wall_chamfer() -> f32 {
    2.0
}

fn default_relax_threshold() -> f32 {
    0.4
}

fn default_relax_ratio() -> f32 {
    0.6
}

fn default_flipper_chamfer() -> f32 {
    6.0
}

fn default_ball_friction() -> f32 {
    0.001
}

fn default_air_friction() -> f32 {
    0.001
}

fn default_drain_margin() -> f32 {
    50.0
}

fn default_spawn_offset() -> f32 {
    50.0
}

fn default_bumper_restitution() -> f32 {
    DEFAULT_BUMPER_RESTITUTION
}

fn default_gravity() -> f32 {
    1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    const MINIMAL_JSON: &str = r##"{
        "name": "minimal",
        "table": { "width": 400, "top_width": 400, "bottom_width": 200, "height": 700, "wall_thickness": 12 },
        "flipper": { "width": 70, "height": 14, "gap": 10, "y_offset": 50, "power": 0.2, "max_angle": 0.7 },
        "ball": { "radius": 10, "restitution": 0.6 },
        "palette": { "background": "#1a1a2e", "walls": "#0f3460", "flippers": "#e94560", "bumpers": "#ff9a00", "ball": "#16c79a" },
        "bumpers": [ { "x": 0, "y": 220, "radius": 25 } ]
    }"##;

    #[test]
    fn json_fills_defaults_and_funnel_outline() {
        let def = TableDefinition::from_json(MINIMAL_JSON).unwrap();
        assert_eq!(def.boundary.len(), 8);
        assert_eq!(def.drain_gap, Some(FUNNEL_DRAIN_GAP));
        assert_eq!(def.flipper.relax_threshold, 0.4);
        assert_eq!(def.flipper.relax_ratio, 0.6);
        assert_eq!(def.ball.drain_margin, 50.0);
        assert_eq!(def.bumpers[0].restitution, DEFAULT_BUMPER_RESTITUTION);
        assert_eq!(def.gravity, 1000.0);
    }

    #[test]
    fn json_round_trips_presets() {
        let def = presets::classic();
        let parsed = TableDefinition::from_json(&def.to_json().unwrap()).unwrap();
        assert_eq!(parsed, def);
    }

    #[test]
    fn funnel_half_span_matches_outline() {
        let def = presets::classic();
        assert_eq!(def.table.funnel_half_span(), 100.0);
        let outline = def.table.funnel_outline();
        // Left wall x minus left drain edge x
        assert_eq!(outline[5].x - outline[0].x, def.table.funnel_half_span());
        assert_eq!(outline[1].x - outline[4].x, def.table.funnel_half_span());
    }

    #[test]
    fn rejects_untapered_funnel() {
        let mut def = presets::classic();
        def.table.bottom_width = def.table.top_width;
        assert!(matches!(def.validate(), Err(ConfigError::FunnelNotTapered { .. })));
    }

    #[test]
    fn rejects_zero_wall_thickness() {
        let mut def = presets::classic();
        def.table.wall_thickness = 0.0;
        match def.validate() {
            Err(ConfigError::NonPositive { field, .. }) => assert_eq!(field, "table.wall_thickness"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_max_angle_outside_quarter_turn() {
        for angle in [0.0, -0.3, std::f32::consts::FRAC_PI_2, 2.0, f32::NAN] {
            let mut def = presets::classic();
            def.flipper.max_angle = angle;
            assert!(
                matches!(def.validate(), Err(ConfigError::MaxAngleOutOfRange(_))),
                "angle {} accepted",
                angle
            );
        }
    }

    #[test]
    fn rejects_negative_ball_restitution_but_allows_super_bouncy() {
        let mut def = presets::classic();
        def.ball.restitution = 1.3;
        assert!(def.validate().is_ok());
        def.ball.restitution = -0.1;
        assert!(matches!(def.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn rejects_dull_bumper() {
        let mut def = presets::classic();
        def.bumpers[2].restitution = 1.0;
        assert!(matches!(
            def.validate(),
            Err(ConfigError::BumperNotBouncy { index: 2, .. })
        ));
    }

    #[test]
    fn rejects_bad_drain_gaps() {
        let mut def = presets::classic();
        def.drain_gap = Some((4, 6));
        assert!(matches!(def.validate(), Err(ConfigError::DrainGapNotAdjacent { .. })));

        def.drain_gap = Some((8, 0));
        assert!(matches!(def.validate(), Err(ConfigError::DrainGapOutOfBounds { .. })));

        // Wrapping pair is adjacent
        def.drain_gap = Some((7, 0));
        assert!(def.validate().is_ok());

        def.drain_gap = None;
        assert!(def.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_boundary() {
        let mut def = presets::classic();
        def.boundary.truncate(2);
        def.drain_gap = None;
        assert!(matches!(def.validate(), Err(ConfigError::TooFewBoundaryPoints(2))));
    }

    #[test]
    fn rejects_bad_palette() {
        let mut def = presets::classic();
        def.palette.walls = "blue".into();
        assert!(matches!(
            def.validate(),
            Err(ConfigError::InvalidColor { field: "walls", .. })
        ));

        def.palette.walls = "#ffffff".into();
        def.palette.ball = "#+f+f+f".into();
        assert!(matches!(
            def.validate(),
            Err(ConfigError::InvalidColor { field: "ball", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            TableDefinition::from_json("{ \"name\": 3 }"),
            Err(ConfigError::Json(_))
        ));
    }
}
