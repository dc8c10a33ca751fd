//! Flipper placement and pin geometry.

use glam::Vec2;

use super::controller::Side;
use crate::config::FlipperConfig;
use crate::table::TableLayout;

#[cfg(feature = "physics")]
use crate::core::physics::{
    BodyDesc, ColliderDesc, ColliderMaterial, JointHandle, PhysicsBody, PhysicsWorld,
};

/// Exclusive collision group shared by both flippers.
pub const FLIPPER_GROUP: u8 = 1;

/// Where a flipper sits and where it is pinned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipperRig {
    pub side: Side,
    /// Body center at rest.
    pub center: Vec2,
    /// Fixed world point of the hinge.
    pub pivot: Vec2,
    /// Hinge point in the flipper's own frame: its outer edge.
    pub local_pivot: Vec2,
    pub half_extents: Vec2,
    pub chamfer: f32,
}

impl FlipperRig {
    /// Hinged on its left edge, extending right toward the table center.
    pub fn left(pivot_x: f32, y: f32, config: &FlipperConfig) -> Self {
        Self::new(Side::Left, pivot_x, y, config)
    }

    /// Hinged on its right edge, extending left toward the table center.
    pub fn right(pivot_x: f32, y: f32, config: &FlipperConfig) -> Self {
        Self::new(Side::Right, pivot_x, y, config)
    }

    fn new(side: Side, pivot_x: f32, y: f32, config: &FlipperConfig) -> Self {
        let half_width = config.width / 2.0;
        // The body extends away from its hinge, toward the middle.
        let toward_center = match side {
            Side::Left => 1.0,
            Side::Right => -1.0,
        };
        Self {
            side,
            center: Vec2::new(pivot_x + toward_center * half_width, y),
            pivot: Vec2::new(pivot_x, y),
            local_pivot: Vec2::new(-toward_center * half_width, 0.0),
            half_extents: Vec2::new(half_width, config.height / 2.0),
            chamfer: config.chamfer,
        }
    }

    /// Both rigs for a laid-out table, left first.
    pub fn pair(layout: &TableLayout, config: &FlipperConfig) -> [FlipperRig; 2] {
        [
            Self::left(layout.left_pivot_x, layout.flipper_y, config),
            Self::right(layout.right_pivot_x, layout.flipper_y, config),
        ]
    }
}

/// A flipper body living in a physics world, pinned at its pivot.
#[cfg(feature = "physics")]
#[derive(Debug, Clone, Copy)]
pub struct Flipper {
    pub rig: FlipperRig,
    pub body: PhysicsBody,
    pub joint: JointHandle,
}

#[cfg(feature = "physics")]
impl Flipper {
    /// Create the flipper body and its rigid pin.
    pub fn build(world: &mut PhysicsWorld, rig: FlipperRig) -> Self {
        let desc = BodyDesc::dynamic(ColliderDesc::RoundCuboid {
            half_width: rig.half_extents.x,
            half_height: rig.half_extents.y,
            chamfer: rig.chamfer,
        })
        .with_position(rig.center)
        // Only the controller moves a flipper; it would otherwise sag on its pin.
        .with_gravity_scale(0.0)
        .with_exclusive_group(FLIPPER_GROUP);

        let body = world.create_body(&desc, ColliderMaterial::default());
        let joint = world.pin_to_world(rig.pivot, &body, rig.local_pivot);
        Self { rig, body, joint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    #[test]
    fn left_flipper_hinges_on_its_left_edge() {
        let cfg = presets::classic().flipper;
        let rig = FlipperRig::left(415.0, 700.0, &cfg);
        assert_eq!(rig.center, Vec2::new(450.0, 700.0));
        assert_eq!(rig.pivot, Vec2::new(415.0, 700.0));
        assert_eq!(rig.local_pivot, Vec2::new(-35.0, 0.0));
        assert_eq!(rig.center + rig.local_pivot, rig.pivot);
    }

    #[test]
    fn right_flipper_mirrors_left() {
        let cfg = presets::classic().flipper;
        let rig = FlipperRig::right(585.0, 700.0, &cfg);
        assert_eq!(rig.center, Vec2::new(550.0, 700.0));
        assert_eq!(rig.local_pivot, Vec2::new(35.0, 0.0));
        assert_eq!(rig.center + rig.local_pivot, rig.pivot);
        assert_eq!(rig.half_extents, Vec2::new(35.0, 7.0));
    }

    #[test]
    fn pair_uses_layout_pivots() {
        let def = presets::wide();
        let layout = TableLayout::new(&def, Vec2::new(1000.0, 800.0));
        let [left, right] = FlipperRig::pair(&layout, &def.flipper);
        assert_eq!(left.side, Side::Left);
        assert_eq!(right.side, Side::Right);
        assert_eq!(left.pivot.x, layout.funnel_left_x + def.table.pivot_inset);
        assert_eq!(right.pivot.x, layout.funnel_right_x - def.table.pivot_inset);
        assert_eq!(left.pivot.y, layout.bottom - def.flipper.y_offset);
    }

    #[cfg(feature = "physics")]
    #[test]
    fn built_flipper_rotates_about_its_pivot() {
        let cfg = presets::classic().flipper;
        let mut world = PhysicsWorld::new(glam::Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let flipper = Flipper::build(&mut world, FlipperRig::left(415.0, 700.0, &cfg));
        assert_eq!(world.joint_count(), 1);

        for _ in 0..10 {
            world.spin_about(&flipper.body, flipper.rig.pivot, -3.0);
            world.step();
        }

        assert!(world.angle(&flipper.body) < -0.2, "angle {}", world.angle(&flipper.body));
        let hinge = world.local_to_world(&flipper.body, flipper.rig.local_pivot);
        assert!((hinge - flipper.rig.pivot).length() < 1.0, "hinge drifted to {:?}", hinge);
    }

    #[cfg(feature = "physics")]
    #[test]
    fn built_flippers_pass_through_each_other() {
        let cfg = presets::classic().flipper;
        let mut world = PhysicsWorld::new(glam::Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        // Pivots 40 apart with 70-wide bodies: the two overlap by 100 at rest.
        let left = Flipper::build(&mut world, FlipperRig::left(400.0, 700.0, &cfg));
        let right = Flipper::build(&mut world, FlipperRig::right(440.0, 700.0, &cfg));

        for _ in 0..30 {
            world.step();
        }

        for flipper in [left, right] {
            let (pos, angle) = world.body_position(&flipper.body);
            assert!(angle.abs() < 1e-3, "{:?} flipper pushed to {}", flipper.rig.side, angle);
            assert!((pos - flipper.rig.center).length() < 1e-2, "moved to {:?}", pos);
        }
    }

    #[cfg(feature = "physics")]
    #[test]
    fn built_flipper_still_hits_other_bodies() {
        let cfg = presets::classic().flipper;
        let mut world = PhysicsWorld::new(glam::Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let flipper = Flipper::build(&mut world, FlipperRig::left(400.0, 700.0, &cfg));
        let ball = world.create_body(
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_position(Vec2::new(450.0, 650.0))
                .with_velocity(Vec2::new(0.0, 300.0)),
            ColliderMaterial::default(),
        );

        for _ in 0..15 {
            world.step();
        }

        // The ball lands on the flipper and knocks its free end down
        assert!(world.velocity(&ball).y < 250.0, "ball kept {:?}", world.velocity(&ball));
        assert!(world.angle(&flipper.body) > 0.05, "angle {}", world.angle(&flipper.body));
    }
}
