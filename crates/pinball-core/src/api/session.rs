use glam::Vec2;

use crate::api::types::{BodyKind, EntityId};
use crate::components::entity::Entity;
use crate::config::{ConfigError, PaletteColors, Rgb, TableDefinition};
use crate::core::physics::{
    BodyDesc, ColliderDesc, ColliderMaterial, CombineRule, PhysicsBody, PhysicsWorld,
};
use crate::core::scene::Scene;
use crate::core::time::FixedTimestep;
use crate::flipper::{flipper_command, Flipper, FlipperRig, Side};
use crate::input::InputState;
use crate::renderer::instance::RenderBuffer;
use crate::systems::drain::DrainRule;
use crate::systems::render::build_render_buffer;
use crate::table::{generate_walls, TableLayout};

/// Length of one simulation tick in seconds.
pub const TICK_DT: f32 = 1.0 / 60.0;

/// A running table: the physics world plus everything built into it.
pub struct PinballSession {
    definition: TableDefinition,
    layout: TableLayout,
    colors: PaletteColors,
    physics: PhysicsWorld,
    scene: Scene,
    flippers: [Flipper; 2],
    ball: PhysicsBody,
    ball_id: EntityId,
    drain: DrainRule,
    timestep: FixedTimestep,
    drain_count: u32,
}

impl PinballSession {
    /// Validate `definition`, lay it out in `viewport` and build every body.
    pub fn new(definition: TableDefinition, viewport: Vec2) -> Result<Self, ConfigError> {
        definition.validate()?;
        let colors = definition.palette.parse()?;
        let layout = TableLayout::new(&definition, viewport);

        let mut physics = PhysicsWorld::new(Vec2::new(0.0, definition.gravity));
        physics.set_dt(TICK_DT);
        let mut scene = Scene::new();

        // Walls
        let t = &definition.table;
        let points = layout.boundary_to_world(&definition.boundary);
        let walls = generate_walls(&points, definition.drain_gap, t.wall_thickness, t.wall_chamfer);
        let wall_material = ColliderMaterial {
            restitution: 0.0,
            ..Default::default()
        };
        for wall in &walls {
            let half = wall.half_extents();
            let desc = BodyDesc::fixed(ColliderDesc::RoundCuboid {
                half_width: half.x,
                half_height: half.y,
                chamfer: wall.chamfer,
            })
            .with_position(wall.midpoint)
            .with_rotation(wall.angle);
            let body = physics.create_body(&desc, wall_material);
            let id = scene.next_id();
            scene.spawn(
                Entity::new(id, BodyKind::Wall)
                    .with_pos(wall.midpoint)
                    .with_rotation(wall.angle)
                    .with_size(half * 2.0)
                    .with_color(colors.walls)
                    .with_body(body),
            );
        }

        // Bumpers
        for bumper in &definition.bumpers {
            let pos = layout.bumper_position(bumper);
            let desc = BodyDesc::fixed(ColliderDesc::Ball { radius: bumper.radius }).with_position(pos);
            let body = physics.create_body(
                &desc,
                ColliderMaterial {
                    restitution: bumper.restitution,
                    restitution_combine: CombineRule::Max,
                    ..Default::default()
                },
            );
            let id = scene.next_id();
            scene.spawn(
                Entity::new(id, BodyKind::Bumper)
                    .with_pos(pos)
                    .with_size(Vec2::splat(bumper.radius * 2.0))
                    .with_color(colors.bumpers)
                    .with_body(body),
            );
        }

        // Flippers
        let flippers = FlipperRig::pair(&layout, &definition.flipper).map(|rig| {
            let flipper = Flipper::build(&mut physics, rig);
            let id = scene.next_id();
            scene.spawn(
                Entity::new(id, BodyKind::Flipper)
                    .with_pos(rig.center)
                    .with_size(rig.half_extents * 2.0)
                    .with_color(colors.flippers)
                    .with_body(flipper.body),
            );
            flipper
        });

        // Ball
        let b = &definition.ball;
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: b.radius })
            .with_position(layout.spawn)
            .with_ccd(true)
            // Per-tick air drag expressed as a per-second damping rate.
            .with_linear_damping(b.air_friction / TICK_DT);
        let ball = physics.create_body(
            &desc,
            ColliderMaterial {
                restitution: b.restitution,
                friction: b.friction,
                restitution_combine: CombineRule::Max,
                friction_combine: CombineRule::Min,
                ..Default::default()
            },
        );
        let ball_id = scene.next_id();
        scene.spawn(
            Entity::new(ball_id, BodyKind::Ball)
                .with_pos(layout.spawn)
                .with_size(Vec2::splat(b.radius * 2.0))
                .with_color(colors.ball)
                .with_body(ball),
        );

        log::info!(
            "table '{}' built: {} walls, {} bumpers, {} bodies",
            definition.name,
            walls.len(),
            definition.bumpers.len(),
            physics.body_count()
        );

        Ok(Self {
            drain: DrainRule::from_layout(&layout),
            definition,
            layout,
            colors,
            physics,
            scene,
            flippers,
            ball,
            ball_id,
            timestep: FixedTimestep::new(TICK_DT),
            drain_count: 0,
        })
    }

    /// One fixed tick: drive the flippers, step the world, then apply the drain rule.
    pub fn tick(&mut self, input: &InputState) {
        for flipper in &self.flippers {
            let side = flipper.rig.side;
            let angle = self.physics.angle(&flipper.body);
            let command = flipper_command(side, input.is_active(side), angle, &self.definition.flipper);
            // Commands are radians per tick; the world wants radians per second.
            self.physics
                .spin_about(&flipper.body, flipper.rig.pivot, command / TICK_DT);
        }

        self.physics.step();

        let (pos, _) = self.physics.body_position(&self.ball);
        if let Some(spawn) = self.drain.check(pos) {
            self.respawn_ball(spawn);
            self.drain_count += 1;
            log::debug!("ball drained at {:?}, drain #{}", pos, self.drain_count);
        }

        self.sync_from_physics();
    }

    /// Feed a variable frame delta (seconds) and run as many fixed ticks as it covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32, input: &InputState) -> u32 {
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.tick(input);
        }
        steps
    }

    /// Put the ball back at the spawn point at rest.
    pub fn reset_ball(&mut self) {
        self.respawn_ball(self.layout.spawn);
        self.sync_from_physics();
    }

    /// Teleport the ball, keeping its velocity.
    pub fn place_ball(&mut self, pos: Vec2) {
        self.physics.set_position(&self.ball, pos);
        self.sync_from_physics();
    }

    fn respawn_ball(&mut self, spawn: Vec2) {
        self.physics.set_position(&self.ball, spawn);
        self.physics.set_velocity(&self.ball, Vec2::ZERO);
    }

    /// Mirror body positions onto their entities.
    fn sync_from_physics(&mut self) {
        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }

    /// Fill `buffer` with one instance per table body: walls, bumpers, flippers, ball.
    pub fn write_render_buffer(&self, buffer: &mut RenderBuffer) {
        build_render_buffer(self.scene.iter(), buffer);
    }

    // -- Accessors --

    pub fn ball_position(&self) -> Vec2 {
        self.physics.body_position(&self.ball).0
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.physics.velocity(&self.ball)
    }

    pub fn ball_id(&self) -> EntityId {
        self.ball_id
    }

    /// Current flipper angle in radians; 0 is the rest pose.
    pub fn flipper_angle(&self, side: Side) -> f32 {
        let index = match side {
            Side::Left => 0,
            Side::Right => 1,
        };
        self.physics.angle(&self.flippers[index].body)
    }

    pub fn wall_count(&self) -> usize {
        self.scene.count_kind(BodyKind::Wall)
    }

    pub fn bumper_count(&self) -> usize {
        self.scene.count_kind(BodyKind::Bumper)
    }

    /// How many times the ball has drained since the session started.
    pub fn drain_count(&self) -> u32 {
        self.drain_count
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn definition(&self) -> &TableDefinition {
        &self.definition
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn background_color(&self) -> Rgb {
        self.colors.background
    }
}
