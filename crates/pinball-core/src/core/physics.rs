use glam::Vec2;
use rapier2d::prelude::*;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> nalgebra::Point2<f32> {
    nalgebra::Point2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body. Table parts are either fixed in place or fully simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    /// A cuboid whose corners are rounded by `chamfer`.
    /// The half extents are the OUTER extents, chamfer included.
    RoundCuboid { half_width: f32, half_height: f32, chamfer: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::RoundCuboid { half_width, half_height, chamfer } => {
                // Rapier grows the inner cuboid by the border radius, so shrink it first.
                let chamfer = chamfer.min(half_width).min(half_height).max(0.0);
                ColliderBuilder::round_cuboid(
                    half_width - chamfer,
                    half_height - chamfer,
                    chamfer,
                )
            }
        }
    }
}

/// How two colliders' friction or restitution coefficients are combined on contact.
/// When the two colliders disagree, the rule listed last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineRule {
    #[default]
    Average,
    /// Use the smaller coefficient; a slick ball stays slick against any wall.
    Min,
    /// Use the larger coefficient; lets a bumper add energy to anything that hits it.
    Max,
}

impl CombineRule {
    fn to_rapier(self) -> CoefficientCombineRule {
        match self {
            CombineRule::Average => CoefficientCombineRule::Average,
            CombineRule::Min => CoefficientCombineRule::Min,
            CombineRule::Max => CoefficientCombineRule::Max,
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    pub restitution_combine: CombineRule,
    pub friction_combine: CombineRule,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.1,
            friction: 0.1,
            density: 1.0,
            restitution_combine: CombineRule::Average,
            friction_combine: CombineRule::Average,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub ccd: bool,
    pub gravity_scale: f32,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    /// Bodies sharing the same exclusive group never collide with each other,
    /// but still collide with everything else.
    pub exclusive_group: Option<u8>,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            ccd: false,
            gravity_scale: 1.0,
            collider,
            linear_damping: 0.0,
            exclusive_group: None,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Scale applied to world gravity for this body (0.0 ignores gravity).
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set the linear damping (velocity decay). Used as air friction for the ball.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Put the body in an exclusive collision group (group index 0..32).
    pub fn with_exclusive_group(mut self, group: u8) -> Self {
        self.exclusive_group = Some(group);
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Handle to a pin joint in the physics simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointHandle(pub(crate) ImpulseJointHandle);

fn exclusive_groups(group: u8) -> InteractionGroups {
    let member = Group::from_bits_truncate(1u32 << (group % 32));
    InteractionGroups::new(member, Group::ALL ^ member)
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Table coordinates are Y-down, so downward gravity has positive Y
    /// (e.g., `Vec2::new(0.0, 980.0)` in pixels per second squared).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    pub fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .rotation(desc.rotation)
            .linvel(vec2_to_na(desc.velocity))
            .ccd_enabled(desc.ccd)
            .gravity_scale(desc.gravity_scale)
            .linear_damping(desc.linear_damping)
            .build();

        let body_handle = self.bodies.insert(rb);

        let mut builder = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .restitution_combine_rule(material.restitution_combine.to_rapier())
            .friction(material.friction)
            .friction_combine_rule(material.friction_combine.to_rapier())
            .density(material.density);
        if let Some(group) = desc.exclusive_group {
            builder = builder.collision_groups(exclusive_groups(group));
        }

        let collider_handle =
            self.colliders
                .insert_with_parent(builder.build(), body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Pin `local_point` of `body` to the fixed world point `anchor`.
    ///
    /// The body keeps its full rotational freedom around the pin. Internally the
    /// anchor is a collider-less fixed body joined to `body` by a revolute joint.
    pub fn pin_to_world(&mut self, anchor: Vec2, body: &PhysicsBody, local_point: Vec2) -> JointHandle {
        let anchor_body = self
            .bodies
            .insert(RigidBodyBuilder::fixed().translation(vec2_to_na(anchor)).build());

        let joint = RevoluteJointBuilder::new()
            .local_anchor1(nalgebra::Point2::origin())
            .local_anchor2(vec2_to_point(local_point))
            .build();
        JointHandle(
            self.impulse_joints
                .insert(anchor_body, body.body_handle, joint, true),
        )
    }

    /// Advance the simulation by one timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Spin a body at `angvel` around the world point `pivot`.
    ///
    /// Sets the matching linear velocity too, so a joint holding the body at
    /// `pivot` has nothing to correct and the full angular velocity survives the step.
    pub fn spin_about(&mut self, body: &PhysicsBody, pivot: Vec2, angvel: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            // Colliders are centered on their body, so the translation is the center of mass.
            let r = na_to_vec2(rb.translation()) - pivot;
            rb.set_angvel(angvel, true);
            rb.set_linvel(nalgebra::Vector2::new(-angvel * r.y, angvel * r.x), true);
        }
    }

    /// Teleport a body to `pos`, keeping its rotation.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Current orientation of a body in radians.
    pub fn angle(&self, body: &PhysicsBody) -> f32 {
        self.body_position(body).1
    }

    /// Transform a body-local point into world space.
    pub fn local_to_world(&self, body: &PhysicsBody, local: Vec2) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| {
                let p = rb.position() * vec2_to_point(local);
                Vec2::new(p.x, p.y)
            })
            .unwrap_or(local)
    }

    /// Number of rigid bodies in the simulation, pin anchors included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of joints in the simulation.
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
