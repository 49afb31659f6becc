//! Rigid body world shared by the scene.
//!
//! [`PhysicsWorld`] owns every rapier set and pipeline. Systems never step
//! the simulation themselves; they mutate bodies through
//! [`PhysicsWorld::body_mut`] and [`physics_step`](crate::systems::physics::physics_step)
//! advances the world once per frame.

use bevy_ecs::prelude::Resource;
use rapier3d::prelude::*;

use crate::resources::robotconfig::RobotConfig;

/// Surface response used for the robot collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.6,
            restitution: 0.0,
        }
    }
}

#[derive(Resource)]
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub gravity: Vector<f32>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    /// Material applied to the robot collider.
    pub robot_material: PhysicsMaterial,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            gravity: vector![0.0, -9.82, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            robot_material: PhysicsMaterial::default(),
        }
    }

    /// Build a world using the gravity and robot material from `config`.
    pub fn from_config(config: &RobotConfig) -> Self {
        let mut world = Self::new();
        world.gravity = vector![0.0, config.gravity, 0.0];
        world.robot_material = PhysicsMaterial {
            friction: config.friction,
            restitution: config.restitution,
        };
        world
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// User forces are cleared afterwards so that forces behave as
    /// per-step pushes, while impulses and velocities carry over.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Add a static floor whose top face sits at `y = 0`.
    pub fn add_ground(&mut self, half_extent: f32) -> ColliderHandle {
        let ground = ColliderBuilder::cuboid(half_extent, 0.1, half_extent)
            .translation(vector![0.0, -0.1, 0.0])
            .friction(self.robot_material.friction)
            .build();
        self.collider_set.insert(ground)
    }

    /// Create the robot's sphere body at the spawn point.
    ///
    /// The body starts asleep with zero velocities; rotation is only free
    /// around the Y axis.
    pub fn spawn_robot_body(&mut self, config: &RobotConfig) -> (RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, config.spawn_height, 0.0])
            .linear_damping(config.linear_damping)
            .angular_damping(config.angular_damping)
            .enabled_rotations(false, true, false)
            .linvel(Vector::zeros())
            .angvel(Vector::zeros())
            .sleeping(true)
            .build();
        let body_handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::ball(config.body_radius)
            .mass(config.body_mass)
            .friction(self.robot_material.friction)
            .restitution(self.robot_material.restitution)
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);
        if let Some(body) = self.rigid_body_set.get_mut(body_handle) {
            body.recompute_mass_properties_from_colliders(&self.collider_set);
        }

        (body_handle, collider_handle)
    }

    /// Remove a body together with its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_body_matches_config() {
        let config = RobotConfig::default();
        let mut world = PhysicsWorld::from_config(&config);
        let (handle, collider) = world.spawn_robot_body(&config);

        let body = world.body(handle).unwrap();
        assert_eq!(body.translation().y, 1.0);
        assert_eq!(body.translation().x, 0.0);
        assert!(body.is_sleeping());
        assert_eq!(body.linear_damping(), 0.05);
        assert_eq!(body.angular_damping(), 0.9);
        let locked = body.locked_axes();
        assert!(locked.contains(LockedAxes::ROTATION_LOCKED_X));
        assert!(locked.contains(LockedAxes::ROTATION_LOCKED_Z));
        assert!(!locked.contains(LockedAxes::ROTATION_LOCKED_Y));

        let collider = world.collider_set.get(collider).unwrap();
        assert_eq!(collider.parent(), Some(handle));
        assert!((collider.mass() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn body_falls_onto_ground() {
        let config = RobotConfig::default();
        let mut world = PhysicsWorld::from_config(&config);
        world.add_ground(10.0);
        let (handle, _) = world.spawn_robot_body(&config);
        world.body_mut(handle).unwrap().wake_up(true);

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }

        let y = world.body(handle).unwrap().translation().y;
        assert!(y > 0.3 && y < 0.5, "resting height was {y}");
    }

    #[test]
    fn step_clears_user_forces() {
        let config = RobotConfig::default();
        let mut world = PhysicsWorld::from_config(&config);
        world.gravity = Vector::zeros();
        let (handle, _) = world.spawn_robot_body(&config);
        world
            .body_mut(handle)
            .unwrap()
            .add_force(vector![10.0, 0.0, 0.0], true);

        world.step(1.0 / 60.0);
        let vx_after_push = world.body(handle).unwrap().linvel().x;
        assert!(vx_after_push > 0.0);

        world.step(1.0 / 60.0);
        let vx_coasting = world.body(handle).unwrap().linvel().x;
        assert!(vx_coasting <= vx_after_push);
    }

    #[test]
    fn remove_body_drops_colliders() {
        let config = RobotConfig::default();
        let mut world = PhysicsWorld::new();
        let (handle, collider) = world.spawn_robot_body(&config);
        assert!(world.remove_body(handle));
        assert!(world.body(handle).is_none());
        assert!(world.collider_set.get(collider).is_none());
        assert!(!world.remove_body(handle));
    }
}
