/*
Thin owner of the Rapier2D simulation (Rapier 0.18).

All rigid bodies, colliders and joints live here together with the
pipeline state Rapier needs every step. Display colors are kept in a side
table keyed by body handle so the physics objects carry no presentation data.
*/

use crate::modules::error::SimError;
use macroquad::prelude::{Color, GRAY, Vec2};
use rapier2d::prelude::*;
use std::collections::HashMap;

pub(crate) fn vec2_to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

pub(crate) fn na_to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    // Timestep and solver settings
    integration_params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    styles: HashMap<RigidBodyHandle, Color>,
}

impl PhysicsWorld {
    /// Create an empty world advancing by `dt` seconds per step.
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        // Default solver settings, only the timestep changes
        let integration_params = IntegrationParameters {
            dt,
            ..Default::default()
        };
        Self {
            gravity: vec2_to_na(gravity),
            integration_params,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            styles: HashMap::new(),
        }
    }

    /// Insert a body, attach its colliders and remember its display color.
    pub fn insert_body(
        &mut self,
        body: RigidBody,
        colliders: impl IntoIterator<Item = Collider>,
        color: Color,
    ) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        // Colliders follow the body they are attached to
        for collider in colliders {
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }
        self.styles.insert(handle, color);
        handle
    }

    /// Pin two bodies together with a rigid rod between one point on each.
    /// The anchors are given in each body's local frame; the rod length is
    /// their distance at creation and never changes. Both bodies stay free
    /// to rotate about their own anchor.
    pub fn insert_pin_joint(
        &mut self,
        anchor: RigidBodyHandle,
        arm: RigidBodyHandle,
        anchor_local: Vec2,
        arm_local: Vec2,
    ) -> Result<ImpulseJointHandle, SimError> {
        let (Some(b1), Some(b2)) = (self.bodies.get(anchor), self.bodies.get(arm)) else {
            return Err(SimError::UnknownBody);
        };
        let p1 = b1.position() * point![anchor_local.x, anchor_local.y];
        let p2 = b2.position() * point![arm_local.x, arm_local.y];
        let length = (p2 - p1).norm();

        // Linear axes coupled into one radial distance, pinned at `length`;
        // no angular axis is locked
        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .coupled_axes(JointAxesMask::LIN_AXES)
            .limits(JointAxis::X, [length, length])
            .local_anchor1(point![anchor_local.x, anchor_local.y])
            .local_anchor2(point![arm_local.x, arm_local.y])
            .build();
        // wake_up = true so the arm starts swinging on the first step
        Ok(self.impulse_joints.insert(anchor, arm, joint, true))
    }

    /// Remove a body together with its colliders, joints and style entry.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> Result<(), SimError> {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .ok_or(SimError::UnknownBody)?;
        self.styles.remove(&handle);
        Ok(())
    }

    /// Turn a fixed body into a dynamic one. Mass properties are refreshed
    /// right away so an impulse applied in the same frame is not lost.
    pub fn make_dynamic(&mut self, handle: RigidBodyHandle) -> Result<(), SimError> {
        let body = self.bodies.get_mut(handle).ok_or(SimError::UnknownBody)?;
        // Switch the body type; Rapier treats it as dynamic from the next step
        body.set_body_type(RigidBodyType::Dynamic, true);
        // Mass and inertia from the attached colliders, needed by apply_impulse
        body.recompute_mass_properties_from_colliders(&self.colliders);
        // A fixed body that has been stepped is not in the active set; put it
        // back or the solver never integrates it
        self.island_manager.wake_up(&mut self.bodies, handle, true);
        Ok(())
    }

    /// Apply an impulse at the body's center of mass.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec2) -> Result<(), SimError> {
        let body = self.bodies.get_mut(handle).ok_or(SimError::UnknownBody)?;
        body.apply_impulse(vec2_to_na(impulse), true);
        Ok(())
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,               // Applied to every dynamic body
            &self.integration_params,    // Fixed dt of 1 / fps
            &mut self.island_manager,    // Active/sleeping body groups
            &mut self.broad_phase,       // Coarse collision detection
            &mut self.narrow_phase,      // Contacts between candidate pairs
            &mut self.bodies,            // Walls, blocks, pendulum, ball
            &mut self.colliders,         // Shapes attached to those bodies
            &mut self.impulse_joints,    // The pendulum pin
            &mut self.multibody_joints,  // Unused, required by the pipeline
            &mut self.ccd,               // Keeps the fast ball from tunneling
            None,                        // No query pipeline needed
            &(),                         // No physics hooks
            &(),                         // No event handler
        );
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| na_to_vec2(b.translation()))
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| na_to_vec2(b.linvel()))
    }

    pub fn is_dynamic(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| b.is_dynamic())
    }

    /// Display color of a body; bodies without a style entry draw gray.
    pub fn color_of(&self, handle: RigidBodyHandle) -> Color {
        self.styles.get(&handle).copied().unwrap_or(GRAY)
    }
}
