//! 2D character controller on top of rapier's kinematic character controller.
//!
//! The controller owns a velocity that agents steer through
//! [`MotionController`]. Each frame gravity is folded in and the resulting
//! translation is handed to rapier, which sweeps the collider and reports how
//! far it actually got. That report becomes next frame's [`CollisionState`].

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::agents::{CollisionState, MotionController};
use crate::config::ControllerTuning;

/// Moves shorter than this are treated as standing still.
const MIN_MOVE: f32 = 1.0e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerParameters {
    pub gravity: f32,
    pub jump_magnitude: f32,
    pub jump_frequency: f32,
    pub max_fall_speed: f32,
}

impl From<&ControllerTuning> for ControllerParameters {
    fn from(tuning: &ControllerTuning) -> Self {
        Self {
            gravity: tuning.gravity,
            jump_magnitude: tuning.jump_magnitude,
            jump_frequency: tuning.jump_frequency,
            max_fall_speed: tuning.max_fall_speed,
        }
    }
}

impl Default for ControllerParameters {
    fn default() -> Self {
        Self::from(&ControllerTuning::default())
    }
}

#[derive(Component, Debug, Clone)]
pub struct CharacterController2D {
    parameters: ControllerParameters,
    velocity: Vec2,
    state: CollisionState,
    handle_collisions: bool,
    collider_enabled: bool,
    teleport_to: Option<Vec2>,
    jump_in: f32,
}

impl CharacterController2D {
    pub fn new(parameters: ControllerParameters) -> Self {
        Self {
            parameters,
            velocity: Vec2::ZERO,
            state: CollisionState::default(),
            handle_collisions: true,
            collider_enabled: true,
            teleport_to: None,
            jump_in: 0.0,
        }
    }

    pub fn parameters(&self) -> &ControllerParameters {
        &self.parameters
    }

    pub fn collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    /// A body whose collider is off while collisions are still handled is
    /// parked: it neither falls nor moves.
    pub fn is_parked(&self) -> bool {
        self.handle_collisions && !self.collider_enabled
    }

    /// Folds gravity into the velocity and returns this frame's translation.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        self.jump_in -= dt;
        self.velocity.y = (self.velocity.y + self.parameters.gravity * dt)
            .max(-self.parameters.max_fall_speed);
        self.velocity * dt
    }

    /// Takes rapier's verdict on the last move.
    ///
    /// A horizontal side counts as blocked when less than half of the desired
    /// horizontal travel happened. Blocked axes lose their velocity.
    pub fn absorb_move(&mut self, desired: Vec2, effective: Vec2, grounded: bool) {
        let blocked_x = desired.x.abs() > MIN_MOVE && effective.x.abs() < desired.x.abs() * 0.5;
        let blocked_up = desired.y > MIN_MOVE && effective.y < desired.y * 0.5;

        self.state = CollisionState {
            left: blocked_x && desired.x < 0.0,
            right: blocked_x && desired.x > 0.0,
            below: grounded,
        };

        if blocked_x {
            self.velocity.x = 0.0;
        }
        if (grounded && self.velocity.y < 0.0) || blocked_up {
            self.velocity.y = 0.0;
        }
    }
}

impl Default for CharacterController2D {
    fn default() -> Self {
        Self::new(ControllerParameters::default())
    }
}

impl MotionController for CharacterController2D {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_horizontal_force(&mut self, x: f32) {
        self.velocity.x = x;
    }

    fn set_force(&mut self, force: Vec2) {
        self.velocity = force;
    }

    fn collision_state(&self) -> CollisionState {
        self.state
    }

    fn handles_collisions(&self) -> bool {
        self.handle_collisions
    }

    fn set_handle_collisions(&mut self, enabled: bool) {
        self.handle_collisions = enabled;
        if !enabled {
            self.state = CollisionState::default();
        }
    }

    fn can_jump(&self) -> bool {
        self.state.below && self.jump_in <= 0.0
    }

    fn jump(&mut self) {
        self.velocity.y = self.parameters.jump_magnitude;
        self.jump_in = self.parameters.jump_frequency;
    }

    fn set_collider_enabled(&mut self, enabled: bool) {
        self.collider_enabled = enabled;
    }

    fn teleport(&mut self, position: Vec2) {
        self.teleport_to = Some(position);
        self.velocity = Vec2::ZERO;
    }
}

/// Read rapier's results for the previous move back into the controllers.
pub fn read_controller_output(
    mut query: Query<(
        &mut CharacterController2D,
        Option<&KinematicCharacterControllerOutput>,
    )>,
) {
    for (mut controller, output) in query.iter_mut() {
        match output {
            Some(output) if controller.handle_collisions && controller.collider_enabled => {
                controller.absorb_move(
                    output.desired_translation,
                    output.effective_translation,
                    output.grounded,
                );
            }
            _ => controller.state = CollisionState::default(),
        }
    }
}

/// Apply gravity and hand each controller's movement to rapier.
///
/// Controllers that ignore collisions move their transform directly.
pub fn integrate_controllers(
    time: Res<Time>,
    mut query: Query<(
        &mut CharacterController2D,
        &mut Transform,
        Option<&mut KinematicCharacterController>,
    )>,
) {
    let dt = time.delta_secs();

    for (mut controller, mut transform, kinematic) in query.iter_mut() {
        if let Some(target) = controller.teleport_to.take() {
            transform.translation.x = target.x;
            transform.translation.y = target.y;
            if let Some(mut kinematic) = kinematic {
                kinematic.translation = None;
            }
            continue;
        }

        if controller.is_parked() {
            continue;
        }

        let motion = controller.step(dt);
        match kinematic {
            Some(mut kinematic) if controller.handle_collisions => {
                kinematic.translation = Some(motion);
            }
            kinematic => {
                if let Some(mut kinematic) = kinematic {
                    kinematic.translation = None;
                }
                transform.translation += motion.extend(0.0);
            }
        }
    }
}

/// Mirror each controller's collider switch onto rapier.
pub fn sync_collider_enabled(
    mut commands: Commands,
    query: Query<
        (Entity, &CharacterController2D, Has<ColliderDisabled>),
        Changed<CharacterController2D>,
    >,
) {
    for (entity, controller, disabled) in query.iter() {
        if controller.collider_enabled && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !controller.collider_enabled && !disabled {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}
