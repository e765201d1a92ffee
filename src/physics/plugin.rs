//! Physics plugin - character controllers feeding rapier.

use bevy::prelude::*;

use super::controller::*;
use crate::core::GameSet;

/// Physics plugin.
///
/// Expects `RapierPhysicsPlugin` to be added by the application.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, read_controller_output.in_set(GameSet::Sense))
            .add_systems(
                Update,
                (integrate_controllers, sync_collider_enabled)
                    .chain()
                    .in_set(GameSet::Move),
            );
    }
}
