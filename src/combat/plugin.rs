//! Combat plugin - projectiles, damage and hit effects.

use bevy::prelude::*;

use super::systems::*;
use crate::core::GameSet;

/// Combat plugin.
///
/// Damage routing is generic; each agent's plugin registers
/// `route_damage::<Agent>` for its own type.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_projectiles, move_projectiles)
                .chain()
                .in_set(GameSet::Damage),
        )
        .add_systems(
            Update,
            (spawn_effects, update_effects).in_set(GameSet::Feedback),
        );
    }
}
