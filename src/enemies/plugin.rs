//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::spawning::spawn_enemies;
use crate::agents::PatrolAgent;
use crate::combat::{move_projectiles, route_damage};
use crate::core::{GameSet, GameState};
use crate::level::{notify_respawn_listeners, respawn_player};

/// Enemy plugin - handles enemy spawning, patrol AI and damage.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            // Spawn once when entering the game
            .add_systems(OnEnter(GameState::InGame), spawn_enemies)
            .add_systems(Update, ai::patrol_tick.in_set(GameSet::Act))
            // Damage and respawn update the agent, then the body follows
            .add_systems(
                Update,
                (
                    route_damage::<PatrolAgent>.after(move_projectiles),
                    notify_respawn_listeners::<PatrolAgent>.after(respawn_player),
                    ai::sync_patrol_body,
                )
                    .chain()
                    .in_set(GameSet::Damage),
            );
    }
}
