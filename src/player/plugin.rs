//! Player plugin - spawning, movement, shooting and the camera.

use bevy::prelude::*;

use super::movement;
use crate::agents::PlayerAgent;
use crate::combat::{move_projectiles, route_damage};
use crate::core::{GameSet, GameState};

/// Player plugin - handles the player entity and its camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::InGame),
            (movement::spawn_player, movement::spawn_camera),
        )
        .add_systems(
            Update,
            (movement::player_tick, movement::player_fire)
                .chain()
                .in_set(GameSet::Act),
        )
        .add_systems(
            Update,
            route_damage::<PlayerAgent>
                .after(move_projectiles)
                .in_set(GameSet::Damage),
        )
        .add_systems(
            Update,
            (movement::sync_player_visual, movement::camera_follow).in_set(GameSet::Feedback),
        );
    }
}
