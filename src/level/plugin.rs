//! Level plugin - layout, checkpoints and the kill/respawn cycle.

use bevy::prelude::*;

use super::components::LevelManager;
use super::spawning::setup_level;
use super::systems::*;
use crate::agents::PlayerAgent;
use crate::combat::route_damage;
use crate::core::{GameSet, GameState};

/// Level plugin - builds the level and answers kill requests.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelManager>()
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(
                Update,
                (kill_plane, track_checkpoints).in_set(GameSet::Sense),
            )
            // Kills land after damage so lethal hits resolve this frame
            .add_systems(
                Update,
                (handle_kill_requests, respawn_player)
                    .chain()
                    .after(route_damage::<PlayerAgent>)
                    .in_set(GameSet::Damage),
            );
    }
}
