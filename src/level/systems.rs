//! Level systems - checkpoints, kills and respawns.

use bevy::prelude::*;

use super::components::{Checkpoint, LevelManager};
use crate::agents::{PlayerAgent, PlayerRespawnListener};
use crate::config::Tuning;
use crate::core::{KillPlayerRequest, PlayerRespawned};
use crate::physics::CharacterController2D;

const CHECKPOINT_REACHED_COLOR: Color = Color::srgb(0.3, 0.9, 0.4);

/// Advance checkpoint progress as the living player moves right.
pub fn track_checkpoints(
    mut manager: ResMut<LevelManager>,
    player_query: Query<(&Transform, &PlayerAgent)>,
    mut flags: Query<(&Checkpoint, &mut Sprite)>,
) {
    let Ok((transform, agent)) = player_query.get_single() else {
        return;
    };
    if agent.is_dead() {
        return;
    }

    let Some(reached) = manager.update_progress(transform.translation.x) else {
        return;
    };
    info!("Checkpoint {} reached", reached.index);

    for (checkpoint, mut sprite) in flags.iter_mut() {
        if checkpoint.index <= reached.index {
            sprite.color = CHECKPOINT_REACHED_COLOR;
        }
    }
}

/// Kill the player once per request burst and start the respawn countdown.
pub fn handle_kill_requests(
    mut requests: EventReader<KillPlayerRequest>,
    mut manager: ResMut<LevelManager>,
    mut player_query: Query<(&mut PlayerAgent, &mut CharacterController2D)>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let Ok((mut agent, mut controller)) = player_query.get_single_mut() else {
        return;
    };
    if agent.is_dead() || manager.is_respawn_pending() {
        return;
    }

    agent.kill(&mut *controller);
    manager.schedule_respawn();
}

/// Put the player back at the current checkpoint once the delay is over.
pub fn respawn_player(
    time: Res<Time>,
    mut manager: ResMut<LevelManager>,
    mut player_query: Query<(&mut PlayerAgent, &mut CharacterController2D)>,
    mut respawned: EventWriter<PlayerRespawned>,
) {
    let Some(checkpoint) = manager.tick(time.delta()) else {
        return;
    };

    let Ok((mut agent, mut controller)) = player_query.get_single_mut() else {
        warn!("Respawn due but no player to respawn");
        return;
    };

    agent.respawn_at(checkpoint.spawn_point, &mut *controller);
    respawned.send(PlayerRespawned { checkpoint });
}

/// Reset every `A` after the player respawns.
///
/// Registered once per listener type by the plugin that owns it.
pub fn notify_respawn_listeners<A: Component + PlayerRespawnListener>(
    mut respawned: EventReader<PlayerRespawned>,
    mut listeners: Query<&mut A>,
) {
    for event in respawned.read() {
        for mut listener in listeners.iter_mut() {
            listener.on_player_respawn_in_checkpoint(&event.checkpoint);
        }
    }
}

/// Falling out of the level kills the player.
pub fn kill_plane(
    tuning: Res<Tuning>,
    player_query: Query<(&Transform, &PlayerAgent)>,
    mut kills: EventWriter<KillPlayerRequest>,
) {
    let Ok((transform, agent)) = player_query.get_single() else {
        return;
    };

    if !agent.is_dead() && transform.translation.y < tuning.level.kill_plane {
        debug!("Player fell below the kill plane");
        kills.send(KillPlayerRequest);
    }
}
