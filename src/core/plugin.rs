//! Core plugin that sets up game states, events, and the score.

use bevy::prelude::*;

use super::events::*;
use super::score::GameScore;
use super::states::*;

/// Frame ordering for gameplay systems. Runs only while in game.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Physics results from the previous frame are read back
    Sense,
    /// Agents decide what to do
    Act,
    /// Projectiles hit, damage lands, the level reacts
    Damage,
    /// Controllers move, visuals follow agent state
    Move,
    /// Effects, sounds, text and HUD
    Feedback,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame)
/// - Global events (DamageEvent, KillPlayerRequest, etc.)
/// - The session score
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<SpawnEffectEvent>()
            .add_event::<FireProjectileEvent>()
            .add_event::<PlaySoundEvent>()
            .add_event::<FloatingTextEvent>()
            .add_event::<KillPlayerRequest>()
            .add_event::<PlayerRespawned>()

            .init_resource::<GameScore>()

            .configure_sets(
                Update,
                (
                    GameSet::Sense,
                    GameSet::Act,
                    GameSet::Damage,
                    GameSet::Move,
                    GameSet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Tuning is read during PreStartup, so the first frame can start the game
            .add_systems(
                Update,
                transition_to_in_game.run_if(in_state(GameState::Loading)),
            );
    }
}

fn transition_to_in_game(mut next_state: ResMut<NextState<GameState>>) {
    info!("Tuning ready, entering game");
    next_state.set(GameState::InGame);
}
