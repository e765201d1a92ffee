//! Game state definitions that control the overall flow of the game.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while tuning data is read
/// - Enter `InGame` once it is in place; gameplay systems only run here
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading tuning data
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}
