//! Level module - platforms, checkpoints, kills and respawns.

mod components;
mod plugin;
mod spawning;
mod systems;

pub use components::{Checkpoint, LevelGeometry, LevelManager};
pub use plugin::LevelPlugin;
pub use systems::{
    handle_kill_requests, kill_plane, notify_respawn_listeners, respawn_player,
    track_checkpoints,
};
