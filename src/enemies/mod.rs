//! Enemies module - patrol enemies, their AI and spawning.

mod ai;
mod components;
mod plugin;
mod spawning;

pub use components::*;
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemies;
