//! Combat module - projectiles, damage routing and hit effects.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{move_projectiles, route_damage};
