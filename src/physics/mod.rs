//! Physics module - the 2D character controller and collision layers.

mod controller;
mod layers;
mod plugin;

pub use controller::{CharacterController2D, ControllerParameters};
pub use layers::{
    character_groups, filter_for, group_for, world_groups, RapierSight, ENEMY_GROUP,
    PLAYER_GROUP, WORLD_GROUP,
};
pub use plugin::PhysicsPlugin;
