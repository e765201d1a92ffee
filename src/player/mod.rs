//! Player module - player entity, input, shooting and camera.

mod components;
mod input;
mod movement;
mod plugin;

pub use components::*;
pub use input::KeyboardInput;
pub use movement::{spawn_camera, spawn_player, PIXELS_PER_UNIT};
pub use plugin::PlayerPlugin;
