//! Level construction from the tuning layout.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Checkpoint, LevelGeometry, LevelManager};
use crate::config::Tuning;
use crate::physics::world_groups;

const PLATFORM_COLOR: Color = Color::srgb(0.35, 0.32, 0.3);
const CHECKPOINT_COLOR: Color = Color::srgb(0.55, 0.55, 0.6);
const FLAG_SIZE: Vec2 = Vec2::new(0.3, 1.6);

/// Spawn platforms and checkpoint flags, and set up the level manager.
pub fn setup_level(mut commands: Commands, tuning: Res<Tuning>) {
    for platform in &tuning.level.platforms {
        let (x, y) = platform.center;
        let (width, height) = platform.size;

        commands.spawn((
            Name::new("Platform"),
            LevelGeometry,
            Sprite::from_color(PLATFORM_COLOR, Vec2::new(width, height)),
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(width * 0.5, height * 0.5),
            world_groups(),
        ));
    }

    let manager = LevelManager::from_tuning(&tuning);
    let lift = tuning.player.size.1 * 0.5;

    for (index, spawn_point) in manager.checkpoints() {
        let ground = spawn_point.y - lift;
        commands.spawn((
            Name::new(format!("Checkpoint {}", index)),
            LevelGeometry,
            Checkpoint { index },
            Sprite::from_color(CHECKPOINT_COLOR, FLAG_SIZE),
            Transform::from_xyz(spawn_point.x, ground + FLAG_SIZE.y * 0.5, 0.5),
        ));
    }

    info!(
        "Level built: {} platforms, {} checkpoints",
        tuning.level.platforms.len(),
        manager.checkpoints().count()
    );
    commands.insert_resource(manager);
}
