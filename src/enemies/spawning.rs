//! Enemy spawning from the level layout.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyVisual, Muzzle};
use crate::agents::{Layer, PatrolAgent};
use crate::config::Tuning;
use crate::physics::{character_groups, CharacterController2D};

const ENEMY_COLOR: Color = Color::srgb(0.75, 0.2, 0.2);
const EYE_COLOR: Color = Color::srgb(1.0, 0.9, 0.3);

/// Spawn one patrol agent per enemy position in the level.
pub fn spawn_enemies(mut commands: Commands, tuning: Res<Tuning>) {
    let patrol = &tuning.patrol;
    let size = Vec2::new(patrol.size.0, patrol.size.1);
    let muzzle = Muzzle {
        offset: Vec2::new(patrol.muzzle_offset.0, patrol.muzzle_offset.1),
    };

    for &(x, y) in &tuning.level.enemies {
        commands
            .spawn((
                Name::new("Patrol Enemy"),
                Enemy,
                PatrolAgent::new(patrol.to_settings()),
                muzzle,
                CharacterController2D::new((&tuning.controller).into()),
                Transform::from_xyz(x, y + size.y * 0.5, 1.0),
                Visibility::default(),
                RigidBody::KinematicPositionBased,
                Collider::cuboid(size.x * 0.5, size.y * 0.5),
                character_groups(Layer::Enemy),
                KinematicCharacterController {
                    filter_groups: Some(character_groups(Layer::Enemy)),
                    snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                    offset: CharacterLength::Absolute(0.01),
                    ..default()
                },
            ))
            .with_children(|parent| {
                parent
                    .spawn((
                        EnemyVisual,
                        Sprite::from_color(ENEMY_COLOR, size),
                        Transform::default(),
                    ))
                    .with_children(|visual| {
                        // Eye on the facing side
                        visual.spawn((
                            Sprite::from_color(EYE_COLOR, Vec2::splat(size.x * 0.2)),
                            Transform::from_xyz(-size.x * 0.25, size.y * 0.2, 0.1),
                        ));
                    });
            });
    }

    info!("Spawned {} patrol enemies", tuning.level.enemies.len());
}
