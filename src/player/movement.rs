//! Player spawning, movement, shooting and the follow camera.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::input::KeyboardInput;
use crate::agents::{
    Action, FireCommand, InputSource, Layer, MotionController, PlayerAgent, Pose, SoundCue,
};
use crate::config::Tuning;
use crate::core::{FireProjectileEvent, PlaySoundEvent};
use crate::physics::{character_groups, CharacterController2D};

const PLAYER_COLOR: Color = Color::srgb(0.3, 0.55, 0.9);
const VISOR_COLOR: Color = Color::srgb(0.9, 0.95, 1.0);

/// World units per screen pixel.
pub const PIXELS_PER_UNIT: f32 = 32.0;

/// Spawn the player at the level start, facing right.
pub fn spawn_player(mut commands: Commands, tuning: Res<Tuning>) {
    let size = Vec2::new(tuning.player.size.0, tuning.player.size.1);
    let (x, y) = tuning.level.player_start;

    commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerAgent::new(tuning.player.to_settings(), 1.0),
            PlayerWeapon::new(tuning.player.fire_rate),
            CharacterController2D::new((&tuning.controller).into()),
            Transform::from_xyz(x, y + size.y * 0.5, 2.0),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            character_groups(Layer::Player),
            KinematicCharacterController {
                filter_groups: Some(character_groups(Layer::Player)),
                snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                offset: CharacterLength::Absolute(0.01),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    PlayerVisual,
                    Sprite::from_color(PLAYER_COLOR, size),
                    Transform::default(),
                ))
                .with_children(|visual| {
                    visual.spawn((
                        Sprite::from_color(VISOR_COLOR, Vec2::new(size.x * 0.4, size.y * 0.12)),
                        Transform::from_xyz(size.x * 0.2, size.y * 0.25, 0.1),
                    ));
                });
        });

    info!("Player spawned at ({}, {})", x, y);
}

/// Spawn the 2D camera looking at the level start.
pub fn spawn_camera(mut commands: Commands, tuning: Res<Tuning>) {
    let (x, y) = tuning.level.player_start;

    commands.spawn((
        Name::new("Player Camera"),
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_xyz(x, y, 100.0),
        PlayerCamera::default(),
    ));
}

/// Feed keyboard input to the player agent.
pub fn player_tick(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    tuning: Res<Tuning>,
    mut query: Query<(&mut PlayerAgent, &mut CharacterController2D), With<Player>>,
) {
    let Ok((mut agent, mut controller)) = query.get_single_mut() else {
        return;
    };

    let input = KeyboardInput {
        keys: &keys,
        controls: &tuning.controls,
    };
    agent.tick(time.delta_secs(), &input, &mut *controller);
}

/// Shoot in the facing direction while the fire key is held.
pub fn player_fire(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    tuning: Res<Tuning>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &PlayerAgent,
            &CharacterController2D,
            &mut PlayerWeapon,
        ),
        With<Player>,
    >,
    mut projectiles: EventWriter<FireProjectileEvent>,
    mut sounds: EventWriter<PlaySoundEvent>,
) {
    let Ok((entity, transform, agent, controller, mut weapon)) = query.get_single_mut() else {
        return;
    };

    let input = KeyboardInput {
        keys: &keys,
        controls: &tuning.controls,
    };
    let held = !agent.is_dead() && input.pressed(Action::Fire);
    if !weapon.trigger(time.delta_secs(), held) {
        return;
    }

    let position = transform.translation.truncate();
    let direction = Vec2::new(agent.orientation().signum(), 0.0);
    let muzzle = position + direction * weapon.muzzle_distance;

    projectiles.send(FireProjectileEvent(FireCommand {
        owner: entity,
        pose: Pose {
            position: muzzle,
            rotation: direction.to_angle(),
        },
        direction,
        carrier_velocity: controller.velocity(),
    }));
    sounds.send(PlaySoundEvent {
        cue: SoundCue::Shoot,
        position,
    });
}

/// Mirror the player sprite with its facing.
pub fn sync_player_visual(
    player_query: Query<(&PlayerAgent, &Children), (With<Player>, Changed<PlayerAgent>)>,
    mut visuals: Query<&mut Transform, With<PlayerVisual>>,
) {
    for (agent, children) in player_query.iter() {
        for &child in children.iter() {
            if let Ok(mut transform) = visuals.get_mut(child) {
                transform.scale.x = agent.orientation();
            }
        }
    }
}

/// Ease the camera towards the player.
pub fn camera_follow(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<PlayerCamera>)>,
    mut camera_query: Query<(&mut Transform, &PlayerCamera), Without<Player>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok((mut camera_transform, camera)) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_transform.translation.truncate();
    let current = camera_transform.translation.truncate();
    let t = (camera.follow_rate * time.delta_secs()).clamp(0.0, 1.0);
    let next = current.lerp(target, t);

    camera_transform.translation.x = next.x;
    camera_transform.translation.y = next.y;
}
