//! Sidescroller - Entry Point
//!
//! Controls (rebindable in assets/data/tuning.ron):
//! - A/D or arrows: Run
//! - Space/W/Up: Jump
//! - J or Left Ctrl: Fire

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin as KiraAudioPlugin;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sidescroller".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio backend
        .add_plugins(KiraAudioPlugin)

        // Our game plugin
        .add_plugins(sidescroller::SidescrollerPlugin)

        .run();
}
