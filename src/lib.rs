//! Sidescroller - a 2D run-and-gun platformer in Bevy.
//!
//! The player runs and jumps through a level of platforms while patrolling
//! enemies walk back and forth and shoot on sight. Shooting enemies scores
//! points; dying sends the player back to the last checkpoint and resets the
//! enemies.
//!
//! # Architecture
//!
//! Behaviour lives in plain state machines under [`agents`], which talk to the
//! world only through collaborator traits. The plugins provide those
//! collaborators over Bevy and rapier:
//!
//! - **Core**: Game states, global events, score, frame ordering
//! - **Config**: Tuning loaded from RON
//! - **Physics**: The 2D character controller and collision layers
//! - **Player**: Input, movement, the player's gun, camera
//! - **Enemies**: Patrol enemy spawning and AI
//! - **Combat**: Projectiles, damage routing, hit effects
//! - **Level**: Platforms, checkpoints, kills and respawns
//! - **Audio**: Sound effects
//! - **UI**: HUD and floating text

pub mod agents;
pub mod audio;
pub mod combat;
pub mod config;
pub mod core;
pub mod enemies;
pub mod level;
pub mod physics;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SidescrollerPlugin;

impl Plugin for SidescrollerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(config::ConfigPlugin)

            // Character controllers
            .add_plugins(physics::PhysicsPlugin)

            // Actors
            .add_plugins(player::PlayerPlugin)
            .add_plugins(enemies::EnemyPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Level systems
            .add_plugins(level::LevelPlugin)

            // Feedback
            .add_plugins(audio::AudioPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
