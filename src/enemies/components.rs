//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Sprite child of an enemy, mirrored to show which way it faces.
#[derive(Component)]
pub struct EnemyVisual;

/// Where projectiles leave the body.
#[derive(Component, Debug, Clone, Copy)]
pub struct Muzzle {
    /// Offset from the body for orientation `1.0`, which faces left.
    pub offset: Vec2,
}
