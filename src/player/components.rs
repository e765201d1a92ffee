//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Sprite child of the player, mirrored with its facing.
#[derive(Component)]
pub struct PlayerVisual;

/// Marker for the camera that follows the player.
#[derive(Component)]
pub struct PlayerCamera {
    /// How quickly the camera catches up, per second
    pub follow_rate: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self { follow_rate: 6.0 }
    }
}

/// Gun carried by the player.
#[derive(Component, Debug, Clone)]
pub struct PlayerWeapon {
    /// Seconds between shots
    pub fire_rate: f32,
    /// Distance in front of the body where shots appear
    pub muzzle_distance: f32,
    pub cooldown: f32,
}

impl PlayerWeapon {
    pub fn new(fire_rate: f32) -> Self {
        Self {
            fire_rate,
            muzzle_distance: 0.6,
            cooldown: 0.0,
        }
    }

    /// Counts the cooldown down and reports whether a held trigger fires now.
    pub fn trigger(&mut self, dt: f32, held: bool) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if !held || self.cooldown > 0.0 {
            return false;
        }
        self.cooldown = self.fire_rate;
        true
    }
}
