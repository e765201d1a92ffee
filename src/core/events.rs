//! Global events used for cross-system communication.
//!
//! Agents talk to the rest of the game through these. Each one is a one-way
//! notification: whoever sends it never hears back, and a reader that fails
//! to act on it (no clip loaded, no camera) simply drops it.

use bevy::prelude::*;

use crate::agents::{
    CheckpointInfo, FireCommand, Instigator, Prefab, SoundCue, TextPositioner, TextStyle,
};

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that dealt it (usually a projectile)
    pub source: Entity,
    pub amount: i32,
    /// Resolved when the hit happens, since the source may be gone by the
    /// time the damage is applied.
    pub instigator: Instigator,
}

/// Request to instantiate a visual effect.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnEffectEvent {
    pub prefab: Prefab,
    pub position: Vec2,
    pub rotation: f32,
}

/// Request to launch a projectile.
#[derive(Event, Debug, Clone, Copy)]
pub struct FireProjectileEvent(pub FireCommand);

/// Request to play a one-shot sound at a world position.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlaySoundEvent {
    pub cue: SoundCue,
    pub position: Vec2,
}

/// Request to show floating text.
#[derive(Event, Debug, Clone)]
pub struct FloatingTextEvent {
    pub text: String,
    pub style: TextStyle,
    pub positioner: TextPositioner,
}

/// Sent when something wants the player dead. The level decides.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct KillPlayerRequest;

/// Sent after the player has been put back at a checkpoint.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerRespawned {
    pub checkpoint: CheckpointInfo,
}
