//! Bridge from the agent collaborator traits to Bevy events and resources.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::events::*;
use super::score::GameScore;
use crate::agents::{
    AudioService, FireCommand, LevelService, Prefab, ScoreService, SoundCue, SpawnService,
    TextEffectService, TextPositioner, TextStyle,
};

/// Every game service an agent can call, as one system parameter.
///
/// Calls turn into events that the effect, audio, UI and level systems pick
/// up later in the frame. Points go straight into [`GameScore`].
#[derive(SystemParam)]
pub struct EventServices<'w> {
    effects: EventWriter<'w, SpawnEffectEvent>,
    projectiles: EventWriter<'w, FireProjectileEvent>,
    sounds: EventWriter<'w, PlaySoundEvent>,
    texts: EventWriter<'w, FloatingTextEvent>,
    kills: EventWriter<'w, KillPlayerRequest>,
    score: ResMut<'w, GameScore>,
}

impl SpawnService for EventServices<'_> {
    fn instantiate(&mut self, prefab: Prefab, position: Vec2, rotation: f32) {
        self.effects.send(SpawnEffectEvent {
            prefab,
            position,
            rotation,
        });
    }

    fn spawn_projectile(&mut self, shot: FireCommand) {
        self.projectiles.send(FireProjectileEvent(shot));
    }
}

impl AudioService for EventServices<'_> {
    fn play_clip_at_point(&mut self, clip: SoundCue, position: Vec2) {
        self.sounds.send(PlaySoundEvent {
            cue: clip,
            position,
        });
    }
}

impl ScoreService for EventServices<'_> {
    fn add_points(&mut self, points: i32) {
        self.score.add(points);
    }
}

impl TextEffectService for EventServices<'_> {
    fn show(&mut self, text: String, style: TextStyle, positioner: TextPositioner) {
        self.texts.send(FloatingTextEvent {
            text,
            style,
            positioner,
        });
    }
}

impl LevelService for EventServices<'_> {
    fn kill_player(&mut self) {
        self.kills.send(KillPlayerRequest);
    }
}
