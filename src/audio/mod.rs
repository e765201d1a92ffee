//! Audio module - one-shot sound effects through kira.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl};

use crate::agents::SoundCue;
use crate::config::Tuning;
use crate::core::{GameSet, PlaySoundEvent};
use crate::player::PlayerCamera;

/// Loaded clip handles. Cues without a configured clip are absent.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    clips: HashMap<SoundCue, Handle<bevy_kira_audio::AudioSource>>,
}

impl SoundLibrary {
    pub fn get(&self, cue: SoundCue) -> Option<&Handle<bevy_kira_audio::AudioSource>> {
        self.clips.get(&cue)
    }
}

/// Audio plugin. Expects `bevy_kira_audio::AudioPlugin` to be added by the application.
pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundLibrary>()
            .add_systems(Startup, load_sound_library)
            .add_systems(Update, play_sounds.in_set(GameSet::Feedback));
    }
}

/// Load every clip named in the tuning.
fn load_sound_library(
    mut commands: Commands,
    tuning: Res<Tuning>,
    asset_server: Res<AssetServer>,
) {
    let configured = [
        (SoundCue::Shoot, &tuning.audio.shoot),
        (SoundCue::EnemyDestroyed, &tuning.audio.enemy_destroyed),
    ];

    let mut clips = HashMap::new();
    for (cue, path) in configured {
        match path {
            Some(path) => {
                clips.insert(cue, asset_server.load(path.clone()));
            }
            None => debug!("No clip configured for {:?}", cue),
        }
    }

    info!("Loaded {} sound clips", clips.len());
    commands.insert_resource(SoundLibrary { clips });
}

/// Play requested sounds, quieter the further they are from the camera.
fn play_sounds(
    mut sound_events: EventReader<PlaySoundEvent>,
    library: Res<SoundLibrary>,
    tuning: Res<Tuning>,
    audio: Res<Audio>,
    camera_query: Query<&Transform, With<PlayerCamera>>,
) {
    let listener = camera_query
        .get_single()
        .map(|transform| transform.translation.truncate())
        .ok();

    for event in sound_events.read() {
        let Some(clip) = library.get(event.cue) else {
            continue;
        };

        let distance = listener.map_or(0.0, |at| at.distance(event.position));
        let gain = attenuation(distance, tuning.audio.hearing_range);
        if gain <= 0.0 {
            continue;
        }

        audio.play(clip.clone()).with_volume(f64::from(gain));
    }
}

/// Linear falloff from full volume at the listener to silence at `range`.
fn attenuation(distance: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / range).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(10.0, 0.5)]
    #[case(20.0, 0.0)]
    #[case(35.0, 0.0)]
    fn volume_falls_off_linearly(#[case] distance: f32, #[case] expected: f32) {
        assert_relative_eq!(attenuation(distance, 20.0), expected);
    }

    #[rstest]
    fn empty_library_has_no_clips() {
        let library = SoundLibrary::default();
        assert!(library.get(SoundCue::Shoot).is_none());
    }
}
