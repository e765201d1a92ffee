//! Config module - gameplay tuning loaded from RON.

mod data;
mod error;

pub use data::{
    load_tuning, parse_tuning, AudioTuning, BoundKey, ControllerTuning, Controls, LevelTuning,
    PatrolTuning, PlatformDef, PlayerTuning, ProjectileTuning, Tuning, TUNING_PATH,
};
pub use error::ConfigError;

use bevy::prelude::*;

/// Config plugin - makes [`Tuning`] available before anything else starts.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Tuning>()
            .add_systems(PreStartup, data::load_tuning_system);
    }
}
