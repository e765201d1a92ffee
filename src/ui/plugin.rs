//! UI plugin - HUD and floating text.

use bevy::prelude::*;

use super::floating_text::{spawn_floating_text, update_floating_text};
use super::hud;
use crate::core::GameSet;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.add_systems(
            Update,
            (spawn_floating_text, update_floating_text).in_set(GameSet::Feedback),
        );
    }
}
