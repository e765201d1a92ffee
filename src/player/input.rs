//! Keyboard bindings as an [`InputSource`].

use bevy::prelude::*;

use crate::agents::{Action, InputSource};
use crate::config::{BoundKey, Controls};

/// Reads actions from the keyboard through the configured bindings.
pub struct KeyboardInput<'a> {
    pub keys: &'a ButtonInput<KeyCode>,
    pub controls: &'a Controls,
}

impl KeyboardInput<'_> {
    fn bindings(&self, action: Action) -> &[BoundKey] {
        match action {
            Action::Left => &self.controls.left,
            Action::Right => &self.controls.right,
            Action::Jump => &self.controls.jump,
            Action::Fire => &self.controls.fire,
        }
    }
}

impl InputSource for KeyboardInput<'_> {
    fn pressed(&self, action: Action) -> bool {
        self.keys
            .any_pressed(self.bindings(action).iter().map(|key| key.key_code()))
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.keys
            .any_just_pressed(self.bindings(action).iter().map(|key| key.key_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn any_bound_key_triggers_the_action() {
        let controls = Controls::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowLeft);

        let input = KeyboardInput {
            keys: &keys,
            controls: &controls,
        };

        assert!(input.pressed(Action::Left));
        assert!(input.just_pressed(Action::Left));
        assert!(!input.pressed(Action::Right));
    }

    #[rstest]
    fn held_key_is_not_just_pressed_next_frame() {
        let controls = Controls::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Space);
        keys.clear();

        let input = KeyboardInput {
            keys: &keys,
            controls: &controls,
        };

        assert!(input.pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));
    }
}
