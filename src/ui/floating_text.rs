//! World-space text that rises and fades, like "+10!" over a hit enemy.

use bevy::prelude::*;
use std::time::Duration;

use crate::agents::{TextPositioner, TextStyle};
use crate::core::FloatingTextEvent;
use crate::player::PIXELS_PER_UNIT;

/// Rising text with a limited lifetime.
#[derive(Component, Debug, Clone)]
pub struct FloatingText {
    pub timer: Timer,
    /// World units per second
    pub rise_speed: f32,
}

impl FloatingText {
    /// `speed` is in screen pixels per second.
    pub fn new(time_to_live: f32, speed: f32) -> Self {
        Self {
            timer: Timer::from_seconds(time_to_live, TimerMode::Once),
            rise_speed: speed / PIXELS_PER_UNIT,
        }
    }

    /// Returns how far to rise this frame, or `None` once expired.
    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        self.timer.tick(delta);
        if self.timer.finished() {
            return None;
        }
        Some(self.rise_speed * delta.as_secs_f32())
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.timer.fraction()
    }
}

fn style_look(style: TextStyle) -> (f32, Color) {
    match style {
        TextStyle::PointStar => (22.0, Color::srgb(1.0, 0.85, 0.2)),
    }
}

/// Spawn text for every request.
pub fn spawn_floating_text(
    mut commands: Commands,
    mut text_events: EventReader<FloatingTextEvent>,
) {
    for event in text_events.read() {
        let TextPositioner::FromWorldPoint {
            point,
            time_to_live,
            speed,
        } = event.positioner;
        let (font_size, color) = style_look(event.style);

        commands.spawn((
            Name::new("Floating Text"),
            FloatingText::new(time_to_live, speed),
            Text2d::new(event.text.clone()),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(color),
            Transform::from_translation(point.extend(10.0))
                .with_scale(Vec3::splat(1.0 / PIXELS_PER_UNIT)),
        ));
    }
}

/// Move text upwards, fade it, and remove it when its time is up.
pub fn update_floating_text(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut FloatingText, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut text, mut transform, mut color) in query.iter_mut() {
        let Some(rise) = text.advance(time.delta()) else {
            commands.entity(entity).despawn_recursive();
            continue;
        };

        transform.translation.y += rise;
        color.0.set_alpha(text.opacity());
    }
}
