//! In-game HUD - score and the player's health bar.

use bevy::prelude::*;

use crate::agents::PlayerAgent;
use crate::core::{GameScore, GameSet, GameState};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the score readout.
#[derive(Component)]
pub struct ScoreText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_score_text).in_set(GameSet::Feedback),
        );
}

const BAR_WIDTH: f32 = 160.0;
const BAR_HEIGHT: f32 = 10.0;

fn label(text: &str, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the HUD: score on top, health bar underneath, both in the top-left corner.
fn spawn_hud(mut commands: Commands) {
    let root = Node {
        position_type: PositionType::Absolute,
        left: Val::Px(16.0),
        top: Val::Px(12.0),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(6.0),
        ..default()
    };

    commands.spawn((root, HudRoot)).with_children(|hud| {
        hud.spawn((label("Score: 0", 20.0, Color::srgb(1.0, 0.85, 0.2)), ScoreText));

        let frame = Node {
            width: Val::Px(BAR_WIDTH),
            height: Val::Px(BAR_HEIGHT),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        };
        hud.spawn((
            frame,
            BackgroundColor(Color::srgb(0.12, 0.1, 0.1)),
            BorderColor(Color::srgb(0.5, 0.45, 0.45)),
        ))
        .with_children(|frame| {
            frame.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.85, 0.25, 0.25)),
                HealthBar,
            ));
        });
    });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&PlayerAgent, Changed<PlayerAgent>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(agent) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health_percent(agent.health(), agent.settings().max_health));
}

fn update_score_text(score: Res<GameScore>, mut text_query: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in text_query.iter_mut() {
        text.0 = format!("Score: {}", score.points);
    }
}

fn health_percent(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32 * 100.0).clamp(0.0, 100.0)
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(100, 100, 100.0)]
    #[case(25, 100, 25.0)]
    #[case(0, 100, 0.0)]
    #[case(10, 0, 0.0)]
    fn health_bar_tracks_fraction(#[case] health: i32, #[case] max: i32, #[case] expected: f32) {
        assert_relative_eq!(health_percent(health, max), expected);
    }
}
