//! Combat systems - projectiles, damage routing and effects.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::agents::{PlayerAgent, TakeDamage};
use crate::config::Tuning;
use crate::core::{DamageEvent, EventServices, FireProjectileEvent, SpawnEffectEvent};
use crate::physics::filter_for;

/// Spawn a projectile for every fire request.
pub fn spawn_projectiles(
    mut commands: Commands,
    mut fire_events: EventReader<FireProjectileEvent>,
    tuning: Res<Tuning>,
    players: Query<(), With<PlayerAgent>>,
) {
    let size = tuning.projectile.size;

    for FireProjectileEvent(shot) in fire_events.read() {
        let fired_by_player = players.contains(shot.owner);
        let color = if fired_by_player {
            Color::srgb(0.6, 0.9, 1.0)
        } else {
            Color::srgb(1.0, 0.45, 0.2)
        };

        commands.spawn((
            Name::new("Projectile"),
            Projectile::launch(shot, &tuning.projectile, fired_by_player),
            Sprite::from_color(color, Vec2::new(size * 2.0, size)),
            Transform::from_translation(shot.pose.position.extend(3.0))
                .with_rotation(Quat::from_rotation_z(shot.pose.rotation)),
        ));
    }
}

/// Move projectiles, sweeping each step with a ray so fast shots can't tunnel.
///
/// A hit sends a [`DamageEvent`] with the instigator resolved now, because the
/// projectile is gone by the time the damage is applied.
pub fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut query: Query<(Entity, &mut Transform, &mut Projectile)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, mut transform, mut projectile) in query.iter_mut() {
        let origin = transform.translation.truncate();
        let filter = filter_for(projectile.targets, projectile.owner);

        let flight = projectile.fly(time.delta(), |direction, distance| {
            context
                .cast_ray(origin, direction, distance, true, filter)
                .map(|(target, _)| target)
        });

        match flight {
            Flight::Expired => commands.entity(entity).despawn_recursive(),
            Flight::Hit(target) => {
                damage_events.send(DamageEvent {
                    target,
                    source: entity,
                    amount: projectile.damage,
                    instigator: projectile.instigator(),
                });
                commands.entity(entity).despawn_recursive();
            }
            Flight::Moved(step) => transform.translation += step.extend(0.0),
        }
    }
}

/// Deliver damage to every `A` that was hit.
///
/// Registered once per damageable agent type. Events aimed at anything
/// else (walls, other agent types) are skipped.
pub fn route_damage<A: Component + TakeDamage>(
    mut damage_events: EventReader<DamageEvent>,
    mut services: EventServices,
    mut targets: Query<(&mut A, &Transform)>,
) {
    for event in damage_events.read() {
        let Ok((mut agent, transform)) = targets.get_mut(event.target) else {
            continue;
        };

        debug!("{:?} takes {} damage from {:?}", event.target, event.amount, event.source);
        agent.take_damage(
            event.amount,
            event.instigator,
            transform.translation.truncate(),
            &mut services,
        );
    }
}

/// Spawn effect sprites.
pub fn spawn_effects(mut commands: Commands, mut effect_events: EventReader<SpawnEffectEvent>) {
    for event in effect_events.read() {
        let (color, size, lifetime, growth) = effect_look(event.prefab);

        commands.spawn((
            Name::new(format!("{:?}", event.prefab)),
            Effect {
                timer: Timer::from_seconds(lifetime, TimerMode::Once),
                growth,
            },
            Sprite::from_color(color, Vec2::splat(size)),
            Transform::from_translation(event.position.extend(4.0))
                .with_rotation(Quat::from_rotation_z(event.rotation)),
        ));
    }
}

/// Grow and fade effects, removing them when done.
pub fn update_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Effect, &mut Transform, &mut Sprite)>,
) {
    for (entity, mut effect, mut transform, mut sprite) in query.iter_mut() {
        effect.timer.tick(time.delta());
        if effect.timer.finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let progress = effect.timer.fraction();
        transform.scale = Vec3::splat(1.0 + effect.growth * progress);
        sprite.color.set_alpha(1.0 - progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{FireCommand, Pose};
    use crate::config::ProjectileTuning;
    use approx::assert_relative_eq;
    use bevy::time::TimeUpdateStrategy;
    use rstest::{fixture, rstest};
    use std::time::Duration;

    #[fixture]
    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .add_event::<DamageEvent>()
            .add_systems(Update, move_projectiles);
        // Empty physics world: nothing to hit
        app.world_mut().spawn(RapierContext::default());
        app
    }

    fn spawn_shot(app: &mut App, time_to_live: f32) -> Entity {
        let tuning = ProjectileTuning {
            time_to_live,
            ..default()
        };
        let shot = FireCommand {
            owner: Entity::PLACEHOLDER,
            pose: Pose::at(Vec2::ZERO),
            direction: Vec2::X,
            carrier_velocity: Vec2::ZERO,
        };
        app.world_mut()
            .spawn((Projectile::launch(&shot, &tuning, true), Transform::default()))
            .id()
    }

    #[rstest]
    fn shots_fly_through_empty_space(mut app: App) {
        let shot = spawn_shot(&mut app, 3.0);

        // The first frame has no elapsed time
        app.update();
        app.update();

        let transform = app.world().get::<Transform>(shot).expect("shot in flight");
        assert_relative_eq!(transform.translation.x, 3.0);
        assert!(app.world().resource::<Events<DamageEvent>>().is_empty());
    }

    #[rstest]
    fn expired_shots_are_removed(mut app: App) {
        let shot = spawn_shot(&mut app, 0.5);

        app.update();
        app.update();
        assert!(app.world().get::<Projectile>(shot).is_some());

        app.update();
        assert!(app.world().get::<Projectile>(shot).is_none());
    }
}
