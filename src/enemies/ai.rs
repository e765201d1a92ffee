//! Enemy behaviour systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyVisual, Muzzle};
use crate::agents::{MotionController, PatrolAgent, PatrolFrame};
use crate::core::EventServices;
use crate::physics::{CharacterController2D, RapierSight};

/// Advance every patrol agent by one frame.
pub fn patrol_tick(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut services: EventServices,
    mut query: Query<
        (
            Entity,
            &Transform,
            &Muzzle,
            &mut PatrolAgent,
            &mut CharacterController2D,
        ),
        With<Enemy>,
    >,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let dt = time.delta_secs();

    for (entity, transform, muzzle, mut agent, mut controller) in query.iter_mut() {
        let position = transform.translation.truncate();
        let frame = PatrolFrame {
            entity,
            position,
            muzzle_offset: muzzle.offset,
        };
        let sight = RapierSight {
            context,
            exclude: entity,
        };

        agent.tick(dt, frame, &mut *controller, &sight, &mut services);
    }
}

/// Mirror agent state onto the body: facing, visibility and collider.
///
/// Facing flips the visual child only, so the collider never sees a
/// negative scale.
pub fn sync_patrol_body(
    mut query: Query<
        (
            &PatrolAgent,
            &Children,
            &mut Visibility,
            &mut CharacterController2D,
        ),
        (With<Enemy>, Changed<PatrolAgent>),
    >,
    mut visuals: Query<&mut Transform, With<EnemyVisual>>,
) {
    for (agent, children, mut visibility, mut controller) in query.iter_mut() {
        for &child in children.iter() {
            if let Ok(mut transform) = visuals.get_mut(child) {
                transform.scale.x = agent.orientation();
            }
        }

        let wanted = if agent.is_active() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }

        if controller.collider_enabled() != agent.is_active() {
            controller.set_collider_enabled(agent.is_active());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::testing::{FakeMotion, FakeSight, RecordingServices};
    use crate::agents::{
        CheckpointInfo, Instigator, PatrolSettings, PlayerRespawnListener, TakeDamage,
    };
    use rstest::{fixture, rstest};

    struct Patrol {
        body: Entity,
        visual: Entity,
    }

    #[fixture]
    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, sync_patrol_body);
        app
    }

    fn spawn_patrol(app: &mut App) -> Patrol {
        let mut visual = Entity::PLACEHOLDER;
        let body = app
            .world_mut()
            .spawn((
                Enemy,
                PatrolAgent::new(PatrolSettings::default()),
                CharacterController2D::default(),
                Transform::default(),
                Visibility::default(),
            ))
            .with_children(|parent| {
                visual = parent.spawn((EnemyVisual, Transform::default())).id();
            })
            .id();
        app.update();
        Patrol { body, visual }
    }

    fn agent_mut<'a>(app: &'a mut App, patrol: &Patrol) -> Mut<'a, PatrolAgent> {
        app.world_mut()
            .get_mut::<PatrolAgent>(patrol.body)
            .expect("patrol agent")
    }

    #[rstest]
    fn destroyed_patrol_is_hidden_and_parked(mut app: App) {
        let patrol = spawn_patrol(&mut app);

        agent_mut(&mut app, &patrol).take_damage(
            500,
            Instigator::Environment,
            Vec2::ZERO,
            &mut RecordingServices::default(),
        );
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Visibility>(patrol.body), Some(&Visibility::Hidden));
        let controller = world
            .get::<CharacterController2D>(patrol.body)
            .expect("controller");
        assert!(!controller.collider_enabled());
        assert!(controller.is_parked());

        agent_mut(&mut app, &patrol).on_player_respawn_in_checkpoint(&CheckpointInfo {
            index: 0,
            spawn_point: Vec2::ZERO,
        });
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Visibility>(patrol.body), Some(&Visibility::Inherited));
        let controller = world
            .get::<CharacterController2D>(patrol.body)
            .expect("controller");
        assert!(controller.collider_enabled());
    }

    #[rstest]
    fn turning_around_mirrors_the_visual(mut app: App) {
        let patrol = spawn_patrol(&mut app);
        let frame = PatrolFrame {
            entity: patrol.body,
            position: Vec2::ZERO,
            muzzle_offset: Vec2::new(-0.6, 0.1),
        };

        agent_mut(&mut app, &patrol).tick(
            0.1,
            frame,
            &mut FakeMotion::colliding_left(),
            &FakeSight::blind(),
            &mut RecordingServices::default(),
        );
        app.update();

        let visual = app.world().get::<Transform>(patrol.visual).expect("visual");
        assert_eq!(visual.scale.x, -1.0);
        assert_eq!(visual.scale.y, 1.0);
    }
}
