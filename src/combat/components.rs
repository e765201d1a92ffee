//! Combat-related components.

use bevy::prelude::*;
use bevy_rapier2d::prelude::Group;
use std::time::Duration;

use crate::agents::{FireCommand, Instigator, Prefab};
use crate::config::ProjectileTuning;
use crate::physics::{ENEMY_GROUP, PLAYER_GROUP, WORLD_GROUP};

/// A shot in flight. Moves in a straight line until it hits something or expires.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub owner: Entity,
    pub velocity: Vec2,
    pub damage: i32,
    pub lifetime: Timer,
    /// Collision groups this shot can hit
    pub targets: Group,
    pub fired_by_player: bool,
}

impl Projectile {
    pub fn launch(shot: &FireCommand, tuning: &ProjectileTuning, fired_by_player: bool) -> Self {
        Self {
            owner: shot.owner,
            velocity: shot.direction.normalize_or_zero() * tuning.speed + shot.carrier_velocity,
            damage: tuning.damage,
            lifetime: Timer::from_seconds(tuning.time_to_live, TimerMode::Once),
            targets: Self::targets_for(fired_by_player),
            fired_by_player,
        }
    }

    /// Player shots hit enemies, enemy shots hit the player. Both stop at walls.
    pub fn targets_for(fired_by_player: bool) -> Group {
        if fired_by_player {
            ENEMY_GROUP | WORLD_GROUP
        } else {
            PLAYER_GROUP | WORLD_GROUP
        }
    }

    pub fn instigator(&self) -> Instigator {
        Instigator::Projectile {
            fired_by_player: self.fired_by_player,
        }
    }

    /// Advances the shot by `delta`.
    ///
    /// `sweep` gets the unit direction and length of this frame's step and
    /// returns the first target in the way, if any.
    pub fn fly(
        &mut self,
        delta: Duration,
        sweep: impl FnOnce(Vec2, f32) -> Option<Entity>,
    ) -> Flight {
        self.lifetime.tick(delta);
        if self.lifetime.finished() {
            return Flight::Expired;
        }

        let step = self.velocity * delta.as_secs_f32();
        let Some(direction) = step.try_normalize() else {
            return Flight::Moved(Vec2::ZERO);
        };

        match sweep(direction, step.length()) {
            Some(target) => Flight::Hit(target),
            None => Flight::Moved(step),
        }
    }
}

/// What happened to a projectile this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    Expired,
    Hit(Entity),
    /// Flew freely by this much.
    Moved(Vec2),
}

/// Short-lived visual effect that grows and fades out.
#[derive(Component, Debug, Clone)]
pub struct Effect {
    pub timer: Timer,
    pub growth: f32,
}

/// Look of each effect prefab: color, size in world units, lifetime, growth.
pub fn effect_look(prefab: Prefab) -> (Color, f32, f32, f32) {
    match prefab {
        Prefab::DestroyedEffect => (Color::srgb(1.0, 0.6, 0.1), 0.6, 0.4, 2.0),
        Prefab::OuchEffect => (Color::srgb(1.0, 0.2, 0.2), 0.4, 0.25, 1.0),
    }
}
