//! Patrolling enemy: walks until it bumps into something, shoots the player on sight.

use bevy::prelude::*;
use std::f32::consts::PI;

use super::services::{
    CheckpointInfo, FireCommand, GameServices, Instigator, Layer, MotionController,
    PlayerRespawnListener, Pose, Prefab, SoundCue, SpatialQuery, TakeDamage, TextPositioner,
    TextStyle,
};

/// How long the "+N!" text stays up, in seconds.
const POINTS_TEXT_TIME_TO_LIVE: f32 = 1.5;
/// Rise speed of the "+N!" text, in screen pixels per second.
const POINTS_TEXT_SPEED: f32 = 50.0;

/// Per-enemy tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolSettings {
    pub speed: f32,
    /// Seconds between shots.
    pub fire_rate: f32,
    pub max_health: i32,
    /// Awarded when hurt by a player projectile. Zero disables scoring.
    pub points_to_give: i32,
    pub sight_range: f32,
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            speed: 2.0,
            fire_rate: 1.0,
            max_health: 100,
            points_to_give: 10,
            sight_range: 10.0,
        }
    }
}

/// Where the agent is this frame.
#[derive(Debug, Clone, Copy)]
pub struct PatrolFrame {
    pub entity: Entity,
    pub position: Vec2,
    /// Projectile spawn offset from `position` for orientation `1.0` (facing left).
    pub muzzle_offset: Vec2,
}

/// Patrol-and-shoot state machine.
///
/// Three orthogonal states: active or inactive, moving left or right, cooling
/// down or ready to fire. Inactive agents keep their state so a checkpoint
/// respawn can bring them back.
#[derive(Component, Debug, Clone)]
pub struct PatrolAgent {
    settings: PatrolSettings,
    direction: Vec2,
    cooldown: f32,
    health: i32,
    active: bool,
    orientation: f32,
}

impl PatrolAgent {
    pub fn new(settings: PatrolSettings) -> Self {
        Self {
            settings,
            direction: Vec2::NEG_X,
            cooldown: 0.0,
            health: settings.max_health,
            active: true,
            orientation: 1.0,
        }
    }

    pub fn settings(&self) -> &PatrolSettings {
        &self.settings
    }

    /// Either `(-1, 0)` or `(1, 0)`.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sign of the sprite's horizontal scale.
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// World-space spawn pose of a shot, mirrored with the current orientation.
    pub fn muzzle_pose(&self, position: Vec2, offset: Vec2) -> Pose {
        Pose {
            position: position + Vec2::new(offset.x * self.orientation, offset.y),
            rotation: if self.orientation > 0.0 { PI } else { 0.0 },
        }
    }

    /// Advances the agent by one frame.
    ///
    /// Movement comes first: the horizontal force is set from the current
    /// direction, then the direction reverses if the controller reports a hit
    /// on the side we are walking towards. Only then is the shot considered,
    /// so a shot fired while turning leaves from the new front.
    /// The cooldown is decremented before it is compared, and a shot needs a
    /// player inside `sight_range` straight ahead.
    pub fn tick(
        &mut self,
        dt: f32,
        frame: PatrolFrame,
        motion: &mut dyn MotionController,
        sight: &dyn SpatialQuery,
        services: &mut dyn GameServices,
    ) -> Option<FireCommand> {
        if !self.active {
            return None;
        }

        motion.set_horizontal_force(self.direction.x * self.settings.speed);

        let collisions = motion.collision_state();
        if (self.direction.x < 0.0 && collisions.left)
            || (self.direction.x > 0.0 && collisions.right)
        {
            self.direction = -self.direction;
            self.orientation = -self.orientation;
        }

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }

        sight.raycast(
            frame.position,
            self.direction,
            self.settings.sight_range,
            Layer::Player,
        )?;

        let shot = FireCommand {
            owner: frame.entity,
            pose: self.muzzle_pose(frame.position, frame.muzzle_offset),
            direction: self.direction,
            carrier_velocity: motion.velocity(),
        };
        services.spawn_projectile(shot);
        self.cooldown = self.settings.fire_rate;
        services.play_clip_at_point(SoundCue::Shoot, frame.position);

        debug!("Patrol agent {:?} fired towards {:?}", frame.entity, self.direction);
        Some(shot)
    }
}

impl TakeDamage for PatrolAgent {
    fn take_damage(
        &mut self,
        amount: i32,
        instigator: Instigator,
        at: Vec2,
        services: &mut dyn GameServices,
    ) {
        if !self.active {
            return;
        }

        let points = self.settings.points_to_give;
        if points != 0 && instigator.is_player_projectile() {
            services.add_points(points);
            services.show(
                format!("+{}!", points),
                TextStyle::PointStar,
                TextPositioner::FromWorldPoint {
                    point: at,
                    time_to_live: POINTS_TEXT_TIME_TO_LIVE,
                    speed: POINTS_TEXT_SPEED,
                },
            );
        }

        // Spawned on every hit, lethal or not.
        services.instantiate(Prefab::DestroyedEffect, at, 0.0);
        self.health -= amount;

        if self.health <= 0 {
            services.play_clip_at_point(SoundCue::EnemyDestroyed, at);
            self.health = 0;
            self.active = false;
            info!("Patrol agent destroyed at {:?}", at);
        }
    }
}

impl PlayerRespawnListener for PatrolAgent {
    /// Restores direction, orientation and health. Position is left where the
    /// agent was.
    fn on_player_respawn_in_checkpoint(&mut self, _checkpoint: &CheckpointInfo) {
        self.direction = Vec2::NEG_X;
        self.orientation = 1.0;
        self.active = true;
        self.health = self.settings.max_health;
    }
}
