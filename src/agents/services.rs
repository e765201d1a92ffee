//! Collaborator capabilities consumed by the agents.
//!
//! Agents never touch the ECS world directly. Every side effect (moving a body,
//! spawning a projectile, playing a sound, awarding points) goes through one of
//! the traits below, which the game implements over Bevy and rapier and the
//! tests implement with recording fakes.

use bevy::prelude::{Entity, Vec2};

/// Collision flags reported by the character controller for the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionState {
    pub left: bool,
    pub right: bool,
    pub below: bool,
}

impl CollisionState {
    pub fn is_grounded(&self) -> bool {
        self.below
    }

    pub fn is_colliding(&self) -> bool {
        self.left || self.right || self.below
    }
}

/// Body movement owned by the host physics.
pub trait MotionController {
    fn velocity(&self) -> Vec2;
    fn set_horizontal_force(&mut self, x: f32);
    fn set_force(&mut self, force: Vec2);
    fn collision_state(&self) -> CollisionState;
    fn handles_collisions(&self) -> bool;
    fn set_handle_collisions(&mut self, enabled: bool);
    /// Grounded and not still inside the jump cooldown.
    fn can_jump(&self) -> bool;
    fn jump(&mut self);
    fn set_collider_enabled(&mut self, enabled: bool);
    /// Moves the body without sweeping and clears its velocity.
    fn teleport(&mut self, position: Vec2);
}

/// Physics layers a spatial query can be filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Player,
    Enemy,
    World,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

pub trait SpatialQuery {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, layer: Layer)
        -> Option<RayHit>;
}

/// Position plus rotation (radians around Z) of a spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
}

impl Pose {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }
}

/// Request to launch a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireCommand {
    pub owner: Entity,
    pub pose: Pose,
    /// Unit travel direction.
    pub direction: Vec2,
    /// Velocity of the shooter, added to the projectile's own.
    pub carrier_velocity: Vec2,
}

/// Visual effects the agents can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefab {
    DestroyedEffect,
    OuchEffect,
}

pub trait SpawnService {
    fn instantiate(&mut self, prefab: Prefab, position: Vec2, rotation: f32);
    fn spawn_projectile(&mut self, shot: FireCommand);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    EnemyDestroyed,
}

pub trait AudioService {
    fn play_clip_at_point(&mut self, clip: SoundCue, position: Vec2);
}

pub trait ScoreService {
    fn add_points(&mut self, points: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    PointStar,
}

/// Where floating text appears and how it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextPositioner {
    /// Anchored at a world point, rising at `speed` for `time_to_live` seconds.
    FromWorldPoint {
        point: Vec2,
        time_to_live: f32,
        speed: f32,
    },
}

pub trait TextEffectService {
    fn show(&mut self, text: String, style: TextStyle, positioner: TextPositioner);
}

pub trait LevelService {
    fn kill_player(&mut self);
}

/// Every fire-and-forget service an agent may call while handling damage.
pub trait GameServices:
    SpawnService + AudioService + ScoreService + TextEffectService + LevelService
{
}

impl<T> GameServices for T where
    T: SpawnService + AudioService + ScoreService + TextEffectService + LevelService
{
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Fire,
}

pub trait InputSource {
    fn pressed(&self, action: Action) -> bool;
    fn just_pressed(&self, action: Action) -> bool;
}

/// Who dealt a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Instigator {
    Projectile {
        fired_by_player: bool,
    },
    #[default]
    Environment,
}

impl Instigator {
    pub fn is_player_projectile(&self) -> bool {
        matches!(self, Self::Projectile { fired_by_player: true })
    }
}

/// Checkpoint the player respawned at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointInfo {
    pub index: usize,
    pub spawn_point: Vec2,
}

/// Capability of anything that can be hurt.
pub trait TakeDamage {
    /// `at` is the victim's current world position.
    fn take_damage(
        &mut self,
        amount: i32,
        instigator: Instigator,
        at: Vec2,
        services: &mut dyn GameServices,
    );
}

/// Capability of anything that resets when the player respawns.
pub trait PlayerRespawnListener {
    fn on_player_respawn_in_checkpoint(&mut self, checkpoint: &CheckpointInfo);
}
