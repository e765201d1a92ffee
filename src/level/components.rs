//! Level state: checkpoints and the kill/respawn cycle.

use bevy::prelude::*;

use crate::agents::CheckpointInfo;
use crate::config::Tuning;

/// Marker for static level entities.
#[derive(Component)]
pub struct LevelGeometry;

/// Flag marking a checkpoint in the level.
#[derive(Component, Debug, Clone, Copy)]
pub struct Checkpoint {
    pub index: usize,
}

/// Checkpoint progress and the pending respawn.
///
/// Spawn point 0 is always the level start. Further checkpoints are ordered
/// left to right, and the furthest one the player has passed is current.
#[derive(Resource, Debug, Clone)]
pub struct LevelManager {
    spawn_points: Vec<Vec2>,
    current: usize,
    respawn_delay: f32,
    respawn_timer: Option<Timer>,
}

impl LevelManager {
    pub fn new(start: Vec2, mut checkpoints: Vec<Vec2>, respawn_delay: f32) -> Self {
        checkpoints.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut spawn_points = Vec::with_capacity(checkpoints.len() + 1);
        spawn_points.push(start);
        spawn_points.extend(checkpoints);

        Self {
            spawn_points,
            current: 0,
            respawn_delay,
            respawn_timer: None,
        }
    }

    /// Builds the manager from the level layout. Spawn points are lifted so
    /// the player's feet rest on the marked ground.
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let lift = tuning.player.size.1 * 0.5;
        let point = |(x, y): (f32, f32)| Vec2::new(x, y + lift);

        Self::new(
            point(tuning.level.player_start),
            tuning.level.checkpoints.iter().copied().map(point).collect(),
            tuning.level.respawn_delay,
        )
    }

    pub fn current_checkpoint(&self) -> CheckpointInfo {
        CheckpointInfo {
            index: self.current,
            spawn_point: self.spawn_points[self.current],
        }
    }

    /// Checkpoint spawn points in index order, excluding the level start.
    pub fn checkpoints(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.spawn_points.iter().copied().enumerate().skip(1)
    }

    /// Advances to the furthest checkpoint at or behind `x`. Never goes back.
    ///
    /// Returns the newly reached checkpoint, if any.
    pub fn update_progress(&mut self, x: f32) -> Option<CheckpointInfo> {
        let furthest = self
            .spawn_points
            .iter()
            .rposition(|point| point.x <= x)
            .unwrap_or(0);

        if furthest > self.current {
            self.current = furthest;
            Some(self.current_checkpoint())
        } else {
            None
        }
    }

    pub fn is_respawn_pending(&self) -> bool {
        self.respawn_timer.is_some()
    }

    /// Starts the respawn countdown. False if one is already running.
    pub fn schedule_respawn(&mut self) -> bool {
        if self.respawn_timer.is_some() {
            return false;
        }
        self.respawn_timer = Some(Timer::from_seconds(self.respawn_delay, TimerMode::Once));
        true
    }

    /// Runs the countdown. Yields the checkpoint to respawn at once it ends.
    pub fn tick(&mut self, delta: std::time::Duration) -> Option<CheckpointInfo> {
        let timer = self.respawn_timer.as_mut()?;
        timer.tick(delta);
        if !timer.finished() {
            return None;
        }

        self.respawn_timer = None;
        Some(self.current_checkpoint())
    }
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}
