//! Recording fakes for the collaborator traits.

use bevy::prelude::{Entity, Vec2};

use super::services::*;

/// Character body that stores whatever the agent asks of it.
#[derive(Debug, Clone, Default)]
pub struct FakeMotion {
    pub velocity: Vec2,
    pub collisions: CollisionState,
    pub horizontal_force: Option<f32>,
    pub force: Option<Vec2>,
    pub handles_collisions: bool,
    pub collider_enabled: bool,
    pub can_jump: bool,
    pub jumps: u32,
    pub position: Option<Vec2>,
}

impl FakeMotion {
    pub fn new() -> Self {
        Self {
            handles_collisions: true,
            collider_enabled: true,
            ..Default::default()
        }
    }

    pub fn grounded() -> Self {
        Self {
            collisions: CollisionState {
                below: true,
                ..Default::default()
            },
            can_jump: true,
            ..Self::new()
        }
    }

    pub fn colliding_left() -> Self {
        Self {
            collisions: CollisionState {
                left: true,
                ..Default::default()
            },
            ..Self::new()
        }
    }

    pub fn colliding_right() -> Self {
        Self {
            collisions: CollisionState {
                right: true,
                ..Default::default()
            },
            ..Self::new()
        }
    }
}

impl MotionController for FakeMotion {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_horizontal_force(&mut self, x: f32) {
        self.horizontal_force = Some(x);
        self.velocity.x = x;
    }

    fn set_force(&mut self, force: Vec2) {
        self.force = Some(force);
        self.velocity = force;
    }

    fn collision_state(&self) -> CollisionState {
        self.collisions
    }

    fn handles_collisions(&self) -> bool {
        self.handles_collisions
    }

    fn set_handle_collisions(&mut self, enabled: bool) {
        self.handles_collisions = enabled;
    }

    fn can_jump(&self) -> bool {
        self.can_jump
    }

    fn jump(&mut self) {
        self.jumps += 1;
    }

    fn set_collider_enabled(&mut self, enabled: bool) {
        self.collider_enabled = enabled;
    }

    fn teleport(&mut self, position: Vec2) {
        self.position = Some(position);
        self.velocity = Vec2::ZERO;
    }
}

/// Raycast that always returns the same answer and remembers its last query.
#[derive(Debug, Default)]
pub struct FakeSight {
    pub hit: Option<RayHit>,
    pub last_query: std::cell::Cell<Option<(Vec2, Vec2, f32, Layer)>>,
}

impl FakeSight {
    pub fn blind() -> Self {
        Self::default()
    }

    pub fn seeing(entity: Entity) -> Self {
        Self {
            hit: Some(RayHit {
                entity,
                distance: 4.0,
            }),
            ..Default::default()
        }
    }
}

impl SpatialQuery for FakeSight {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: Layer,
    ) -> Option<RayHit> {
        self.last_query
            .set(Some((origin, direction, max_distance, layer)));
        self.hit
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Instantiate(Prefab, Vec2),
    Projectile(FireCommand),
    Sound(SoundCue, Vec2),
    Points(i32),
    Text(String, TextStyle, TextPositioner),
    KillPlayer,
}

#[derive(Debug, Default)]
pub struct RecordingServices {
    pub calls: Vec<Call>,
}

impl RecordingServices {
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn sounds(&self, cue: SoundCue) -> usize {
        self.count(|call| matches!(call, Call::Sound(c, _) if *c == cue))
    }

    pub fn effects(&self, prefab: Prefab) -> usize {
        self.count(|call| matches!(call, Call::Instantiate(p, _) if *p == prefab))
    }

    pub fn points(&self) -> i32 {
        self.calls
            .iter()
            .map(|call| match call {
                Call::Points(points) => *points,
                _ => 0,
            })
            .sum()
    }
}

impl SpawnService for RecordingServices {
    fn instantiate(&mut self, prefab: Prefab, position: Vec2, _rotation: f32) {
        self.calls.push(Call::Instantiate(prefab, position));
    }

    fn spawn_projectile(&mut self, shot: FireCommand) {
        self.calls.push(Call::Projectile(shot));
    }
}

impl AudioService for RecordingServices {
    fn play_clip_at_point(&mut self, clip: SoundCue, position: Vec2) {
        self.calls.push(Call::Sound(clip, position));
    }
}

impl ScoreService for RecordingServices {
    fn add_points(&mut self, points: i32) {
        self.calls.push(Call::Points(points));
    }
}

impl TextEffectService for RecordingServices {
    fn show(&mut self, text: String, style: TextStyle, positioner: TextPositioner) {
        self.calls.push(Call::Text(text, style, positioner));
    }
}

impl LevelService for RecordingServices {
    fn kill_player(&mut self) {
        self.calls.push(Call::KillPlayer);
    }
}

/// Scripted key state for one tick.
#[derive(Debug, Default, Clone)]
pub struct FakeInput {
    pub held: Vec<Action>,
    pub pressed_now: Vec<Action>,
}

impl FakeInput {
    pub fn holding(actions: &[Action]) -> Self {
        Self {
            held: actions.to_vec(),
            pressed_now: Vec::new(),
        }
    }

    pub fn tapping(action: Action) -> Self {
        Self {
            held: vec![action],
            pressed_now: vec![action],
        }
    }
}

impl InputSource for FakeInput {
    fn pressed(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.pressed_now.contains(&action)
    }
}
