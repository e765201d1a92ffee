//! Player controller state: input to horizontal velocity, jump, kill and respawn.

use bevy::prelude::*;

use super::services::{
    Action, GameServices, InputSource, Instigator, MotionController, Prefab, TakeDamage,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub max_speed: f32,
    /// How quickly horizontal speed follows input while grounded.
    pub ground_acceleration: f32,
    /// Same, while airborne.
    pub air_acceleration: f32,
    pub max_health: i32,
    /// Upward velocity given to the body when the player dies.
    pub death_bounce: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            ground_acceleration: 10.0,
            air_acceleration: 5.0,
            max_health: 100,
            death_bounce: 20.0,
        }
    }
}

/// Alive/dead state machine for the player entity.
#[derive(Component, Debug, Clone)]
pub struct PlayerAgent {
    settings: PlayerSettings,
    orientation: f32,
    facing_right: bool,
    intent: i8,
    health: i32,
    dead: bool,
}

impl PlayerAgent {
    /// `orientation` is the sign of the sprite's starting horizontal scale.
    pub fn new(settings: PlayerSettings, orientation: f32) -> Self {
        Self {
            settings,
            orientation,
            facing_right: orientation > 0.0,
            intent: 0,
            health: settings.max_health,
            dead: false,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// -1, 0 or 1.
    pub fn horizontal_speed_intent(&self) -> i8 {
        self.intent
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Advances the player by one frame.
    ///
    /// Input is only sampled while alive; a dead player keeps drifting towards
    /// its last intent. The horizontal force is an exponential approach to
    /// `intent * max_speed`, faster on the ground than in the air.
    pub fn tick(&mut self, dt: f32, input: &dyn InputSource, motion: &mut dyn MotionController) {
        if !self.dead {
            self.handle_input(input, motion);
        }

        let acceleration = if motion.collision_state().is_grounded() {
            self.settings.ground_acceleration
        } else {
            self.settings.air_acceleration
        };

        let target = f32::from(self.intent) * self.settings.max_speed;
        motion.set_horizontal_force(lerp(motion.velocity().x, target, dt * acceleration));
    }

    fn handle_input(&mut self, input: &dyn InputSource, motion: &mut dyn MotionController) {
        // Right is checked first and wins when both are held.
        if input.pressed(Action::Right) {
            self.intent = 1;
            if !self.facing_right {
                self.flip();
            }
        } else if input.pressed(Action::Left) {
            self.intent = -1;
            if self.facing_right {
                self.flip();
            }
        } else {
            self.intent = 0;
        }

        if motion.can_jump() && input.just_pressed(Action::Jump) {
            motion.jump();
        }
    }

    fn flip(&mut self) {
        self.orientation = -self.orientation;
        self.facing_right = self.orientation > 0.0;
    }

    /// Switches off collisions and pops the body upwards.
    pub fn kill(&mut self, motion: &mut dyn MotionController) {
        motion.set_handle_collisions(false);
        motion.set_collider_enabled(false);
        self.dead = true;
        self.health = 0;

        motion.set_force(Vec2::new(0.0, self.settings.death_bounce));
        info!("Player killed");
    }

    pub fn respawn_at(&mut self, spawn_point: Vec2, motion: &mut dyn MotionController) {
        if !self.facing_right {
            self.flip();
        }

        self.dead = false;
        motion.set_collider_enabled(true);
        motion.set_handle_collisions(true);
        self.health = self.settings.max_health;

        motion.teleport(spawn_point);
        info!("Player respawned at {:?}", spawn_point);
    }
}

impl TakeDamage for PlayerAgent {
    /// Never kills directly; lethal damage asks the level to do it.
    fn take_damage(
        &mut self,
        amount: i32,
        _instigator: Instigator,
        at: Vec2,
        services: &mut dyn GameServices,
    ) {
        services.instantiate(Prefab::OuchEffect, at, 0.0);
        self.health = (self.health - amount).max(0);

        if self.health <= 0 {
            services.kill_player();
        }
    }
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::testing::{Call, FakeInput, FakeMotion, RecordingServices};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn player() -> PlayerAgent {
        PlayerAgent::new(PlayerSettings::default(), 1.0)
    }

    fn facing_left() -> PlayerAgent {
        PlayerAgent::new(PlayerSettings::default(), -1.0)
    }

    #[rstest]
    fn right_sets_intent_and_keeps_facing(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();

        player.tick(0.01, &FakeInput::holding(&[Action::Right]), &mut motion);

        assert_eq!(player.horizontal_speed_intent(), 1);
        assert!(player.is_facing_right());
        assert_relative_eq!(player.orientation(), 1.0);
    }

    #[rstest]
    fn left_flips_facing(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();

        player.tick(0.01, &FakeInput::holding(&[Action::Left]), &mut motion);

        assert_eq!(player.horizontal_speed_intent(), -1);
        assert!(!player.is_facing_right());
        assert_relative_eq!(player.orientation(), -1.0);
    }

    #[rstest]
    fn right_wins_when_both_are_held() {
        let mut player = facing_left();
        let mut motion = FakeMotion::grounded();

        player.tick(
            0.01,
            &FakeInput::holding(&[Action::Left, Action::Right]),
            &mut motion,
        );

        assert_eq!(player.horizontal_speed_intent(), 1);
        assert!(player.is_facing_right());
    }

    #[rstest]
    fn no_input_stops_intent(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();
        player.tick(0.01, &FakeInput::holding(&[Action::Left]), &mut motion);

        player.tick(0.01, &FakeInput::default(), &mut motion);

        assert_eq!(player.horizontal_speed_intent(), 0);
        assert!(!player.is_facing_right());
    }

    #[rstest]
    #[case::grounded(true, 4.0)]
    #[case::airborne(false, 2.0)]
    fn smooths_towards_max_speed(
        mut player: PlayerAgent,
        #[case] grounded: bool,
        #[case] expected: f32,
    ) {
        let mut motion = if grounded {
            FakeMotion::grounded()
        } else {
            FakeMotion::new()
        };

        player.tick(0.05, &FakeInput::holding(&[Action::Right]), &mut motion);

        assert_relative_eq!(motion.horizontal_force.unwrap_or_default(), expected);
    }

    #[rstest]
    fn interpolation_factor_is_clamped(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();

        player.tick(1.0, &FakeInput::holding(&[Action::Left]), &mut motion);

        assert_relative_eq!(motion.horizontal_force.unwrap_or_default(), -8.0);
    }

    #[rstest]
    fn decelerates_from_current_velocity(mut player: PlayerAgent) {
        let mut motion = FakeMotion {
            velocity: Vec2::new(6.0, 0.0),
            ..FakeMotion::grounded()
        };

        player.tick(0.05, &FakeInput::default(), &mut motion);

        assert_relative_eq!(motion.horizontal_force.unwrap_or_default(), 3.0);
    }

    #[rstest]
    fn jumps_on_press_when_allowed(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();

        player.tick(0.01, &FakeInput::tapping(Action::Jump), &mut motion);

        assert_eq!(motion.jumps, 1);
    }

    #[rstest]
    fn holding_jump_does_not_repeat(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();

        player.tick(0.01, &FakeInput::holding(&[Action::Jump]), &mut motion);

        assert_eq!(motion.jumps, 0);
    }

    #[rstest]
    fn cannot_jump_without_permission(mut player: PlayerAgent) {
        let mut motion = FakeMotion::new();

        player.tick(0.01, &FakeInput::tapping(Action::Jump), &mut motion);

        assert_eq!(motion.jumps, 0);
    }

    #[rstest]
    fn kill_disables_body_and_bounces(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();

        player.kill(&mut motion);

        assert!(player.is_dead());
        assert_eq!(player.health(), 0);
        assert!(!motion.handles_collisions);
        assert!(!motion.collider_enabled);
        assert_eq!(motion.force, Some(Vec2::new(0.0, 20.0)));
    }

    #[rstest]
    fn dead_player_ignores_input(mut player: PlayerAgent) {
        let mut motion = FakeMotion::grounded();
        player.tick(0.01, &FakeInput::holding(&[Action::Right]), &mut motion);
        player.kill(&mut motion);

        player.tick(0.01, &FakeInput::holding(&[Action::Left]), &mut motion);
        player.tick(0.01, &FakeInput::tapping(Action::Jump), &mut motion);

        assert_eq!(player.horizontal_speed_intent(), 1);
        assert!(player.is_facing_right());
        assert_eq!(motion.jumps, 0);
    }

    #[rstest]
    fn respawn_restores_everything_and_faces_right() {
        let mut player = facing_left();
        let mut motion = FakeMotion::grounded();
        player.kill(&mut motion);

        player.respawn_at(Vec2::new(12.0, 3.0), &mut motion);

        assert!(!player.is_dead());
        assert!(player.is_facing_right());
        assert_relative_eq!(player.orientation(), 1.0);
        assert_eq!(player.health(), 100);
        assert!(motion.handles_collisions);
        assert!(motion.collider_enabled);
        assert_eq!(motion.position, Some(Vec2::new(12.0, 3.0)));
    }

    #[rstest]
    fn damage_spawns_ouch_effect(mut player: PlayerAgent) {
        let mut services = RecordingServices::default();

        player.take_damage(30, Instigator::Environment, Vec2::new(1.0, 2.0), &mut services);

        assert_eq!(player.health(), 70);
        assert_eq!(
            services.calls,
            vec![Call::Instantiate(Prefab::OuchEffect, Vec2::new(1.0, 2.0))]
        );
    }

    #[rstest]
    fn lethal_damage_asks_level_to_kill(mut player: PlayerAgent) {
        let mut services = RecordingServices::default();

        player.take_damage(
            150,
            Instigator::Projectile {
                fired_by_player: false,
            },
            Vec2::ZERO,
            &mut services,
        );

        assert_eq!(player.health(), 0);
        assert!(!player.is_dead());
        assert_eq!(services.count(|call| *call == Call::KillPlayer), 1);
    }
}
