//! Tuning data loaded from a RON file.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ConfigError;
use crate::agents::{PatrolSettings, PlayerSettings};

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/tuning.ron";

/// Patrolling enemy tuning.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PatrolTuning {
    pub speed: f32,
    pub fire_rate: f32,
    pub max_health: i32,
    pub points_to_give: i32,
    pub sight_range: f32,
    /// Projectile spawn point relative to the enemy, for the default (left) facing.
    pub muzzle_offset: (f32, f32),
    pub size: (f32, f32),
}

impl Default for PatrolTuning {
    fn default() -> Self {
        Self {
            speed: 2.0,
            fire_rate: 1.0,
            max_health: 100,
            points_to_give: 10,
            sight_range: 10.0,
            muzzle_offset: (-0.6, 0.1),
            size: (0.9, 0.9),
        }
    }
}

impl PatrolTuning {
    pub fn to_settings(&self) -> PatrolSettings {
        PatrolSettings {
            speed: self.speed,
            fire_rate: self.fire_rate,
            max_health: self.max_health,
            points_to_give: self.points_to_give,
            sight_range: self.sight_range,
        }
    }
}

/// Player tuning.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_speed: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub max_health: i32,
    pub death_bounce: f32,
    /// Seconds between player shots.
    pub fire_rate: f32,
    pub size: (f32, f32),
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            ground_acceleration: 10.0,
            air_acceleration: 5.0,
            max_health: 100,
            death_bounce: 20.0,
            fire_rate: 0.3,
            size: (0.8, 1.4),
        }
    }
}

impl PlayerTuning {
    pub fn to_settings(&self) -> PlayerSettings {
        PlayerSettings {
            max_speed: self.max_speed,
            ground_acceleration: self.ground_acceleration,
            air_acceleration: self.air_acceleration,
            max_health: self.max_health,
            death_bounce: self.death_bounce,
        }
    }
}

/// Character controller physics.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ControllerTuning {
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
    pub jump_magnitude: f32,
    /// Minimum seconds between jumps.
    pub jump_frequency: f32,
    pub max_fall_speed: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            gravity: -25.0,
            jump_magnitude: 12.0,
            jump_frequency: 0.25,
            max_fall_speed: 30.0,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub damage: i32,
    pub time_to_live: f32,
    pub size: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 12.0,
            damage: 25,
            time_to_live: 3.0,
            size: 0.25,
        }
    }
}

/// A solid rectangle of level geometry.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PlatformDef {
    pub center: (f32, f32),
    pub size: (f32, f32),
}

impl PlatformDef {
    fn new(center: (f32, f32), size: (f32, f32)) -> Self {
        Self { center, size }
    }
}

/// Level rules and layout.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LevelTuning {
    /// Seconds between a kill and the respawn.
    pub respawn_delay: f32,
    /// Falling below this height kills the player.
    pub kill_plane: f32,
    pub player_start: (f32, f32),
    pub platforms: Vec<PlatformDef>,
    pub enemies: Vec<(f32, f32)>,
    pub checkpoints: Vec<(f32, f32)>,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            respawn_delay: 2.0,
            kill_plane: -20.0,
            player_start: (0.0, 1.0),
            platforms: vec![
                PlatformDef::new((10.0, -1.0), (40.0, 1.0)),
                PlatformDef::new((-10.5, 3.0), (1.0, 9.0)),
                PlatformDef::new((30.5, 3.0), (1.0, 9.0)),
                PlatformDef::new((12.0, 2.5), (6.0, 0.5)),
                PlatformDef::new((20.0, 0.0), (1.0, 1.0)),
                PlatformDef::new((45.0, -1.0), (20.0, 1.0)),
                PlatformDef::new((54.5, 3.0), (1.0, 9.0)),
            ],
            enemies: vec![(8.0, 0.0), (26.0, 0.0), (48.0, 0.0)],
            checkpoints: vec![(0.0, 0.0), (34.0, 0.0)],
        }
    }
}

/// Sound clip paths, relative to the asset folder. Missing entries stay silent.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AudioTuning {
    pub shoot: Option<String>,
    pub enemy_destroyed: Option<String>,
    /// Sounds further than this from the camera are not heard.
    pub hearing_range: f32,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            shoot: None,
            enemy_destroyed: None,
            hearing_range: 20.0,
        }
    }
}

/// Keys that can be bound in the tuning file.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundKey {
    A,
    D,
    J,
    K,
    W,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ControlLeft,
}

impl BoundKey {
    pub fn key_code(self) -> KeyCode {
        match self {
            BoundKey::A => KeyCode::KeyA,
            BoundKey::D => KeyCode::KeyD,
            BoundKey::J => KeyCode::KeyJ,
            BoundKey::K => KeyCode::KeyK,
            BoundKey::W => KeyCode::KeyW,
            BoundKey::Space => KeyCode::Space,
            BoundKey::ArrowLeft => KeyCode::ArrowLeft,
            BoundKey::ArrowRight => KeyCode::ArrowRight,
            BoundKey::ArrowUp => KeyCode::ArrowUp,
            BoundKey::ControlLeft => KeyCode::ControlLeft,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Controls {
    pub left: Vec<BoundKey>,
    pub right: Vec<BoundKey>,
    pub jump: Vec<BoundKey>,
    pub fire: Vec<BoundKey>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: vec![BoundKey::A, BoundKey::ArrowLeft],
            right: vec![BoundKey::D, BoundKey::ArrowRight],
            jump: vec![BoundKey::Space, BoundKey::W, BoundKey::ArrowUp],
            fire: vec![BoundKey::J, BoundKey::ControlLeft],
        }
    }
}

/// All game tuning. Every section falls back to its defaults when omitted.
#[derive(Resource, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Tuning {
    pub patrol: PatrolTuning,
    pub player: PlayerTuning,
    pub controller: ControllerTuning,
    pub projectile: ProjectileTuning,
    pub level: LevelTuning,
    pub audio: AudioTuning,
    pub controls: Controls,
}

impl Tuning {
    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("patrol.speed", self.patrol.speed)?;
        non_negative("patrol.fire_rate", self.patrol.fire_rate)?;
        positive("patrol.sight_range", self.patrol.sight_range)?;
        at_least_one("patrol.max_health", self.patrol.max_health)?;
        positive_size("patrol.size", self.patrol.size)?;

        positive("player.max_speed", self.player.max_speed)?;
        non_negative("player.ground_acceleration", self.player.ground_acceleration)?;
        non_negative("player.air_acceleration", self.player.air_acceleration)?;
        non_negative("player.fire_rate", self.player.fire_rate)?;
        at_least_one("player.max_health", self.player.max_health)?;
        positive_size("player.size", self.player.size)?;

        non_negative("controller.jump_frequency", self.controller.jump_frequency)?;
        positive("controller.max_fall_speed", self.controller.max_fall_speed)?;

        positive("projectile.speed", self.projectile.speed)?;
        positive("projectile.time_to_live", self.projectile.time_to_live)?;
        positive("projectile.size", self.projectile.size)?;
        // Negative damage would heal past max health
        at_least_one("projectile.damage", self.projectile.damage)?;

        non_negative("level.respawn_delay", self.level.respawn_delay)?;
        positive("audio.hearing_range", self.audio.hearing_range)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be greater than zero, got {}", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must not be negative, got {}", value),
        })
    }
}

fn at_least_one(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be at least 1, got {}", value),
        })
    }
}

fn positive_size(field: &'static str, (width, height): (f32, f32)) -> Result<(), ConfigError> {
    if width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must have a positive width and height, got ({}, {})", width, height),
        })
    }
}

/// Parse and validate tuning from RON text. `origin` only labels errors.
pub fn parse_tuning(contents: &str, origin: &str) -> Result<Tuning, ConfigError> {
    let tuning: Tuning = ron::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })?;
    tuning.validate()?;
    Ok(tuning)
}

/// Read, parse and validate a tuning file.
pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_tuning(&contents, &path.display().to_string())
}

/// Load the tuning file into the [`Tuning`] resource, keeping defaults on failure.
pub fn load_tuning_system(mut commands: Commands) {
    match load_tuning(Path::new(TUNING_PATH)) {
        Ok(tuning) => {
            info!("Loaded tuning from {}", TUNING_PATH);
            commands.insert_resource(tuning);
        }
        Err(ConfigError::FileNotFound(path)) => {
            warn!("Tuning file not found ({}), using defaults", path);
            commands.insert_resource(Tuning::default());
        }
        Err(e) => {
            error!("{}; using default tuning", e);
            commands.insert_resource(Tuning::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn empty_document_yields_defaults() {
        let tuning = parse_tuning("()", "inline").expect("valid tuning");
        assert_eq!(tuning, Tuning::default());
    }

    #[rstest]
    fn partial_sections_keep_other_defaults() {
        let tuning = parse_tuning(
            "(patrol: (speed: 3.5, points_to_give: 0), level: (respawn_delay: 0.5))",
            "inline",
        )
        .expect("valid tuning");

        assert_relative_eq!(tuning.patrol.speed, 3.5);
        assert_eq!(tuning.patrol.points_to_give, 0);
        assert_relative_eq!(tuning.patrol.fire_rate, 1.0);
        assert_relative_eq!(tuning.level.respawn_delay, 0.5);
        assert_eq!(tuning.level.enemies, LevelTuning::default().enemies);
    }

    #[rstest]
    fn controls_parse_key_names() {
        let tuning = parse_tuning("(controls: (fire: [K]))", "inline").expect("valid tuning");
        assert_eq!(tuning.controls.fire, vec![BoundKey::K]);
        assert_eq!(BoundKey::K.key_code(), KeyCode::KeyK);
    }

    #[rstest]
    fn settings_carry_tuned_values() {
        let tuning = Tuning::default();
        let patrol = tuning.patrol.to_settings();
        let player = tuning.player.to_settings();

        assert_relative_eq!(patrol.sight_range, 10.0);
        assert_eq!(patrol.max_health, 100);
        assert_relative_eq!(player.max_speed, 8.0);
        assert_relative_eq!(player.death_bounce, 20.0);
    }

    #[rstest]
    fn malformed_ron_is_a_parse_error() {
        let err = parse_tuning("(patrol: (speed: ))", "broken.ron").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { ref path, .. } if path == "broken.ron"));
    }

    #[rstest]
    #[case("(patrol: (speed: 0.0))", "patrol.speed")]
    #[case("(patrol: (fire_rate: -1.0))", "patrol.fire_rate")]
    #[case("(player: (max_health: 0))", "player.max_health")]
    #[case("(projectile: (time_to_live: 0.0))", "projectile.time_to_live")]
    #[case("(projectile: (damage: -25))", "projectile.damage")]
    #[case("(projectile: (damage: 0))", "projectile.damage")]
    #[case("(projectile: (size: 0.0))", "projectile.size")]
    #[case("(patrol: (size: (0.9, -1.0)))", "patrol.size")]
    #[case("(player: (size: (0.0, 1.4)))", "player.size")]
    fn nonsense_values_are_rejected(#[case] source: &str, #[case] expected: &str) {
        let err = parse_tuning(source, "inline").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn missing_file_is_reported() {
        let err = load_tuning(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[rstest]
    fn shipped_tuning_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(TUNING_PATH);
        load_tuning(&path).expect("shipped tuning should load");
    }
}
