//! Simulation configuration
//!
//! Tuning values and variant rules, loadable from a JSON document.
//! Every field has a default so partial documents are accepted.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How held direction keys move the player ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Position changes by `speed` per held key, no inertia
    Direct { speed: f32 },
    /// Keys accelerate a velocity that decays by `friction` and is capped at `max_speed`
    Inertial {
        acceleration: f32,
        friction: f32,
        max_speed: f32,
    },
}

impl Default for MovementPolicy {
    fn default() -> Self {
        MovementPolicy::Inertial {
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            max_speed: PLAYER_MAX_SPEED,
        }
    }
}

impl MovementPolicy {
    pub fn direct() -> Self {
        MovementPolicy::Direct {
            speed: PLAYER_DIRECT_SPEED,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            max_health: PLAYER_MAX_HEALTH,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub size: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            size: PROJECTILE_SIZE,
        }
    }
}

/// Enemy tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Probability (0-1) that one enemy spawns on a given tick
    pub spawn_chance: f64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: ENEMY_SPEED,
            spawn_chance: ENEMY_SPAWN_CHANCE,
        }
    }
}

/// Rules that differ between game variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantRules {
    /// Score awarded per enemy destroyed by a projectile
    pub kill_reward: u64,
    /// Health lost when an enemy rams the player
    pub contact_damage: u32,
    /// An enemy dropping below the bottom of the world ends the round
    pub far_edge_ends_game: bool,
    /// Refill health at the moment the round ends
    pub reset_health_on_game_over: bool,
}

impl Default for VariantRules {
    fn default() -> Self {
        Self {
            kill_reward: KILL_REWARD,
            contact_damage: CONTACT_DAMAGE,
            far_edge_ends_game: false,
            reset_health_on_game_over: false,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// RNG seed for enemy spawning
    pub seed: u64,
    pub movement: MovementPolicy,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    pub rules: VariantRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: 0,
            movement: MovementPolicy::default(),
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            enemy: EnemyTuning::default(),
            rules: VariantRules::default(),
        }
    }
}

/// Errors raised while loading a configuration document
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be non-negative, got {value}")))
    }
}

impl SimConfig {
    /// Default configuration for a world of the given size
    pub fn with_world_size(width: f32, height: f32) -> Self {
        Self {
            world_width: width,
            world_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value keeps the simulation well-defined
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("projectile.size", self.projectile.size)?;
        positive("enemy.width", self.enemy.width)?;
        positive("enemy.height", self.enemy.height)?;
        non_negative("projectile.speed", self.projectile.speed)?;
        non_negative("enemy.speed", self.enemy.speed)?;

        if self.player.width > self.world_width || self.player.height > self.world_height {
            return Err(ConfigError::Invalid("player does not fit inside the world".into()));
        }
        if self.enemy.width > self.world_width || self.enemy.height > self.world_height {
            return Err(ConfigError::Invalid("enemy does not fit inside the world".into()));
        }
        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid("player.max_health must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.enemy.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "enemy.spawn_chance must be within 0..=1, got {}",
                self.enemy.spawn_chance
            )));
        }

        match self.movement {
            MovementPolicy::Direct { speed } => non_negative("movement.speed", speed)?,
            MovementPolicy::Inertial {
                acceleration,
                friction,
                max_speed,
            } => {
                non_negative("movement.acceleration", acceleration)?;
                non_negative("movement.max_speed", max_speed)?;
                if !(0.0..=1.0).contains(&friction) {
                    return Err(ConfigError::Invalid(format!(
                        "movement.friction must be within 0..=1, got {friction}"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert_eq!(SimConfig::default().movement, MovementPolicy::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "world_width": 1024, "rules": { "far_edge_ends_game": true } }"#,
        )
        .unwrap();
        assert_eq!(config.world_width, 1024.0);
        assert_eq!(config.world_height, WORLD_HEIGHT);
        assert!(config.rules.far_edge_ends_game);
        assert_eq!(config.rules.kill_reward, KILL_REWARD);
    }

    #[test]
    fn test_direct_movement_from_json() {
        let config =
            SimConfig::from_json_str(r#"{ "movement": { "kind": "direct", "speed": 3.0 } }"#)
                .unwrap();
        assert_eq!(config.movement, MovementPolicy::Direct { speed: 3.0 });
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SimConfig::default();
        config.movement = MovementPolicy::direct();
        config.seed = 42;
        let json = config.to_json_string().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_spawn_chance() {
        let err = SimConfig::from_json_str(r#"{ "enemy": { "spawn_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_player() {
        let mut config = SimConfig::with_world_size(30.0, 30.0);
        config.enemy.width = 10.0;
        config.enemy.height = 10.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load("/nonexistent/space-survivor.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
