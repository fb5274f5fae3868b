//! Space Survivor - top-down arcade survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, session state)
//! - `config`: Data-driven tuning and variant rules
//! - `driver`: Fixed-rate tick driver for hosts with variable frame times

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, MovementPolicy, SimConfig};
pub use driver::FixedStepDriver;
pub use sim::{Direction, InputState, World, init_session, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per ~16ms)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default world dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    /// Direct movement: pixels per tick per held key
    pub const PLAYER_DIRECT_SPEED: f32 = 4.0;
    /// Inertial movement: velocity gained per tick per held key
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    /// Inertial movement: fraction of velocity lost each tick
    pub const PLAYER_FRICTION: f32 = 0.05;
    pub const PLAYER_MAX_SPEED: f32 = 6.0;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_SIZE: f32 = 12.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 1.6;
    /// Chance per tick that one enemy spawns
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;

    /// Scoring and damage
    pub const KILL_REWARD: u64 = 10;
    pub const CONTACT_DAMAGE: u32 = 20;
}

/// Angle (radians) of the ray from `from` toward `to`
///
/// Well-defined for any finite input; coincident points give 0.0.
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit direction for an angle (radians)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_toward_axes() {
        let origin = Vec2::ZERO;
        assert!((angle_toward(origin, Vec2::new(1.0, 0.0))).abs() < 1e-6);
        assert!((angle_toward(origin, Vec2::new(0.0, 1.0)) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(angle_toward(origin, origin), 0.0);
    }

    #[test]
    fn test_direction_is_unit() {
        for i in 0..16 {
            let a = i as f32 * 0.4;
            assert!((direction_from_angle(a).length() - 1.0).abs() < 1e-5);
        }
    }
}
