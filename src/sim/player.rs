//! The player's ship

use glam::Vec2;
use super::collision::Aabb;
use super::input::InputState;
use crate::angle_toward;
use crate::config::{MovementPolicy, SimConfig};

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Velocity (inertial movement only, stays zero for direct movement)
    pub vel: Vec2,
    /// Facing angle toward the pointer (radians)
    pub angle: f32,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    pub max_health: u32,
}

impl Player {
    /// Fresh ship centered in the world at full health
    pub fn new(config: &SimConfig) -> Self {
        let size = Vec2::new(config.player.width, config.player.height);
        let world = Vec2::new(config.world_width, config.world_height);
        Self {
            pos: (world - size) * 0.5,
            vel: Vec2::ZERO,
            angle: 0.0,
            width: size.x,
            height: size.y,
            health: config.player.max_health,
            max_health: config.player.max_health,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size())
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Health as a fraction of max (for health bars)
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    /// Advance one tick: face the pointer, move, then clamp into the world
    pub fn update(&mut self, input: &InputState, movement: MovementPolicy, world: Vec2) {
        self.angle = angle_toward(self.center(), input.pointer);

        let axis = input.axis();
        match movement {
            MovementPolicy::Direct { speed } => {
                self.pos += axis * speed;
            }
            MovementPolicy::Inertial {
                acceleration,
                friction,
                max_speed,
            } => {
                self.vel += axis * acceleration;
                self.vel *= 1.0 - friction;
                // Cap magnitude, keep direction
                let speed = self.vel.length();
                if speed > max_speed {
                    self.vel = self.vel / speed * max_speed;
                }
                self.pos += self.vel;
            }
        }

        self.clamp_to(world);
        debug_assert!(self.pos.is_finite(), "player position went non-finite");
    }

    /// Keep the whole ship inside `[0, world - size]` on both axes
    pub fn clamp_to(&mut self, world: Vec2) {
        let max = (world - self.size()).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    /// Lose health, stopping at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Gain health, stopping at max
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }
}
