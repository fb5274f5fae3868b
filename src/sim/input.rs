//! Host-written input state
//!
//! The host's event handlers write key and pointer changes here at any time;
//! the tick copies the whole value once at its start.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Snapshot of held movement keys and the latest pointer position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in world coordinates (may lie outside the world)
    pub pointer: Vec2,
}

impl InputState {
    /// Record a key press or release
    pub fn set_directional(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Sum of held directions as a (not normalized) axis vector, y pointing down
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }

    /// Release every key (pointer is kept)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }
}
