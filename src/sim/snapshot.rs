//! Render-facing snapshots
//!
//! Plain copies of what a renderer needs for one frame. Nothing here can
//! mutate the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{SessionPhase, World};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    pub health: u32,
    pub max_health: u32,
    /// Health as a 0-1 fraction, for health bars
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePose {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Direction of travel (radians)
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyPose {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Angle toward the player (radians)
    pub angle: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub world_size: Vec2,
    pub tick: u64,
    pub score: u64,
    pub phase: SessionPhase,
    pub player: PlayerPose,
    pub projectiles: Vec<ProjectilePose>,
    pub enemies: Vec<EnemyPose>,
}

impl World {
    pub fn player_pose(&self) -> PlayerPose {
        PlayerPose {
            pos: self.player.pos,
            size: self.player.size(),
            angle: self.player.angle,
            health: self.player.health,
            max_health: self.player.max_health,
            health_fraction: self.player.health_fraction(),
        }
    }

    pub fn projectile_poses(&self) -> Vec<ProjectilePose> {
        self.projectiles
            .iter()
            .map(|p| ProjectilePose {
                id: p.id,
                pos: p.pos,
                size: p.size,
                angle: p.angle(),
            })
            .collect()
    }

    pub fn enemy_poses(&self) -> Vec<EnemyPose> {
        let target = self.player.center();
        self.enemies
            .iter()
            .map(|e| EnemyPose {
                id: e.id,
                pos: e.pos,
                size: e.size(),
                angle: e.facing(target),
            })
            .collect()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            world_size: self.world_size(),
            tick: self.time_ticks,
            score: self.score,
            phase: self.phase,
            player: self.player_pose(),
            projectiles: self.projectile_poses(),
            enemies: self.enemy_poses(),
        }
    }
}
