//! Collision detection and resolution
//!
//! Everything collides as an axis-aligned box. Resolution runs in two passes
//! each tick: projectiles against enemies, then enemies against the player.

use glam::Vec2;

use super::enemy::EnemySet;
use super::player::Player;
use super::projectile::ProjectileSet;

/// Axis-aligned bounding box (top-left corner + size, y pointing down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// A projectile destroyed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub enemy_id: u32,
    pub projectile_id: u32,
}

/// Destroy every enemy that overlaps a projectile, together with that projectile
///
/// Enemies are visited from the newest to the oldest; for each one the
/// projectiles are also scanned newest first and the first overlap wins.
/// A projectile removed by one kill can't be reused by another enemy.
pub fn resolve_projectile_hits(enemies: &mut EnemySet, projectiles: &mut ProjectileSet) -> Vec<Kill> {
    let mut kills = Vec::new();

    for i in (0..enemies.len()).rev() {
        let enemy_box = enemies.as_slice()[i].bounds();
        let hit = projectiles
            .as_slice()
            .iter()
            .rposition(|p| p.bounds().intersects(&enemy_box));

        if let Some(j) = hit {
            let enemy = enemies.remove_at(i);
            let projectile = projectiles.remove_at(j);
            kills.push(Kill {
                enemy_id: enemy.id,
                projectile_id: projectile.id,
            });
        }
    }

    kills
}

/// Let at most one enemy ram the player this tick
///
/// The oldest overlapping enemy deals `damage` and is removed. Any other
/// enemy touching the player this tick is left for the next one.
/// Returns the id of the enemy that hit.
pub fn resolve_player_contact(enemies: &mut EnemySet, player: &mut Player, damage: u32) -> Option<u32> {
    let player_box = player.bounds();
    let i = enemies
        .as_slice()
        .iter()
        .position(|e| e.bounds().intersects(&player_box))?;

    player.take_damage(damage);
    Some(enemies.remove_at(i).id)
}
