//! Enemies: edge spawning and pursuit

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::EnemyTuning;

/// World side an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [SpawnEdge::Top, SpawnEdge::Right, SpawnEdge::Bottom, SpawnEdge::Left];

    /// Top-left corner for an enemy entering from this edge
    ///
    /// `along` runs left-to-right on horizontal edges and top-to-bottom on
    /// vertical ones. The enemy starts fully outside the world.
    pub fn spawn_position(self, along: f32, world: Vec2, size: Vec2) -> Vec2 {
        match self {
            SpawnEdge::Top => Vec2::new(along, -size.y),
            SpawnEdge::Right => Vec2::new(world.x, along),
            SpawnEdge::Bottom => Vec2::new(along, world.y),
            SpawnEdge::Left => Vec2::new(-size.x, along),
        }
    }

    /// Room along this edge for the enemy's top-left corner
    pub fn extent(self, world: Vec2, size: Vec2) -> f32 {
        match self {
            SpawnEdge::Top | SpawnEdge::Bottom => world.x - size.x,
            SpawnEdge::Left | SpawnEdge::Right => world.y - size.y,
        }
    }
}

/// A chasing enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            pos,
            speed: tuning.speed,
            width: tuning.width,
            height: tuning.height,
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

    /// Step `speed` toward `target` along the straight line from our center
    ///
    /// Does nothing when already centered on the target.
    pub fn chase(&mut self, target: Vec2) {
        let delta = target - self.center();
        let dist = delta.length();
        if dist > 0.0 {
            self.pos += delta / dist * self.speed;
        }
        debug_assert!(self.pos.is_finite(), "enemy {} position went non-finite", self.id);
    }

    /// Heading toward `target` (radians), for renderers
    pub fn facing(&self, target: Vec2) -> f32 {
        crate::angle_toward(self.center(), target)
    }
}

/// Live enemies in spawn order
#[derive(Debug, Clone, Default)]
pub struct EnemySet {
    items: Vec<Enemy>,
}

impl EnemySet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an enemy with an id allocated by the caller
    pub fn insert(&mut self, id: u32, pos: Vec2, tuning: &EnemyTuning) -> u32 {
        debug_assert!(self.items.iter().all(|e| e.id != id), "duplicate enemy id {id}");
        self.items.push(Enemy::new(id, pos, tuning));
        id
    }

    /// Place a new enemy just outside `edge`, `along` the edge
    pub fn spawn_at(&mut self, id: u32, edge: SpawnEdge, along: f32, world: Vec2, tuning: &EnemyTuning) -> u32 {
        let size = Vec2::new(tuning.width, tuning.height);
        self.insert(id, edge.spawn_position(along, world, size), tuning)
    }

    /// Roll the per-tick spawn chance; on success spawn at a random point of a random edge
    ///
    /// `next_id` is only called when an enemy is actually created.
    pub fn try_spawn_at_edge<R: Rng>(
        &mut self,
        probability: f64,
        rng: &mut R,
        world: Vec2,
        tuning: &EnemyTuning,
        next_id: impl FnOnce() -> u32,
    ) -> Option<(u32, SpawnEdge)> {
        if rng.random::<f64>() >= probability {
            return None;
        }

        let edge = SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())];
        let extent = edge.extent(world, Vec2::new(tuning.width, tuning.height));
        let along = if extent > 0.0 {
            rng.random_range(0.0..extent)
        } else {
            0.0
        };

        let id = self.spawn_at(next_id(), edge, along, world, tuning);
        Some((id, edge))
    }

    /// Move every enemy toward the player's current center
    pub fn advance_all(&mut self, player_center: Vec2) {
        for enemy in &mut self.items {
            enemy.chase(player_center);
        }
    }

    /// Any enemy fallen below the bottom of the world
    pub fn any_past_bottom(&self, world_height: f32) -> bool {
        self.items.iter().any(|e| e.pos.y > world_height)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Enemy {
        self.items.remove(index)
    }

    pub fn remove(&mut self, id: u32) -> Option<Enemy> {
        let i = self.items.iter().position(|e| e.id == id)?;
        Some(self.items.remove(i))
    }

    pub fn as_slice(&self) -> &[Enemy] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
