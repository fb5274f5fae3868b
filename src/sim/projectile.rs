//! Projectiles fired by the player

use glam::Vec2;
use super::collision::Aabb;
use crate::config::ProjectileTuning;
use crate::direction_from_angle;

/// A projectile travelling in a straight line
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    vel: Vec2,
    pub size: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, angle: f32, tuning: &ProjectileTuning) -> Self {
        Self {
            id,
            pos,
            vel: direction_from_angle(angle) * tuning.speed,
            size: tuning.size,
        }
    }

    /// Velocity, fixed at creation
    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    /// Heading in radians
    pub fn angle(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    /// Off-screen once strictly past an edge; sitting on an edge still counts as on-screen
    pub fn is_off_screen(&self, world: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > world.x || self.pos.y < 0.0 || self.pos.y > world.y
    }
}

/// Live projectiles in firing order
#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    items: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a projectile with an id allocated by the caller
    pub fn insert(&mut self, id: u32, origin: Vec2, angle: f32, tuning: &ProjectileTuning) -> u32 {
        debug_assert!(self.get(id).is_none(), "duplicate projectile id {id}");
        self.items.push(Projectile::new(id, origin, angle, tuning));
        id
    }

    /// Move every projectile, then drop the ones that left the world
    pub fn advance_all(&mut self, world: Vec2) {
        for p in &mut self.items {
            p.pos += p.vel;
        }
        self.items.retain(|p| !p.is_off_screen(world));
    }

    pub fn remove(&mut self, id: u32) -> Option<Projectile> {
        let i = self.items.iter().position(|p| p.id == id)?;
        Some(self.items.remove(i))
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Projectile {
        self.items.remove(index)
    }

    pub fn get(&self, id: u32) -> Option<&Projectile> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
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
