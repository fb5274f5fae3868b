//! Session state
//!
//! `World` owns every entity of one play-through plus score, phase and the
//! seeded RNG. Hosts write input through it and read poses back out.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{EnemySet, SpawnEdge};
use super::input::{Direction, InputState};
use super::player::Player;
use super::projectile::ProjectileSet;
use crate::config::SimConfig;
use crate::{angle_toward, direction_from_angle};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ticks advance the simulation
    Active,
    /// Round over, frozen until restart
    Terminal,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    PlayerDestroyed,
    EnemyBreached,
}

/// Something that happened during the last tick (for sound/effects hosts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, edge: SpawnEdge },
    EnemyDestroyed { enemy_id: u32, projectile_id: u32 },
    PlayerHit { enemy_id: u32, damage: u32, health: u32 },
    GameOver { reason: GameOverReason, score: u64 },
}

/// Complete mutable state of one session
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) config: SimConfig,
    pub(crate) rng: Pcg32,
    /// Written by the host between ticks
    pub(crate) input: InputState,
    pub(crate) player: Player,
    pub(crate) projectiles: ProjectileSet,
    pub(crate) enemies: EnemySet,
    pub(crate) score: u64,
    pub(crate) phase: SessionPhase,
    pub(crate) time_ticks: u64,
    /// Events produced by the most recent tick
    pub(crate) events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

/// Allocate a fresh world with the default tuning
pub fn init_session(width: f32, height: f32) -> World {
    World::new(width, height)
}

impl World {
    /// Fresh world of the given size with default tuning
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(SimConfig::with_world_size(width, height))
    }

    /// Fresh world from a full configuration
    pub fn with_config(config: SimConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid simulation config");
        log::info!(
            "New session {}x{} (seed {}, movement {:?})",
            config.world_width,
            config.world_height,
            config.seed,
            config.movement
        );
        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            input: InputState::default(),
            player: Player::new(&config),
            projectiles: ProjectileSet::new(),
            enemies: EnemySet::new(),
            score: 0,
            phase: SessionPhase::Active,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Reinitialize every entity, score and phase for a new round
    ///
    /// The RNG keeps running so consecutive rounds differ. Held keys are
    /// released; the pointer position is kept.
    pub fn restart(&mut self) {
        log::info!("Session restart (previous score {})", self.score);
        self.player = Player::new(&self.config);
        self.projectiles.clear();
        self.enemies.clear();
        self.score = 0;
        self.phase = SessionPhase::Active;
        self.time_ticks = 0;
        self.events.clear();
        self.input.release_all();
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn world_size(&self) -> Vec2 {
        Vec2::new(self.config.world_width, self.config.world_height)
    }

    /// Record a key press or release
    pub fn set_directional(&mut self, direction: Direction, pressed: bool) {
        self.input.set_directional(direction, pressed);
    }

    /// Record the latest pointer position
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.input.pointer = pointer;
    }

    /// Fire toward `pointer` from the ship's nose
    ///
    /// The projectile box is centered on the muzzle point, half a ship
    /// length from the center along the firing angle. Ignored once the
    /// round is over.
    pub fn fire_projectile(&mut self, pointer: Vec2) -> Option<u32> {
        if self.is_terminal() {
            log::debug!("Fire ignored: session is terminal");
            return None;
        }

        let center = self.player.center();
        let angle = angle_toward(center, pointer);
        let muzzle = center + direction_from_angle(angle) * self.player.size() * 0.5;
        let origin = muzzle - Vec2::splat(self.config.projectile.size * 0.5);

        let id = self.next_entity_id();
        let tuning = self.config.projectile;
        self.projectiles.insert(id, origin, angle, &tuning);
        log::trace!("Projectile {id} fired at {angle:.3} rad");
        Some(id)
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    pub fn enemies(&self) -> &EnemySet {
        &self.enemies
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Place an enemy directly (scripted hosts and tests)
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let tuning = self.config.enemy;
        self.enemies.insert(id, pos, &tuning)
    }

    /// Place a projectile directly (scripted hosts and tests)
    pub fn spawn_projectile_at(&mut self, pos: Vec2, angle: f32) -> u32 {
        let id = self.next_entity_id();
        let tuning = self.config.projectile;
        self.projectiles.insert(id, pos, angle, &tuning)
    }

    /// Mutable player access for scripted hosts and tests
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
