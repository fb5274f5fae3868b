//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity set)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod input;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Kill, resolve_player_contact, resolve_projectile_hits};
pub use enemy::{Enemy, EnemySet, SpawnEdge};
pub use input::{Direction, InputState};
pub use player::Player;
pub use projectile::{Projectile, ProjectileSet};
pub use snapshot::{EnemyPose, PlayerPose, ProjectilePose, WorldSnapshot};
pub use state::{GameEvent, GameOverReason, SessionPhase, World, init_session};
pub use tick::tick;
