//! Fixed timestep simulation tick
//!
//! Core game loop step. Given the same world and input snapshot, a tick
//! always produces the same result.

use super::collision::{resolve_player_contact, resolve_projectile_hits};
use super::input::InputState;
use super::state::{GameEvent, GameOverReason, SessionPhase, World};

/// Advance the world by one tick using `input` as this tick's input snapshot
///
/// Returns whether the session is terminal afterwards. A terminal world is
/// left untouched.
pub fn tick(world: &mut World, input: &InputState) -> bool {
    if world.phase == SessionPhase::Terminal {
        return true;
    }

    world.events.clear();
    world.time_ticks += 1;
    let bounds = world.world_size();

    // Player
    world.player.update(input, world.config.movement, bounds);

    // Projectiles
    world.projectiles.advance_all(bounds);

    // Spawning
    let enemy_tuning = world.config.enemy;
    let next_id = &mut world.next_id;
    if let Some((id, edge)) = world.enemies.try_spawn_at_edge(
        enemy_tuning.spawn_chance,
        &mut world.rng,
        bounds,
        &enemy_tuning,
        || {
            let id = *next_id;
            *next_id += 1;
            id
        },
    ) {
        log::debug!("Enemy {id} spawned on {edge:?} edge");
        world.events.push(GameEvent::EnemySpawned { id, edge });
    }

    // Pursuit
    world.enemies.advance_all(world.player.center());

    // Projectile x enemy
    let kills = resolve_projectile_hits(&mut world.enemies, &mut world.projectiles);
    for kill in kills {
        world.score += world.config.rules.kill_reward;
        log::debug!("Enemy {} destroyed by projectile {}", kill.enemy_id, kill.projectile_id);
        world.events.push(GameEvent::EnemyDestroyed {
            enemy_id: kill.enemy_id,
            projectile_id: kill.projectile_id,
        });
    }

    // Enemy x player
    let damage = world.config.rules.contact_damage;
    if let Some(enemy_id) = resolve_player_contact(&mut world.enemies, &mut world.player, damage) {
        log::debug!("Player hit by enemy {enemy_id}, health {}", world.player.health);
        world.events.push(GameEvent::PlayerHit {
            enemy_id,
            damage,
            health: world.player.health,
        });
    }

    // Terminal conditions
    let reason = if world.player.is_dead() {
        Some(GameOverReason::PlayerDestroyed)
    } else if world.config.rules.far_edge_ends_game && world.enemies.any_past_bottom(bounds.y) {
        Some(GameOverReason::EnemyBreached)
    } else {
        None
    };

    if let Some(reason) = reason {
        world.phase = SessionPhase::Terminal;
        if world.config.rules.reset_health_on_game_over {
            world.player.health = world.player.max_health;
        }
        log::info!(
            "Game over ({reason:?}) after {} ticks, score {}",
            world.time_ticks,
            world.score
        );
        world.events.push(GameEvent::GameOver {
            reason,
            score: world.score,
        });
    }

    log::trace!(
        "tick {}: {} enemies, {} projectiles, score {}",
        world.time_ticks,
        world.enemies.len(),
        world.projectiles.len(),
        world.score
    );

    world.is_terminal()
}

impl World {
    /// Advance one tick using the input last written through this world
    pub fn step(&mut self) -> bool {
        let input = self.input;
        tick(self, &input)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::{MovementPolicy, SimConfig};
    use crate::sim::input::Direction;

    /// Default tuning with spawning disabled so tests control every enemy
    fn quiet_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.enemy.spawn_chance = 0.0;
        config
    }

    fn quiet_world() -> World {
        World::with_config(quiet_config())
    }

    #[test]
    fn test_projectile_kill_scores_once() {
        let mut world = quiet_world();
        // Far from the player, projectile already inside the enemy
        world.spawn_enemy_at(Vec2::new(100.0, 100.0));
        world.spawn_projectile_at(Vec2::new(110.0, 110.0), 0.0);

        let over = tick(&mut world, &InputState::default());
        assert!(!over);
        assert!(world.enemies().is_empty());
        assert!(world.projectiles().is_empty());
        assert_eq!(world.score(), 10);
        assert!(matches!(world.events(), [GameEvent::EnemyDestroyed { .. }]));

        tick(&mut world, &InputState::default());
        assert_eq!(world.score(), 10);
    }

    #[test]
    fn test_contact_damages_once_per_tick() {
        let mut world = quiet_world();
        let at = world.player().pos;
        world.spawn_enemy_at(at);
        world.spawn_enemy_at(at);

        tick(&mut world, &InputState::default());
        assert_eq!(world.player().health, 80);
        assert_eq!(world.enemies().len(), 1);

        tick(&mut world, &InputState::default());
        assert_eq!(world.player().health, 60);
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn test_oldest_enemy_rams_first() {
        let mut config = quiet_config();
        config.enemy.speed = 0.0;
        let mut world = World::with_config(config);
        let at = world.player().pos;
        let older = world.spawn_enemy_at(at);
        let newer = world.spawn_enemy_at(at);

        tick(&mut world, &InputState::default());
        assert_eq!(world.enemies().iter().map(|e| e.id).collect::<Vec<_>>(), vec![newer]);
        assert!(matches!(
            world.events(),
            [GameEvent::PlayerHit { enemy_id, .. }] if *enemy_id == older
        ));
    }

    #[test]
    fn test_shot_enemy_does_not_ram() {
        let mut world = quiet_world();
        let at = world.player().pos;
        world.spawn_enemy_at(at);
        // Still inside the enemy after moving this tick
        world.spawn_projectile_at(at + Vec2::new(10.0, 10.0), 0.0);

        tick(&mut world, &InputState::default());
        assert_eq!(world.score(), 10);
        assert_eq!(world.player().health, world.player().max_health);
        assert!(world.enemies().is_empty());
        assert!(world.projectiles().is_empty());
        assert!(!world.events().iter().any(|e| matches!(e, GameEvent::PlayerHit { .. })));
    }

    #[test]
    fn test_player_death_ends_session() {
        let mut world = quiet_world();
        world.player_mut().take_damage(90);
        let at = world.player().pos;
        world.spawn_enemy_at(at);

        assert!(tick(&mut world, &InputState::default()));
        assert!(world.is_terminal());
        assert_eq!(world.player().health, 0);
        assert!(world.events().iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                reason: GameOverReason::PlayerDestroyed,
                ..
            }
        )));
    }

    #[test]
    fn test_health_reset_on_game_over_variant() {
        let mut config = quiet_config();
        config.rules.reset_health_on_game_over = true;
        let mut world = World::with_config(config);
        world.player_mut().take_damage(100);

        assert!(tick(&mut world, &InputState::default()));
        assert_eq!(world.player().health, world.player().max_health);
    }

    #[test]
    fn test_terminal_tick_changes_nothing() {
        let mut config = quiet_config();
        config.enemy.spawn_chance = 1.0;
        let mut world = World::with_config(config);
        world.fire_projectile(Vec2::ZERO);
        world.player_mut().take_damage(100);
        assert!(tick(&mut world, &InputState::default()));

        let player = world.player().clone();
        let enemies: Vec<_> = world.enemies().iter().cloned().collect();
        let projectiles: Vec<_> = world.projectiles().iter().cloned().collect();
        let ticks = world.time_ticks();

        let mut input = InputState::default();
        input.set_directional(Direction::Right, true);
        input.pointer = Vec2::new(0.0, 0.0);
        for _ in 0..10 {
            assert!(tick(&mut world, &input));
        }

        assert_eq!(world.player(), &player);
        assert_eq!(world.enemies().iter().cloned().collect::<Vec<_>>(), enemies);
        assert_eq!(world.projectiles().iter().cloned().collect::<Vec<_>>(), projectiles);
        assert_eq!(world.time_ticks(), ticks);
        assert_eq!(world.fire_projectile(Vec2::ZERO), None);
    }

    #[test]
    fn test_far_edge_rule() {
        let mut config = quiet_config();
        config.rules.far_edge_ends_game = true;
        config.enemy.speed = 0.0;
        let mut world = World::with_config(config.clone());
        world.spawn_enemy_at(Vec2::new(10.0, 601.0));
        assert!(tick(&mut world, &InputState::default()));
        assert!(matches!(
            world.events().last(),
            Some(GameEvent::GameOver {
                reason: GameOverReason::EnemyBreached,
                ..
            })
        ));

        // Same layout without the rule keeps playing
        config.rules.far_edge_ends_game = false;
        let mut world = World::with_config(config);
        world.spawn_enemy_at(Vec2::new(10.0, 601.0));
        assert!(!tick(&mut world, &InputState::default()));
    }

    #[test]
    fn test_step_uses_world_input() {
        let mut config = quiet_config();
        config.movement = MovementPolicy::Direct { speed: 4.0 };
        let mut world = World::with_config(config);
        let start = world.player().pos;

        world.set_directional(Direction::Left, true);
        world.step();
        assert_eq!(world.player().pos, start - Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_projectiles_leave_the_world() {
        let mut world = quiet_world();
        world.fire_projectile(Vec2::new(800.0, 300.0));
        for _ in 0..60 {
            tick(&mut world, &InputState::default());
        }
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn test_spawned_enemy_chases_player() {
        let mut config = SimConfig::default();
        config.enemy.spawn_chance = 1.0;
        let mut world = World::with_config(config);

        tick(&mut world, &InputState::default());
        let (id, _) = match world.events()[0] {
            GameEvent::EnemySpawned { id, edge } => (id, edge),
            other => panic!("unexpected event {other:?}"),
        };
        let enemy = world.enemies().iter().find(|e| e.id == id).unwrap().clone();
        let target = world.player().center();
        let d0 = enemy.center().distance(target);

        world.config.enemy.spawn_chance = 0.0;
        tick(&mut world, &InputState::default());
        let enemy = world.enemies().iter().find(|e| e.id == id).unwrap();
        assert!(enemy.center().distance(target) < d0);
    }

    #[test]
    fn test_determinism() {
        let mut config = SimConfig::default();
        config.seed = 99999;
        config.enemy.spawn_chance = 0.2;
        let mut world1 = World::with_config(config.clone());
        let mut world2 = World::with_config(config);

        let mut input = InputState::default();
        for i in 0..300 {
            input.pointer = Vec2::new((i * 7 % 800) as f32, (i * 13 % 600) as f32);
            input.set_directional(Direction::Up, i % 50 < 25);
            if i % 10 == 0 {
                world1.fire_projectile(input.pointer);
                world2.fire_projectile(input.pointer);
            }
            tick(&mut world1, &input);
            tick(&mut world2, &input);
        }

        assert_eq!(world1.score(), world2.score());
        assert_eq!(world1.player(), world2.player());
        assert_eq!(
            world1.enemies().iter().map(|e| e.pos).collect::<Vec<_>>(),
            world2.enemies().iter().map(|e| e.pos).collect::<Vec<_>>()
        );
        assert_eq!(world1.phase(), world2.phase());
    }
}
