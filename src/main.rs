//! Space Survivor headless runner
//!
//! Plays one round with a scripted pilot through the fixed-rate driver and
//! prints the final snapshot as JSON. Windowing and rendering hosts drive
//! the same library API.
//!
//! Usage: `space-survivor [config.json] [max_ticks]`

use glam::Vec2;

use space_survivor::consts::TICK_DT;
use space_survivor::sim::{Direction, GameEvent, World};
use space_survivor::{FixedStepDriver, SimConfig};

/// Ticks between shots for the scripted pilot
const FIRE_INTERVAL: u64 = 12;
const DEFAULT_MAX_TICKS: u64 = 60 * 60;

fn load_config(path: Option<&str>) -> SimConfig {
    match path {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(e) => {
                log::warn!("{e}; using default config");
                SimConfig::default()
            }
        },
        None => {
            log::info!("Using default config");
            SimConfig::default()
        }
    }
}

/// Aim at the closest enemy and back away from it
fn pilot(world: &mut World) {
    let me = world.player().center();
    let target = world
        .enemies()
        .iter()
        .map(|e| e.center())
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

    let Some(target) = target else {
        world.set_pointer(me + Vec2::X);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            world.set_directional(dir, false);
        }
        return;
    };

    world.set_pointer(target);
    let away = me - target;
    world.set_directional(Direction::Left, away.x < 0.0);
    world.set_directional(Direction::Right, away.x > 0.0);
    world.set_directional(Direction::Up, away.y < 0.0);
    world.set_directional(Direction::Down, away.y > 0.0);

    if world.time_ticks() % FIRE_INTERVAL == 0 {
        world.fire_projectile(target);
    }
}

fn main() {
    env_logger::init();
    log::info!("Space Survivor (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str));
    let max_ticks = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let mut world = World::with_config(config);
    let mut driver = FixedStepDriver::default();
    let mut kills = 0u32;
    let mut hits = 0u32;

    while driver.is_running() && world.time_ticks() < max_ticks {
        pilot(&mut world);
        if driver.advance(&mut world, TICK_DT) > 0 {
            for event in world.events() {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::PlayerHit { .. } => hits += 1,
                    _ => {}
                }
            }
        }
    }

    log::info!(
        "Finished after {} ticks: score {}, {kills} kills, {hits} hits taken, terminal: {}",
        world.time_ticks(),
        world.score(),
        world.is_terminal()
    );

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
