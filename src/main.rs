//! MR Targets headless driver
//!
//! Plays one round against the simulation with an auto-aiming controller and
//! prints a JSON snapshot every simulated second. Useful for balance passes:
//!
//! ```text
//! mr-targets [tuning.json|-] [seed]
//! ```

use glam::{Vec2, Vec3};

use mr_targets::sim::{ArenaSimulation, GameEvent, Pose};
use mr_targets::tuning::{Tuning, TuningError};

/// Display refresh of the reference headset (72 Hz)
const FRAME_DT: f32 = 1.0 / 72.0;
/// Frames per printed snapshot
const SNAPSHOT_EVERY: u32 = 72;
/// Controller held at roughly chest height
const HAND_POSITION: Vec3 = Vec3::new(0.2, 1.3, 0.0);

/// Demo room: 4 m x 4 m in front of the player
fn demo_room() -> [Vec2; 4] {
    [
        Vec2::new(-2.0, 0.5),
        Vec2::new(2.0, 0.5),
        Vec2::new(2.0, -3.5),
        Vec2::new(-2.0, -3.5),
    ]
}

struct Game {
    sim: ArenaSimulation,
    frame: u32,
    shots: u32,
    hits: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        let mut sim = ArenaSimulation::new(seed, tuning)?;
        if let Err(err) = sim.set_boundary(&demo_room()) {
            log::warn!("Demo room rejected: {}", err);
        }
        // Restart so the first wave spawns inside the room
        sim.reset();
        Ok(Self {
            sim,
            frame: 0,
            shots: 0,
            hits: 0,
        })
    }

    /// Aim at the first target that isn't already blowing up
    fn aim(&self) -> Option<Pose> {
        self.sim
            .population()
            .targets()
            .iter()
            .find(|t| !t.is_exploding())
            .map(|t| Pose::looking_at(HAND_POSITION, t.pos))
    }

    fn update(&mut self) {
        if let Some(pose) = self.aim() {
            self.sim.on_fire_triggered(pose);
        }
        // Swap weapons at half time
        if self.sim.time_remaining() <= self.sim.tuning().round_duration / 2.0
            && self.sim.weapon().kind == mr_targets::sim::WeaponKind::Laser
        {
            self.sim.on_secondary_triggered();
        }

        self.sim.tick(FRAME_DT);
        self.frame += 1;

        for event in self.sim.drain_events() {
            match event {
                GameEvent::Fired { projectiles, .. } => self.shots += projectiles,
                GameEvent::Hit(_) => self.hits += 1,
                _ => {}
            }
        }

        if self.frame.is_multiple_of(SNAPSHOT_EVERY) {
            match serde_json::to_string(&self.sim.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(err) => log::error!("Snapshot serialization failed: {}", err),
            }
        }
    }
}

fn load_tuning(arg: Option<&str>) -> Result<Tuning, Box<dyn std::error::Error>> {
    match arg {
        None | Some("-") => Ok(Tuning::default()),
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let tuning = Tuning::from_json(&json)?;
            log::info!("Loaded tuning from {}", path);
            Ok(tuning)
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("MR Targets (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match load_tuning(args.first().map(String::as_str)) {
        Ok(tuning) => tuning,
        Err(err) => {
            log::error!("Could not load tuning: {}", err);
            std::process::exit(1);
        }
    };
    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        None => 12345,
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            log::error!("Invalid seed: {}", err);
            std::process::exit(1);
        }
    };

    let mut game = match Game::new(seed, tuning) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Invalid tuning: {}", err);
            std::process::exit(1);
        }
    };
    while !game.sim.is_game_over() {
        game.update();
    }

    log::info!(
        "Round over after {} frames: {} shots, {} hits",
        game.frame,
        game.shots,
        game.hits
    );
    println!("Final score: {}", game.sim.score());
}
