//! Arena state and input handling
//!
//! `ArenaSimulation` owns everything in a round: targets, projectiles, the
//! active weapon, the countdown and the score. Input events are applied the
//! moment they arrive; time only moves in [`tick`](super::tick::tick).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boundary::{Boundary, BoundaryError};
use super::collision::Hit;
use super::population::TargetPopulation;
use super::projectile::ProjectileSet;
use super::target::TargetId;
use super::view::{Hud, Snapshot};
use super::weapon::{Pose, Weapon, WeaponKind};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, shots score
    Running,
    /// Clock hit zero; the next trigger pull restarts
    GameOver,
}

/// Things the presentation layer may want to react to (sounds, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { weapon: WeaponKind, projectiles: u32 },
    Hit(Hit),
    TargetDestroyed(TargetId),
    TargetEscaped(TargetId),
    TargetSpawned(TargetId),
    WeaponSwitched(WeaponKind),
    GameOver { score: u64 },
    Reset,
}

/// Complete simulation state for one arena
#[derive(Debug, Clone)]
pub struct ArenaSimulation {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) phase: GamePhase,
    /// Seconds left on the countdown
    pub(crate) time_remaining: f32,
    pub(crate) score: u64,
    /// Total simulated seconds since creation (never reset)
    pub(crate) clock: f64,
    pub(crate) population: TargetPopulation,
    pub(crate) projectiles: ProjectileSet,
    pub(crate) weapon: Weapon,
    pub(crate) events: Vec<GameEvent>,
}

impl ArenaSimulation {
    /// Create a running arena with the initial target population spawned.
    ///
    /// Tuning that would put NaN or a stalled clock into the round is
    /// rejected up front.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    /// Arena with the stock balance sheet
    pub fn with_default_tuning(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut sim = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            time_remaining: tuning.round_duration,
            score: 0,
            clock: 0.0,
            population: TargetPopulation::new(tuning.clone()),
            projectiles: ProjectileSet::new(tuning.max_range),
            weapon: Weapon::new(WeaponKind::default(), &tuning),
            events: Vec::new(),
            tuning,
        };
        sim.population.spawn_initial(sim.tuning.population, &mut sim.rng);
        log::info!(
            "Arena ready: seed {}, {} targets, {:.0}s round",
            seed,
            sim.population.len(),
            sim.time_remaining
        );
        sim
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Simulation clock (seconds)
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn population(&self) -> &TargetPopulation {
        &self.population
    }

    pub fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            time_remaining: self.time_remaining,
            game_over: self.is_game_over(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            hud: self.hud(),
            weapon: self.weapon.kind,
            targets: self.population.targets().iter().map(Into::into).collect(),
            projectiles: self.projectiles.iter().map(Into::into).collect(),
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Primary trigger. Fires the active weapon, or restarts after game over.
    pub fn on_fire_triggered(&mut self, origin: Pose) {
        if self.is_game_over() {
            self.reset();
            return;
        }
        if !origin.is_finite() {
            log::warn!("Ignoring fire trigger with non-finite pose: {:?}", origin);
            return;
        }

        let fired = self
            .weapon
            .fire(self.clock, &origin, &mut self.rng, &mut self.projectiles);
        if fired > 0 {
            log::debug!("{} fired {} projectile(s)", self.weapon.kind.as_str(), fired);
            self.events.push(GameEvent::Fired {
                weapon: self.weapon.kind,
                projectiles: fired,
            });
        }
    }

    /// Secondary trigger: swap to the next weapon. Shots in flight are kept.
    pub fn on_secondary_triggered(&mut self) {
        let kind = self.weapon.kind.next();
        self.weapon = Weapon::new(kind, &self.tuning);
        log::info!("Switched to {}", kind.as_str());
        self.events.push(GameEvent::WeaponSwitched(kind));
    }

    /// Replace the room boundary.
    ///
    /// A degenerate ring is rejected and the arena falls back to the default
    /// spawn box; the error is returned for diagnostics.
    pub fn set_boundary(&mut self, points: &[Vec2]) -> Result<(), BoundaryError> {
        match Boundary::new(points.iter().copied()) {
            Ok(boundary) => {
                log::info!(
                    "Room boundary set: {} points, {:.2} m²",
                    boundary.points().len(),
                    boundary.area()
                );
                self.population.set_boundary(Some(boundary));
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected room boundary ({}), using default spawn area", err);
                self.population.set_boundary(None);
                Err(err)
            }
        }
    }

    /// Forget the room boundary and spawn in the default area
    pub fn clear_boundary(&mut self) {
        self.population.set_boundary(None);
    }

    /// Start a fresh round: full clock, zero score, no projectiles, new targets
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.time_remaining = self.tuning.round_duration;
        self.score = 0;
        self.projectiles.clear();
        self.weapon = Weapon::new(self.weapon.kind, &self.tuning);
        self.population.spawn_initial(self.tuning.population, &mut self.rng);
        self.events.push(GameEvent::Reset);
        log::info!("Round restarted");
    }

    pub(crate) fn record_hits(&mut self, hits: &[Hit]) {
        for hit in hits {
            self.score += hit.score as u64;
            log::debug!("Target {} hit for {} points", hit.target, hit.score);
            self.events.push(GameEvent::Hit(*hit));
        }
    }
}
