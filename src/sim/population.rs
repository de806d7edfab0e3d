//! Live target set: spawning, removal and delayed respawn
//!
//! Respawns are deferred on the simulation clock rather than a wall-clock
//! timer. Each pending respawn is stamped with the population generation so
//! a reset can't be refilled by respawns scheduled before it.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::boundary::Boundary;
use super::target::{MovementKind, Target, TargetId};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{from_floor, to_floor};

#[derive(Debug, Clone, Copy)]
struct PendingRespawn {
    /// Population clock value at which to spawn
    due: f64,
    generation: u32,
}

/// What happened to the population during one `update_all`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationUpdate {
    /// Explosions that finished this frame
    pub destroyed: Vec<TargetId>,
    /// Targets that left the room boundary and were recycled
    pub escaped: Vec<TargetId>,
    /// Replacement targets that appeared this frame
    pub spawned: Vec<TargetId>,
}

/// Owns every live target
#[derive(Debug, Clone)]
pub struct TargetPopulation {
    /// Live targets in spawn order (collision scan order)
    targets: Vec<Target>,
    boundary: Option<Boundary>,
    pending: Vec<PendingRespawn>,
    /// Seconds of simulated time seen by this population
    clock: f64,
    generation: u32,
    next_id: TargetId,
    tuning: Tuning,
}

impl TargetPopulation {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            targets: Vec::new(),
            boundary: None,
            pending: Vec::new(),
            clock: 0.0,
            generation: 0,
            next_id: 1,
            tuning,
        }
    }

    /// Configured steady-state population size
    pub fn capacity(&self) -> usize {
        self.tuning.population
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut [Target] {
        &mut self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Respawns scheduled but not yet fired for the current generation
    pub fn pending_respawns(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| p.generation == self.generation)
            .count()
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    /// Replace (or clear) the room boundary used for spawning and containment
    pub fn set_boundary(&mut self, boundary: Option<Boundary>) {
        self.boundary = boundary;
    }

    /// Spawn a target of a random kind at a random valid position
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> &Target {
        let kind = MovementKind::ALL[rng.random_range(0..MovementKind::ALL.len())];
        let pos = self.spawn_position(rng);
        let id = self.next_id;
        self.next_id += 1;

        log::debug!("Spawned {} target {} at {:?}", kind.as_str(), id, pos);
        let index = self.targets.len();
        self.targets.push(Target::new(id, kind, pos, &self.tuning));
        &self.targets[index]
    }

    fn spawn_position<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let height = SPAWN_HEIGHT_MIN + rng.random::<f32>() * SPAWN_HEIGHT_JITTER;
        match &self.boundary {
            Some(boundary) => {
                let floor = boundary.random_point_inside(rng, self.tuning.boundary_sample_attempts);
                from_floor(floor, height)
            }
            None => {
                let floor = Vec2::new(
                    (rng.random::<f32>() * 2.0 - 1.0) * FALLBACK_HALF_WIDTH,
                    -FALLBACK_NEAR - rng.random::<f32>() * FALLBACK_DEPTH,
                );
                from_floor(floor, height)
            }
        }
    }

    /// Drop a target from the live set. Returns false if it was already gone.
    pub fn remove(&mut self, id: TargetId) -> bool {
        match self.targets.iter().position(|t| t.id == id) {
            Some(index) => {
                self.targets.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove a target and queue exactly one replacement after the respawn
    /// delay. Absent targets are ignored so a double destroy can't queue two.
    pub fn destroy_and_respawn(&mut self, id: TargetId) {
        if !self.remove(id) {
            return;
        }
        self.pending.push(PendingRespawn {
            due: self.clock + self.tuning.respawn_delay as f64,
            generation: self.generation,
        });
    }

    /// Advance every target, recycle escaped and finished ones, and fire any
    /// respawns that have come due.
    pub fn update_all<R: Rng>(&mut self, dt: f32, rng: &mut R) -> PopulationUpdate {
        let mut update = PopulationUpdate::default();
        self.clock += dt as f64;

        for target in &mut self.targets {
            if target.update(dt) {
                update.destroyed.push(target.id);
            }
        }

        // Exploding targets finish their animation wherever they are
        if let Some(boundary) = &self.boundary {
            update.escaped = self
                .targets
                .iter()
                .filter(|t| !t.is_exploding() && !boundary.contains(to_floor(t.pos)))
                .map(|t| t.id)
                .collect();
        }

        for &id in update.destroyed.iter().chain(&update.escaped) {
            self.destroy_and_respawn(id);
        }
        for id in &update.escaped {
            log::debug!("Target {} left the room boundary, respawning", id);
        }

        update.spawned = self.fire_due_respawns(rng);
        update
    }

    fn fire_due_respawns<R: Rng>(&mut self, rng: &mut R) -> Vec<TargetId> {
        let clock = self.clock;
        let generation = self.generation;
        let mut due = 0;
        self.pending.retain(|p| {
            if p.generation != generation {
                return false;
            }
            if p.due <= clock {
                due += 1;
                return false;
            }
            true
        });

        let mut spawned = Vec::new();
        for _ in 0..due {
            if self.targets.len() >= self.capacity() {
                log::debug!("Population full, dropping respawn");
                continue;
            }
            let id = self.spawn(rng).id;
            spawned.push(id);
        }
        spawned
    }

    /// Clear everything and spawn a fresh set of `n` targets
    pub fn spawn_initial<R: Rng>(&mut self, n: usize, rng: &mut R) {
        self.targets.clear();
        self.generation = self.generation.wrapping_add(1);
        self.pending.clear();
        for _ in 0..n {
            self.spawn(rng);
        }
    }
}
