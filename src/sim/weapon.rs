//! Fire-rate gated weapons

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::ProjectileSink;
use crate::tuning::{Tuning, WeaponTuning};

/// Pose of whatever is firing (a tracked controller, usually)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` facing `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or(Vec3::NEG_Z);
        Self::new(position, Quat::from_rotation_arc(Vec3::NEG_Z, dir))
    }

    /// Controllers point down their local -Z
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::NEG_Z).normalize_or(Vec3::NEG_Z)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }
}

/// Weapon archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// One fast, perfectly straight shot
    #[default]
    Laser,
    /// A spray of pellets
    Pellet,
}

impl WeaponKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Laser => "Laser",
            WeaponKind::Pellet => "Pellet",
        }
    }

    /// Next weapon in the switch cycle
    pub fn next(&self) -> Self {
        match self {
            WeaponKind::Laser => WeaponKind::Pellet,
            WeaponKind::Pellet => WeaponKind::Laser,
        }
    }
}

/// A weapon instance. Switching weapons builds a new one.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    tuning: WeaponTuning,
    /// Simulation time of the last discharge; `None` until first shot
    last_fired: Option<f64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind, tuning: &Tuning) -> Self {
        let tuning = match kind {
            WeaponKind::Laser => tuning.laser,
            WeaponKind::Pellet => tuning.pellet,
        };
        Self {
            kind,
            tuning,
            last_fired: None,
        }
    }

    /// Minimum seconds between discharges
    #[inline]
    pub fn cooldown(&self) -> f64 {
        1.0 / self.tuning.fire_rate as f64
    }

    pub fn can_fire(&self, now: f64) -> bool {
        self.last_fired
            .is_none_or(|last| now - last >= self.cooldown())
    }

    /// Discharge at `now` from `origin` into `sink`.
    ///
    /// Returns the number of projectiles emitted (0 when still cooling down).
    pub fn fire<R: Rng, S: ProjectileSink>(
        &mut self,
        now: f64,
        origin: &Pose,
        rng: &mut R,
        sink: &mut S,
    ) -> u32 {
        if !self.can_fire(now) {
            return 0;
        }
        self.last_fired = Some(now);

        let forward = origin.forward();
        for _ in 0..self.tuning.projectile_count {
            let dir = if self.tuning.spread > 0.0 {
                let yaw = (rng.random::<f32>() * 2.0 - 1.0) * self.tuning.spread;
                Quat::from_rotation_y(yaw) * forward
            } else {
                forward
            };
            let pos = origin.position + dir * self.tuning.muzzle_offset;
            sink.emit(pos, dir * self.tuning.speed);
        }
        self.tuning.projectile_count
    }
}
