//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a round can be retuned
//! from JSON without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    /// JSON could not be parsed into a [`Tuning`]
    #[error("Tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of its legal range
    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Per-movement-kind balance: speed, patrol bound and reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatrolTuning {
    /// Units per second along the patrol axis
    pub speed: f32,
    /// Patrol reverses once |position| on the axis exceeds this
    pub bound: f32,
    /// Points awarded for hitting this target
    pub score: u32,
}

/// Per-weapon balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponTuning {
    /// Shots per second
    pub fire_rate: f32,
    /// Projectiles per shot
    pub projectile_count: u32,
    /// Projectile speed (units per second)
    pub speed: f32,
    /// Maximum yaw deviation per projectile (radians, ±)
    pub spread: f32,
    /// Distance ahead of the muzzle projectiles appear at
    pub muzzle_offset: f32,
}

/// Complete balance sheet for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Round ===
    /// Countdown length (seconds)
    pub round_duration: f32,
    /// Live targets kept in the arena
    pub population: usize,
    /// Delay before a destroyed target is replaced (seconds)
    pub respawn_delay: f32,

    // === Combat ===
    /// Projectile-to-target hit distance
    pub collision_radius: f32,
    /// Distance from the muzzle at which projectiles are culled
    pub max_range: f32,
    /// Explosion animation length (seconds)
    pub explosion_duration: f32,

    // === Targets ===
    pub patrol_x: PatrolTuning,
    pub stationary_score: u32,
    pub patrol_y: PatrolTuning,
    pub fast_patrol_y: PatrolTuning,

    // === Weapons ===
    pub laser: WeaponTuning,
    pub pellet: WeaponTuning,

    // === Spawning ===
    /// Rejection-sampling attempts inside the room boundary
    pub boundary_sample_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_duration: ROUND_DURATION,
            population: INITIAL_POPULATION,
            respawn_delay: RESPAWN_DELAY,

            collision_radius: COLLISION_RADIUS,
            max_range: PROJECTILE_MAX_RANGE,
            explosion_duration: EXPLOSION_DURATION,

            patrol_x: PatrolTuning {
                speed: 0.2,
                bound: 100.0,
                score: 10,
            },
            stationary_score: 5,
            patrol_y: PatrolTuning {
                speed: 0.1,
                bound: 50.0,
                score: 15,
            },
            fast_patrol_y: PatrolTuning {
                speed: 0.5,
                bound: 100.0,
                score: 20,
            },

            laser: WeaponTuning {
                fire_rate: 2.0,
                projectile_count: 1,
                speed: 12.0,
                spread: 0.0,
                muzzle_offset: 0.0,
            },
            pellet: WeaponTuning {
                fire_rate: 5.0,
                projectile_count: 5,
                speed: 18.0,
                spread: 0.05,
                muzzle_offset: 0.05,
            },

            boundary_sample_attempts: BOUNDARY_SAMPLE_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping a starting template)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or corrupt the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative finite number",
                })
            }
        }

        positive("round_duration", self.round_duration)?;
        positive("respawn_delay", self.respawn_delay)?;
        positive("collision_radius", self.collision_radius)?;
        positive("max_range", self.max_range)?;
        positive("explosion_duration", self.explosion_duration)?;
        if self.population == 0 {
            return Err(TuningError::Invalid {
                field: "population",
                reason: "must be at least 1",
            });
        }

        for (field, patrol) in [
            ("patrol_x", &self.patrol_x),
            ("patrol_y", &self.patrol_y),
            ("fast_patrol_y", &self.fast_patrol_y),
        ] {
            non_negative(field, patrol.speed)?;
            positive(field, patrol.bound)?;
        }

        for (field, weapon) in [("laser", &self.laser), ("pellet", &self.pellet)] {
            positive(field, weapon.fire_rate)?;
            positive(field, weapon.speed)?;
            non_negative(field, weapon.spread)?;
            non_negative(field, weapon.muzzle_offset)?;
            if weapon.projectile_count == 0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "projectile_count must be at least 1",
                });
            }
        }

        if self.boundary_sample_attempts == 0 {
            return Err(TuningError::Invalid {
                field: "boundary_sample_attempts",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
