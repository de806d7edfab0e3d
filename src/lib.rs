//! MR Targets - A mixed-reality target shooting arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, weapons, projectiles, scoring)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, XR session setup and controller wiring live outside this crate.
//! The host feeds frame deltas, fire triggers and the room boundary in, and
//! mirrors [`sim::Snapshot`] back out.

pub mod sim;
pub mod tuning;

pub use sim::{ArenaSimulation, GameEvent, GamePhase, Pose, Snapshot};
pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Length of a round (seconds)
    pub const ROUND_DURATION: f32 = 60.0;
    /// Targets alive at the start of a round
    pub const INITIAL_POPULATION: usize = 5;
    /// Delay between a target dying and its replacement appearing (seconds)
    pub const RESPAWN_DELAY: f32 = 1.0;

    /// Projectile-to-target hit distance
    pub const COLLISION_RADIUS: f32 = 0.28;
    /// Projectiles further than this from their muzzle are culled
    pub const PROJECTILE_MAX_RANGE: f32 = 20.0;

    /// Time a target spends exploding before removal (seconds)
    pub const EXPLOSION_DURATION: f32 = 0.5;
    /// Extra scale reached at the end of the explosion
    pub const EXPLOSION_SCALE_GROWTH: f32 = 1.5;

    /// Rejection-sampling attempts before falling back to the bbox center
    pub const BOUNDARY_SAMPLE_ATTEMPTS: u32 = 64;
    /// Minimum polygon area for a usable room boundary (m²)
    pub const MIN_BOUNDARY_AREA: f32 = 1e-4;

    /// Targets float this high above the floor...
    pub const SPAWN_HEIGHT_MIN: f32 = 1.0;
    /// ...plus up to this much jitter
    pub const SPAWN_HEIGHT_JITTER: f32 = 0.5;
    /// Fallback spawn box when no boundary is known (x half-width)
    pub const FALLBACK_HALF_WIDTH: f32 = 1.0;
    /// Fallback spawn box near edge (distance in front of the viewer)
    pub const FALLBACK_NEAR: f32 = 2.0;
    /// Fallback spawn box depth
    pub const FALLBACK_DEPTH: f32 = 2.0;
}

/// Project a world position onto the floor plane (x, z)
#[inline]
pub fn to_floor(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Lift a floor-plane point back into the world at the given height
#[inline]
pub fn from_floor(point: Vec2, height: f32) -> Vec3 {
    Vec3::new(point.x, height, point.y)
}
