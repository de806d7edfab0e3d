//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn / fire order)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod collision;
pub mod population;
pub mod projectile;
pub mod state;
pub mod target;
pub mod tick;
pub mod view;
pub mod weapon;

pub use boundary::{Boundary, BoundaryError};
pub use collision::{Hit, resolve};
pub use population::{PopulationUpdate, TargetPopulation};
pub use projectile::{Projectile, ProjectileId, ProjectileSet, ProjectileSink};
pub use state::{ArenaSimulation, GameEvent, GamePhase};
pub use target::{Axis, Movement, MovementKind, Target, TargetId, TargetState};
pub use tick::tick;
pub use view::{Hud, ProjectileView, Snapshot, TargetView};
pub use weapon::{Pose, Weapon, WeaponKind};
