//! Read-only views for the presentation layer
//!
//! Just enough for a renderer to mirror the arena: positions and a few
//! render attributes, no simulation internals.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::projectile::{Projectile, ProjectileId};
use super::target::{MovementKind, Target, TargetId};
use super::weapon::WeaponKind;

/// Score / timer / game-over triple shown on the in-world panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub time_remaining: f32,
    pub game_over: bool,
}

impl Hud {
    /// Whole seconds left, as shown to the player
    pub fn display_seconds(&self) -> u32 {
        self.time_remaining.max(0.0).floor() as u32
    }

    /// Panel text, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Time: {} sec", self.display_seconds()),
            format!("Score: {}", self.score),
        ];
        if self.game_over {
            lines.push("GAME OVER".to_string());
            lines.push("Pull the trigger to restart".to_string());
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub kind: MovementKind,
    pub pos: Vec3,
    /// 0xRRGGBB
    pub color: u32,
    pub scale: f32,
    pub opacity: f32,
    pub exploding: bool,
}

impl From<&Target> for TargetView {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id,
            kind: target.kind,
            pos: target.pos,
            color: target.kind.color(),
            scale: target.scale(),
            opacity: target.opacity(),
            exploding: target.is_exploding(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub pos: Vec3,
}

impl From<&Projectile> for ProjectileView {
    fn from(projectile: &Projectile) -> Self {
        Self {
            id: projectile.id,
            pos: projectile.pos,
        }
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hud: Hud,
    pub weapon: WeaponKind,
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
}
