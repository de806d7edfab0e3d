//! Projectile vs target hit resolution
//!
//! Every projectile is checked against the live targets in population order
//! and the first target inside the hit radius takes the hit. First match,
//! not closest match: the outcome only depends on ordering, which keeps
//! replays stable.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::projectile::{ProjectileId, ProjectileSet};
use super::target::{Target, TargetId};

/// A scored projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub projectile: ProjectileId,
    pub target: TargetId,
    /// Points awarded for this hit
    pub score: u32,
    /// Where the target was when it was hit
    pub pos: Vec3,
}

/// Match projectiles against targets for one frame.
///
/// Hit targets start exploding immediately, so each can only be claimed
/// once; each projectile claims at most one target. Spent projectiles are
/// removed after the scan.
pub fn resolve(projectiles: &mut ProjectileSet, targets: &mut [Target], radius: f32) -> Vec<Hit> {
    let radius_sq = radius * radius;
    let mut hits = Vec::new();

    for projectile in projectiles.iter() {
        let Some(target) = targets
            .iter_mut()
            .find(|t| !t.is_exploding() && t.pos.distance_squared(projectile.pos) < radius_sq)
        else {
            continue;
        };

        target.explode();
        hits.push(Hit {
            projectile: projectile.id,
            target: target.id,
            score: target.score,
            pos: target.pos,
        });
    }

    let spent: Vec<ProjectileId> = hits.iter().map(|h| h.projectile).collect();
    projectiles.remove_many(&spent);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::ProjectileSink;
    use crate::sim::target::{MovementKind, TargetState};
    use crate::tuning::Tuning;

    const RADIUS: f32 = 0.28;

    fn target_at(id: TargetId, kind: MovementKind, pos: Vec3) -> Target {
        Target::new(id, kind, pos, &Tuning::default())
    }

    #[test]
    fn test_direct_hit() {
        let mut projectiles = ProjectileSet::new(20.0);
        let mut targets = vec![target_at(1, MovementKind::PatrolY, Vec3::new(0.0, 1.0, -2.0))];
        let shot = projectiles.emit(Vec3::new(0.0, 1.0, -2.0), Vec3::NEG_Z);

        let hits = resolve(&mut projectiles, &mut targets, RADIUS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].projectile, shot);
        assert_eq!(hits[0].target, 1);
        assert_eq!(hits[0].score, 15);
        assert_eq!(targets[0].state, TargetState::Exploding { elapsed: 0.0 });
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_miss_outside_radius() {
        let mut projectiles = ProjectileSet::new(20.0);
        let mut targets = vec![target_at(1, MovementKind::Stationary, Vec3::ZERO)];
        projectiles.emit(Vec3::new(0.3, 0.0, 0.0), Vec3::X);

        assert!(resolve(&mut projectiles, &mut targets, RADIUS).is_empty());
        assert_eq!(projectiles.len(), 1);
        assert!(!targets[0].is_exploding());
    }

    #[test]
    fn test_first_match_wins_over_closest() {
        let mut projectiles = ProjectileSet::new(20.0);
        // T1 is further away than T2 but earlier in the population
        let mut targets = vec![
            target_at(1, MovementKind::Stationary, Vec3::new(0.2, 0.0, 0.0)),
            target_at(2, MovementKind::Stationary, Vec3::new(0.01, 0.0, 0.0)),
        ];
        projectiles.emit(Vec3::ZERO, Vec3::X);

        let hits = resolve(&mut projectiles, &mut targets, RADIUS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, 1);
        assert!(!targets[1].is_exploding());
    }

    #[test]
    fn test_one_hit_per_projectile() {
        // 3 projectiles, 5 targets, everyone within range of everyone
        let mut projectiles = ProjectileSet::new(20.0);
        let mut targets: Vec<Target> = (1..=5)
            .map(|id| {
                let pos = Vec3::new(id as f32 * 0.01, 0.0, 0.0);
                target_at(id, MovementKind::Stationary, pos)
            })
            .collect();
        for _ in 0..3 {
            projectiles.emit(Vec3::ZERO, Vec3::X);
        }

        let hits = resolve(&mut projectiles, &mut targets, RADIUS);
        assert_eq!(hits.len(), 3);
        assert!(projectiles.is_empty());
        let exploding: Vec<TargetId> = targets
            .iter()
            .filter(|t| t.is_exploding())
            .map(|t| t.id)
            .collect();
        assert_eq!(exploding, vec![1, 2, 3]);
    }

    #[test]
    fn test_more_projectiles_than_targets() {
        let mut projectiles = ProjectileSet::new(20.0);
        let mut targets = vec![target_at(1, MovementKind::Stationary, Vec3::ZERO)];
        for _ in 0..4 {
            projectiles.emit(Vec3::ZERO, Vec3::X);
        }

        let hits = resolve(&mut projectiles, &mut targets, RADIUS);
        assert_eq!(hits.len(), 1);
        assert_eq!(projectiles.len(), 3, "unspent projectiles keep flying");
    }

    #[test]
    fn test_exploding_targets_ignored() {
        let mut projectiles = ProjectileSet::new(20.0);
        let mut targets = vec![target_at(1, MovementKind::Stationary, Vec3::ZERO)];
        targets[0].explode();
        projectiles.emit(Vec3::ZERO, Vec3::X);

        assert!(resolve(&mut projectiles, &mut targets, RADIUS).is_empty());
        assert_eq!(projectiles.len(), 1);
    }
}
