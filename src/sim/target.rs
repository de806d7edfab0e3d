//! Destructible targets and their movement patterns

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::EXPLOSION_SCALE_GROWTH;
use crate::tuning::{PatrolTuning, Tuning};

/// Stable handle for a target (allocated by the population, never reused)
pub type TargetId = u32;

/// Target archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Slides left and right
    PatrolX,
    /// Sits still
    Stationary,
    /// Bobs up and down
    PatrolY,
    /// Bobs up and down, quickly
    FastPatrolY,
}

impl MovementKind {
    /// Every kind, in spawn-table order
    pub const ALL: [MovementKind; 4] = [
        MovementKind::PatrolX,
        MovementKind::Stationary,
        MovementKind::PatrolY,
        MovementKind::FastPatrolY,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::PatrolX => "patrol_x",
            MovementKind::Stationary => "stationary",
            MovementKind::PatrolY => "patrol_y",
            MovementKind::FastPatrolY => "fast_patrol_y",
        }
    }

    /// Display colour (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            MovementKind::PatrolX => 0x00ff00,
            MovementKind::Stationary => 0xff0000,
            MovementKind::PatrolY => 0x0000ff,
            MovementKind::FastPatrolY => 0xffff00,
        }
    }

    /// Movement rule and score for this kind under the given tuning
    pub fn movement(&self, tuning: &Tuning) -> (Movement, u32) {
        match self {
            MovementKind::PatrolX => (
                Movement::patrol(Axis::X, &tuning.patrol_x),
                tuning.patrol_x.score,
            ),
            MovementKind::Stationary => (Movement::Stationary, tuning.stationary_score),
            MovementKind::PatrolY => (
                Movement::patrol(Axis::Y, &tuning.patrol_y),
                tuning.patrol_y.score,
            ),
            MovementKind::FastPatrolY => (
                Movement::patrol(Axis::Y, &tuning.fast_patrol_y),
                tuning.fast_patrol_y.score,
            ),
        }
    }
}

/// World axis a patrol runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Per-tick motion rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    Stationary,
    /// Back-and-forth along `axis`, turning around past ±`bound`
    Patrol {
        axis: Axis,
        speed: f32,
        bound: f32,
        /// +1 or -1
        direction: f32,
    },
}

impl Movement {
    fn patrol(axis: Axis, tuning: &PatrolTuning) -> Self {
        Movement::Patrol {
            axis,
            speed: tuning.speed,
            bound: tuning.bound,
            direction: 1.0,
        }
    }

    /// Advance `pos` by one step
    pub fn apply(&mut self, pos: &mut Vec3, dt: f32) {
        let Movement::Patrol {
            axis,
            speed,
            bound,
            direction,
        } = self
        else {
            return;
        };

        let coord = match axis {
            Axis::X => &mut pos.x,
            Axis::Y => &mut pos.y,
        };
        *coord += *speed * *direction * dt;
        // Only turn when heading further out, so an overshoot can't flip-flop
        if coord.abs() > *bound && coord.signum() == direction.signum() {
            *direction = -*direction;
        }
    }
}

/// Lifecycle of a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetState {
    /// Moving and hittable
    Active,
    /// Frozen in place, blowing up
    Exploding { elapsed: f32 },
    /// Explosion finished; waiting to be dropped by the population
    Destroyed,
}

/// A single target in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub kind: MovementKind,
    pub pos: Vec3,
    pub movement: Movement,
    /// Points awarded when this target is hit
    pub score: u32,
    pub state: TargetState,
    /// Seconds from hit to removal
    pub explosion_duration: f32,
}

impl Target {
    pub fn new(id: TargetId, kind: MovementKind, pos: Vec3, tuning: &Tuning) -> Self {
        let (movement, score) = kind.movement(tuning);
        Self {
            id,
            kind,
            pos,
            movement,
            score,
            state: TargetState::Active,
            explosion_duration: tuning.explosion_duration,
        }
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        !matches!(self.state, TargetState::Active)
    }

    /// Start the explosion. Returns false if it was already underway.
    pub fn explode(&mut self) -> bool {
        if self.is_exploding() {
            return false;
        }
        self.state = TargetState::Exploding { elapsed: 0.0 };
        true
    }

    /// Advance one frame. Returns true exactly once: on the frame the
    /// explosion completes.
    pub fn update(&mut self, dt: f32) -> bool {
        match &mut self.state {
            TargetState::Active => {
                self.movement.apply(&mut self.pos, dt);
                false
            }
            TargetState::Exploding { elapsed } => {
                *elapsed += dt;
                if *elapsed >= self.explosion_duration {
                    self.state = TargetState::Destroyed;
                    true
                } else {
                    false
                }
            }
            TargetState::Destroyed => false,
        }
    }

    /// Normalized explosion progress in [0, 1]
    pub fn explosion_progress(&self) -> f32 {
        match self.state {
            TargetState::Active => 0.0,
            TargetState::Exploding { elapsed } => {
                (elapsed / self.explosion_duration).clamp(0.0, 1.0)
            }
            TargetState::Destroyed => 1.0,
        }
    }

    /// Render scale (swells while exploding)
    pub fn scale(&self) -> f32 {
        1.0 + self.explosion_progress() * EXPLOSION_SCALE_GROWTH
    }

    /// Render opacity (fades while exploding)
    pub fn opacity(&self) -> f32 {
        1.0 - self.explosion_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(kind: MovementKind) -> Target {
        Target::new(1, kind, Vec3::new(0.0, 1.0, -2.0), &Tuning::default())
    }

    #[test]
    fn test_kind_table() {
        // (kind, moves x, moves y, score)
        let table = [
            (MovementKind::PatrolX, true, false, 10),
            (MovementKind::Stationary, false, false, 5),
            (MovementKind::PatrolY, false, true, 15),
            (MovementKind::FastPatrolY, false, true, 20),
        ];
        for (kind, moves_x, moves_y, score) in table {
            let mut t = target(kind);
            let start = t.pos;
            t.update(1.0);
            assert_eq!(t.score, score, "{}", kind.as_str());
            assert_eq!(t.pos.x != start.x, moves_x, "{}", kind.as_str());
            assert_eq!(t.pos.y != start.y, moves_y, "{}", kind.as_str());
            assert_eq!(t.pos.z, start.z);
        }
    }

    #[test]
    fn test_fast_patrol_outpaces_patrol() {
        let mut slow = target(MovementKind::PatrolY);
        let mut fast = target(MovementKind::FastPatrolY);
        slow.update(1.0);
        fast.update(1.0);
        assert!(fast.pos.y - 1.0 > slow.pos.y - 1.0);
    }

    #[test]
    fn test_patrol_reverses_at_bound() {
        let mut movement = Movement::Patrol {
            axis: Axis::X,
            speed: 1.0,
            bound: 2.0,
            direction: 1.0,
        };
        let mut pos = Vec3::new(1.5, 0.0, 0.0);
        movement.apply(&mut pos, 1.0);
        assert_eq!(pos.x, 2.5);
        movement.apply(&mut pos, 1.0);
        assert_eq!(pos.x, 1.5);
        for _ in 0..4 {
            movement.apply(&mut pos, 1.0);
        }
        // 0.5, -0.5, -1.5, -2.5 -> turned around again
        assert_eq!(pos.x, -2.5);
        assert!(matches!(movement, Movement::Patrol { direction, .. } if direction > 0.0));
    }

    #[test]
    fn test_explosion_state_machine() {
        let mut t = target(MovementKind::PatrolX);
        assert!(t.explode());
        assert!(!t.explode(), "second explode is a no-op");

        let frozen = t.pos;
        assert!(!t.update(0.2));
        assert_eq!(t.pos, frozen, "exploding targets don't move");
        assert!((t.explosion_progress() - 0.4).abs() < 1e-6);
        assert!((t.scale() - 1.6).abs() < 1e-5);
        assert!((t.opacity() - 0.6).abs() < 1e-5);

        assert!(!t.update(0.2));
        assert!(t.update(0.2), "destroyed once progress reaches 1");
        assert!(!t.update(0.2), "destroyed flag is reported once");
        assert_eq!(t.state, TargetState::Destroyed);
        assert_eq!(t.explosion_progress(), 1.0);
    }

    #[test]
    fn test_active_target_never_reports_destroyed() {
        let mut t = target(MovementKind::Stationary);
        for _ in 0..1000 {
            assert!(!t.update(0.1));
        }
        assert_eq!(t.explosion_progress(), 0.0);
        assert_eq!(t.scale(), 1.0);
    }
}
