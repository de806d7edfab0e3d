//! Per-frame simulation step
//!
//! Order within a frame: countdown, projectile motion, hit resolution,
//! then target movement / explosions / respawns.

use super::collision::resolve;
use super::state::{ArenaSimulation, GameEvent, GamePhase};
use super::view::Hud;

/// Advance the arena by one frame of `dt` seconds
pub fn tick(sim: &mut ArenaSimulation, dt: f32) -> Hud {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid delta {}", dt);
        return sim.hud();
    }
    if dt == 0.0 {
        return sim.hud();
    }

    sim.clock += dt as f64;

    if sim.phase == GamePhase::Running {
        sim.time_remaining = (sim.time_remaining - dt).max(0.0);
        if sim.time_remaining == 0.0 {
            sim.phase = GamePhase::GameOver;
            log::info!("Time up! Final score: {}", sim.score);
            sim.events.push(GameEvent::GameOver { score: sim.score });
        }
    }

    sim.projectiles.update(dt);

    // No scoring once the clock has run out
    if sim.phase == GamePhase::Running {
        let hits = resolve(
            &mut sim.projectiles,
            sim.population.targets_mut(),
            sim.tuning.collision_radius,
        );
        sim.record_hits(&hits);
    }

    // Explosions keep playing out after game over
    let update = sim.population.update_all(dt, &mut sim.rng);
    sim.events.extend(
        update
            .destroyed
            .into_iter()
            .map(GameEvent::TargetDestroyed)
            .chain(update.escaped.into_iter().map(GameEvent::TargetEscaped))
            .chain(update.spawned.into_iter().map(GameEvent::TargetSpawned)),
    );

    sim.hud()
}

impl ArenaSimulation {
    /// Advance by one frame; see [`tick`]
    pub fn tick(&mut self, dt: f32) -> Hud {
        tick(self, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::target::TargetState;
    use crate::sim::weapon::Pose;
    use crate::tuning::Tuning;
    use glam::{Quat, Vec3};

    const DT: f32 = 1.0 / 60.0;

    /// Arena with motionless targets so positions are predictable
    fn still_arena(seed: u64) -> ArenaSimulation {
        let mut tuning = Tuning::default();
        tuning.patrol_x.speed = 0.0;
        tuning.patrol_y.speed = 0.0;
        tuning.fast_patrol_y.speed = 0.0;
        ArenaSimulation::new(seed, tuning).expect("still tuning is valid")
    }

    /// Place a projectile exactly on the first target
    fn shoot_first_target(sim: &mut ArenaSimulation) -> u32 {
        let target = &sim.population.targets()[0];
        let (pos, score) = (target.pos, target.score);
        sim.on_fire_triggered(Pose::new(pos, Quat::IDENTITY));
        score
    }

    #[test]
    fn test_direct_hit_scores() {
        let mut sim = still_arena(7);
        let score = shoot_first_target(&mut sim);
        let target_id = sim.population.targets()[0].id;

        // Tiny step: the projectile barely moves off the target
        let hud = tick(&mut sim, 1e-4);
        assert_eq!(hud.score, score as u64);
        assert!(sim.projectiles.is_empty());
        assert!(matches!(
            sim.population.get(target_id).map(|t| t.state),
            Some(TargetState::Exploding { .. })
        ));
        assert!(sim
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Hit(h) if h.target == target_id)));
    }

    #[test]
    fn test_hit_target_replaced_after_explosion_and_delay() {
        let mut sim = still_arena(3);
        shoot_first_target(&mut sim);
        tick(&mut sim, 1e-4);
        assert_eq!(sim.population.len(), 5, "exploding target stays until done");

        let mut elapsed = 0.0;
        while elapsed < 0.5 + 1.0 + 0.05 {
            tick(&mut sim, DT);
            assert!(sim.population.len() <= 5);
            elapsed += DT;
        }
        assert_eq!(sim.population.len(), 5);
        assert!(sim.population.targets().iter().all(|t| !t.is_exploding()));
    }

    #[test]
    fn test_timer_counts_down_to_game_over() {
        let mut sim = ArenaSimulation::with_default_tuning(1);
        let mut last = sim.time_remaining();
        let mut saw_game_over = false;
        for _ in 0..(61 * 60) {
            let hud = tick(&mut sim, DT);
            assert!(hud.time_remaining <= last);
            last = hud.time_remaining;
            if hud.game_over {
                assert_eq!(hud.time_remaining, 0.0);
                saw_game_over = true;
            }
        }
        assert!(saw_game_over);
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert_eq!(
            sim.drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_score_frozen_after_game_over() {
        let mut sim = still_arena(2);
        sim.time_remaining = DT / 2.0;
        tick(&mut sim, DT);
        assert!(sim.is_game_over());

        // Plant a projectile on a target directly; firing would restart
        let pos = sim.population.targets()[0].pos;
        use crate::sim::projectile::ProjectileSink;
        sim.projectiles.emit(pos, Vec3::ZERO);

        for _ in 0..120 {
            let hud = tick(&mut sim, DT);
            assert_eq!(hud.score, 0);
            assert_eq!(hud.time_remaining, 0.0);
        }
        assert!(sim.population.targets().iter().all(|t| !t.is_exploding()));
    }

    #[test]
    fn test_explosion_finishes_after_game_over() {
        let mut sim = still_arena(4);
        sim.time_remaining = 0.1;
        shoot_first_target(&mut sim);
        let target_id = sim.population.targets()[0].id;
        tick(&mut sim, 1e-4);

        for _ in 0..60 {
            tick(&mut sim, DT);
        }
        assert!(sim.is_game_over());
        assert!(sim.population.get(target_id).is_none());
    }

    #[test]
    fn test_fire_after_game_over_resets() {
        let mut sim = still_arena(9);
        shoot_first_target(&mut sim);
        tick(&mut sim, 1e-4);
        assert!(sim.score() > 0);

        sim.time_remaining = DT;
        tick(&mut sim, DT);
        assert!(sim.is_game_over());

        sim.on_fire_triggered(Pose::new(Vec3::ZERO, Quat::IDENTITY));
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.time_remaining(), 60.0);
        assert!(sim.projectiles.is_empty(), "restart trigger doesn't shoot");
        assert_eq!(sim.population.len(), 5);
        assert!(sim.population.targets().iter().all(|t| !t.is_exploding()));
    }

    #[test]
    fn test_reset_drops_stale_respawns() {
        let mut sim = still_arena(6);
        let ids: Vec<_> = sim.population.targets().iter().map(|t| t.id).collect();
        for id in ids {
            sim.population.destroy_and_respawn(id);
        }
        sim.reset();
        for _ in 0..120 {
            tick(&mut sim, DT);
            assert!(sim.population.len() <= 5);
        }
        assert_eq!(sim.population.len(), 5);
    }

    #[test]
    fn test_invalid_delta_is_noop() {
        let mut sim = ArenaSimulation::with_default_tuning(1);
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let hud = tick(&mut sim, dt);
            assert_eq!(hud.time_remaining, 60.0);
        }
        assert_eq!(sim.clock(), 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two arenas with the same seed and inputs stay identical
        let mut a = ArenaSimulation::with_default_tuning(99999);
        let mut b = ArenaSimulation::with_default_tuning(99999);
        let pose = Pose::looking_at(Vec3::new(0.0, 1.2, 0.0), Vec3::new(0.0, 1.2, -3.0));

        for frame in 0..600 {
            if frame % 7 == 0 {
                a.on_fire_triggered(pose);
                b.on_fire_triggered(pose);
            }
            if frame == 300 {
                a.on_secondary_triggered();
                b.on_secondary_triggered();
            }
            tick(&mut a, DT);
            tick(&mut b, DT);
        }

        assert_eq!(a.score(), b.score());
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
    }
}
