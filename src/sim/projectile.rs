//! Live projectiles: integration and range culling

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable handle for a projectile
pub type ProjectileId = u32;

/// A point projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub pos: Vec3,
    /// Units per second
    pub vel: Vec3,
    /// Where it left the muzzle; range is measured from here
    pub origin: Vec3,
}

impl Projectile {
    #[inline]
    pub fn distance_traveled(&self) -> f32 {
        self.pos.distance(self.origin)
    }
}

/// Anything a weapon can emit projectiles into
pub trait ProjectileSink {
    fn emit(&mut self, pos: Vec3, vel: Vec3) -> ProjectileId;
}

/// Owns every projectile in flight, in firing order
#[derive(Debug, Clone)]
pub struct ProjectileSet {
    projectiles: Vec<Projectile>,
    max_range: f32,
    next_id: ProjectileId,
}

impl ProjectileSet {
    pub fn new(max_range: f32) -> Self {
        Self {
            projectiles: Vec::new(),
            max_range,
            next_id: 1,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Move everything by `vel * dt` and drop projectiles past max range.
    /// Returns how many were culled.
    pub fn update(&mut self, dt: f32) -> usize {
        let before = self.projectiles.len();
        let max_range = self.max_range;
        self.projectiles.retain_mut(|p| {
            p.pos += p.vel * dt;
            p.distance_traveled() <= max_range
        });
        before - self.projectiles.len()
    }

    /// Remove a single projectile; false if it was already gone
    pub fn remove(&mut self, id: ProjectileId) -> bool {
        match self.projectiles.iter().position(|p| p.id == id) {
            Some(index) => {
                self.projectiles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every listed projectile in one pass; unknown ids are ignored
    pub fn remove_many(&mut self, ids: &[ProjectileId]) {
        if ids.is_empty() {
            return;
        }
        self.projectiles.retain(|p| !ids.contains(&p.id));
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

impl ProjectileSink for ProjectileSet {
    fn emit(&mut self, pos: Vec3, vel: Vec3) -> ProjectileId {
        let id = self.next_id;
        self.next_id += 1;
        self.projectiles.push(Projectile {
            id,
            pos,
            vel,
            origin: pos,
        });
        id
    }
}
