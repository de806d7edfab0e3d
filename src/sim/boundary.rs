//! Room boundary polygon on the floor plane
//!
//! The XR runtime reports the play area as an ordered ring of floor points.
//! The ring is closed implicitly: the last point connects back to the first.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::consts::MIN_BOUNDARY_AREA;

/// Why a point ring cannot be used as a room boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    #[error("boundary needs at least 3 distinct points, got {0}")]
    TooFewPoints(usize),
    #[error("boundary point {0} is not finite")]
    NonFinite(usize),
    #[error("boundary encloses no area ({0} m²)")]
    ZeroArea(f32),
}

/// A (possibly non-convex) simple polygon in floor coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boundary {
    points: Vec<Vec2>,
    min: Vec2,
    max: Vec2,
}

impl Boundary {
    /// Build a boundary from a point ring.
    ///
    /// A duplicated closing point (first == last) is dropped, as are
    /// consecutive duplicates.
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Result<Self, BoundaryError> {
        let mut ring: Vec<Vec2> = Vec::new();
        for (i, p) in points.into_iter().enumerate() {
            if !p.is_finite() {
                return Err(BoundaryError::NonFinite(i));
            }
            if ring.last() != Some(&p) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(BoundaryError::TooFewPoints(ring.len()));
        }

        let area = signed_area(&ring).abs();
        if area < MIN_BOUNDARY_AREA {
            return Err(BoundaryError::ZeroArea(area));
        }

        let (min, max) = ring.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );

        Ok(Self {
            points: ring,
            min,
            max,
        })
    }

    /// Polygon vertices in ring order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounding_box(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    /// Enclosed area (m²)
    pub fn area(&self) -> f32 {
        signed_area(&self.points).abs()
    }

    /// Even-odd ray cast along +x.
    ///
    /// Each edge (p[i], p[i-1]) toggles the result when it straddles the
    /// point's y and the crossing lies to the right of the point.
    pub fn contains(&self, point: Vec2) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            j = i;

            // Only straddling edges count; their y span is never zero
            if (a.y > point.y) == (b.y > point.y) {
                continue;
            }
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        inside
    }

    /// Uniformly sample a point inside the polygon by rejection from the
    /// bounding box.
    ///
    /// Gives up after `max_attempts` misses and returns the bounding-box
    /// center, so slivers can never stall a frame. The center is not
    /// guaranteed to be inside a non-convex ring.
    pub fn random_point_inside<R: Rng>(&self, rng: &mut R, max_attempts: u32) -> Vec2 {
        let size = self.max - self.min;
        for _ in 0..max_attempts {
            let candidate = self.min + Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * size;
            if self.contains(candidate) {
                return candidate;
            }
        }
        log::warn!(
            "Boundary sampling missed {} times, using bounding-box center",
            max_attempts
        );
        (self.min + self.max) * 0.5
    }
}

/// Shoelace formula; positive for counter-clockwise rings
fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}
