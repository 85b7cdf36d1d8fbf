//! Ray casting infrastructure.
//!
//! Provides a Ray struct and the Möller–Trumbore ray/triangle intersection
//! test used by the occlusion and shadowing analysis.

use crate::{Point, Vector};

/// A ray defined by an origin point and a direction vector.
///
/// The direction does not need to be normalized; the intersection parameter
/// is only ever sign-tested.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector
    pub direction: Vector,
}

impl Ray {
    /// Creates a new ray from origin point and direction vector.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray from two points (origin towards target).
    pub fn towards(origin: Point, target: Point) -> Self {
        Self {
            origin,
            direction: target - origin,
        }
    }

    /// Checks if this ray intersects the triangle `(a, b, c)`.
    ///
    /// Möller–Trumbore: solves for the barycentric coordinates `(u, v)` of
    /// the hit point and the ray parameter `t`, and reports a hit when
    /// `0 <= u <= 1`, `0 <= v <= 1`, `u + v <= 1` and `t > 0`.
    pub fn intersects(&self, a: Point, b: Point, c: Point) -> bool {
        let e1 = b - a;
        let e2 = c - a;
        let t = self.origin - a;
        let p = self.direction.cross(e2);
        let q = t.cross(e1);

        let det = p.dot(e1);
        if det.abs() < f64::EPSILON {
            return false; // Ray parallel to the triangle plane
        }

        let u = p.dot(t) / det;
        let v = q.dot(self.direction) / det;
        let t_ray = q.dot(e2) / det;

        (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) && u + v <= 1. && t_ray > 0.
    }
}

/// Casts a ray from the origin in direction `r` against the triangle
/// `(a, b, c)`.
pub fn raycast(a: Point, b: Point, c: Point, r: Vector) -> bool {
    Ray::new(Point::new(0., 0., 0.), r).intersects(a, b, c)
}

/// Casts a ray from the observer point `obs` in direction `r` against the
/// triangle `(a, b, c)`.
pub fn raycast_from(obs: Point, a: Point, b: Point, c: Point, r: Vector) -> bool {
    Ray::new(obs, r).intersects(a, b, c)
}
