//! Triangle primitives.
//!
//! Centroid, normal, area, orientation predicates and the solid angle
//! subtended by a triangle, shared by the shape-model pipeline and the
//! visibility analysis.

use crate::Point;
use crate::Vector;
use serde::{Deserialize, Serialize};

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// Returns the centroid `(a + b + c) / 3`.
pub fn centroid(a: Point, b: Point, c: Point) -> Point {
    Point::new(
        (a.x + b.x + c.x) / 3.,
        (a.y + b.y + c.y) / 3.,
        (a.z + b.z + c.z) / 3.,
    )
}

/// Unit normal of the triangle `(a, b, c)` following the vertex winding.
///
/// Returns None for collinear vertices. The normal is not flipped by any
/// global check; outward orientation is a property of the winding supplied
/// by the caller.
pub fn normal(a: Point, b: Point, c: Point) -> Option<Vector> {
    (b - a).cross(c - b).normalize()
}

/// Area of the triangle `(a, b, c)`.
pub fn area(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - b).length() / 2.
}

/// Checks if point `d` lies on the front side of the plane through
/// `(a, b, c)`, i.e. the side the winding normal points into.
///
/// Computed as the sign of `det[a - d; b - d; c - d]`; the point is above
/// when the determinant is negative. Coplanar points are neither above nor
/// below.
pub fn is_above(a: Point, b: Point, c: Point, d: Point) -> bool {
    (a - d).dot((b - d).cross(c - d)) < 0.
}

/// Strict opposite of [`is_above`]: `d` lies behind the plane.
pub fn is_below(a: Point, b: Point, c: Point, d: Point) -> bool {
    (a - d).dot((b - d).cross(c - d)) > 0.
}

/// Angle between two vectors in radians.
///
/// Callers must ensure both vectors have nonzero length.
pub fn angle(v1: Vector, v2: Vector) -> f64 {
    let cos = (v1.dot(v2) / (v1.length() * v2.length())).clamp(-1., 1.);
    cos.acos()
}

/// Solid angle subtended by the triangle `(a, b, c)` seen from `obs`.
///
/// Uses L'Huilier's theorem on the spherical triangle spanned by the three
/// vertex directions.
pub fn solid_angle(a: Point, b: Point, c: Point, obs: Point) -> f64 {
    let va = a - obs;
    let vb = b - obs;
    let vc = c - obs;

    // Side angles of the spherical triangle
    let sa = angle(vb, vc);
    let sb = angle(vc, va);
    let sc = angle(va, vb);

    let s = (sa + sb + sc) / 2.;
    let tan_prod =
        (s / 2.).tan() * ((s - sa) / 2.).tan() * ((s - sb) / 2.).tan() * ((s - sc) / 2.).tan();
    4. * tan_prod.max(0.).sqrt().atan()
}
