//! Facet-to-facet visibility and view factors.
//!
//! For every facet this module determines which other facets it can see —
//! on the outward side of its plane, front-facing, and not occluded by any
//! nearer facet — and stores the Lambertian point-to-area view factor and
//! the unit direction towards each of them.

use crate::geom::ray::Ray;
use crate::geom::triangle;
use crate::shape::facet::{Facet, VisibleFacet};
use crate::{Point, Vector};
use rayon::prelude::*;
use std::f64::consts::PI;

/// Checks if the target facet's front side faces the observer point.
pub fn is_facing(obs: Point, target: &Facet) -> bool {
    (target.center - obs).dot(target.normal) < 0.
}

/// Fills the visibility list of every facet.
///
/// Observers are independent, so the per-observer analysis runs in
/// parallel over a shared read-only view of the facet array.
pub fn find_visible_facets(facets: &mut [Facet]) {
    let lists: Vec<Vec<VisibleFacet>> = {
        let shared = &*facets;
        (0..shared.len())
            .into_par_iter()
            .map(|i| visible_from(shared, i))
            .collect()
    };
    for (facet, list) in facets.iter_mut().zip(lists) {
        facet.visible = list;
    }
}

/// Visibility list for a single observer facet.
fn visible_from(facets: &[Facet], observer: usize) -> Vec<VisibleFacet> {
    let obs = &facets[observer];
    let [a, b, c] = obs.vertices;

    // Candidates: outward half-space and front-facing. A facet never sees
    // itself (its center is coplanar with its own plane).
    let candidates: Vec<usize> = (0..facets.len())
        .filter(|&i| {
            i != observer
                && triangle::is_above(a, b, c, facets[i].center)
                && is_facing(obs.center, &facets[i])
        })
        .collect();

    // Occlusion pruning in two passes: gather occlusion events over all
    // ordered candidate pairs, then apply the removals. For every pair the
    // ray towards one candidate's center is tested against the other; on a
    // hit the farther of the two is dropped.
    let mut occluded = vec![false; candidates.len()];
    for (ci, &i) in candidates.iter().enumerate() {
        let ray = Ray::towards(obs.center, facets[i].center);
        let dist_i = ray.direction.length();
        for (cj, &j) in candidates.iter().enumerate() {
            if ci == cj {
                continue;
            }
            let [ta, tb, tc] = facets[j].vertices;
            if ray.intersects(ta, tb, tc) {
                let dist_j = (facets[j].center - obs.center).length();
                if dist_i <= dist_j {
                    occluded[cj] = true;
                } else {
                    occluded[ci] = true;
                }
            }
        }
    }

    let mut visible = Vec::new();
    for (ci, &i) in candidates.iter().enumerate() {
        if occluded[ci] {
            continue;
        }
        let target = &facets[i];
        let d = target.center - obs.center;
        let dist_sq = d.dot(d);
        let Some(direction) = d.normalize() else {
            continue;
        };
        let cos_obs = obs.normal.dot(direction);
        let cos_target = target.normal.dot(-direction);
        let view_factor = cos_obs * cos_target / (PI * dist_sq) * target.area;
        visible.push(VisibleFacet {
            index: i,
            view_factor,
            direction,
        });
    }
    visible
}

/// Checks if direct sunlight reaches the observer facet.
///
/// The sun is at infinity, so only facets already known to be visible from
/// the observer can shadow it; the ray towards the sun is tested against
/// the observer's visibility list only.
pub fn is_illuminated(facets: &[Facet], observer: usize, sun_direction: Vector) -> bool {
    let obs = &facets[observer];
    if obs.normal.dot(sun_direction) < 0. {
        return false;
    }
    let ray = Ray::new(obs.center, sun_direction);
    for vf in &obs.visible {
        let [a, b, c] = facets[vf.index].vertices;
        if ray.intersects(a, b, c) {
            return false;
        }
    }
    true
}
