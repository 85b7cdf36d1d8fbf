//! Polyhedral shape model.
//!
//! A [`Shape`] owns the node array, the face-index array and the facet
//! array, plus the bulk scalars derived from them (total area, volume,
//! center of figure, inertia tensor). Facets are materialized from the
//! indexed triangles with outward vertex winding supplied by the loader.

pub mod facet;
pub mod visibility;

use crate::geom::triangle::TriangleIndex;
use crate::shape::facet::Facet;
use crate::{Point, Vector};
use anyhow::{Result, anyhow};

/// Options for shape construction.
#[derive(Debug, Clone, Copy)]
pub struct ShapeConfig {
    /// Uniform scale factor applied to the nodes before anything else.
    pub scale: f64,
    /// Whether to run the visibility and view-factor analysis.
    pub find_visible_facets: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            scale: 1.,
            find_visible_facets: true,
        }
    }
}

/// A closed triangulated surface with per-facet thermal state.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Node positions.
    pub vertices: Vec<Point>,
    /// Triangles as node-index triples.
    pub faces: Vec<TriangleIndex>,
    /// Materialized facets, one per face.
    pub facets: Vec<Facet>,
    /// Total surface area.
    pub area: f64,
    /// Enclosed volume (signed tetrahedron sum; positive for outward
    /// winding with consistent orientation).
    pub volume: f64,
    /// Center of figure.
    pub cof: Point,
    /// Inertia tensor of the uniform-density solid about the center of
    /// figure (density 1).
    pub inertia: [[f64; 3]; 3],
    /// Scratch temperature column shared by the per-facet conduction
    /// updates. Sized by the solver, borrowed mutably once per facet.
    pub scratch: Vec<f64>,
}

impl Shape {
    /// Builds a shape from an indexed triangular mesh.
    ///
    /// The vertex winding of every face must be outward for the volume,
    /// center-of-figure and inertia integrals to be meaningful.
    pub fn build(
        vertices: Vec<Point>,
        faces: Vec<TriangleIndex>,
        config: &ShapeConfig,
    ) -> Result<Self> {
        let vertices: Vec<Point> = vertices.iter().map(|p| p.scale(config.scale)).collect();

        let num_nodes = vertices.len();
        let mut facets = Vec::with_capacity(faces.len());
        for ix in &faces {
            if ix.0 >= num_nodes || ix.1 >= num_nodes || ix.2 >= num_nodes {
                return Err(anyhow!(
                    "Face ({}, {}, {}) references a node out of range (num nodes = {num_nodes})",
                    ix.0,
                    ix.1,
                    ix.2
                ));
            }
            facets.push(Facet::new(vertices[ix.0], vertices[ix.1], vertices[ix.2])?);
        }

        if config.find_visible_facets {
            visibility::find_visible_facets(&mut facets);
        }

        let area: f64 = facets.iter().map(|f| f.area).sum();
        let volume: f64 = facets
            .iter()
            .map(|f| signed_tetrahedron_volume(&f.vertices))
            .sum();

        // Volume-weighted mean of the tetrahedron centroids (apex at the
        // origin, centroid at (a + b + c) / 4).
        let mut cof = Vector::new(0., 0., 0.);
        for f in &facets {
            let [a, b, c] = f.vertices;
            let v = signed_tetrahedron_volume(&f.vertices);
            let centroid = Vector::new(
                (a.x + b.x + c.x) / 4.,
                (a.y + b.y + c.y) / 4.,
                (a.z + b.z + c.z) / 4.,
            );
            cof = cof + centroid * v;
        }
        let cof = Point::new(cof.dx / volume, cof.dy / volume, cof.dz / volume);

        let inertia = inertia_tensor(&facets, volume, cof);

        Ok(Self {
            vertices,
            faces,
            facets,
            area,
            volume,
            cof,
            inertia,
            scratch: Vec::new(),
        })
    }

    /// Number of facets.
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }
}

/// Signed volume of the tetrahedron spanned by a triangle and the origin.
fn signed_tetrahedron_volume(vertices: &[Point; 3]) -> f64 {
    let a = Vector::from_a_point(vertices[0]);
    let b = Vector::from_a_point(vertices[1]);
    let c = Vector::from_a_point(vertices[2]);
    a.cross(b).dot(c) / 6.
}

/// Inertia tensor of the uniform-density solid (density 1) about the
/// center of figure.
///
/// Accumulates the second moments `P_ij = ∫ x_i x_j dV` tetrahedron by
/// tetrahedron (apex at the origin) using the closed-form simplex moment
/// formulas, assembles `I_ij = δ_ij tr(P) − P_ij` about the origin, and
/// shifts to the center of figure with the parallel-axis theorem. Signed
/// tetrahedron volumes keep the result correct for non-convex shapes.
fn inertia_tensor(facets: &[Facet], volume: f64, cof: Point) -> [[f64; 3]; 3] {
    let mut p = [[0.; 3]; 3]; // second moments about the origin

    for f in facets {
        let v = signed_tetrahedron_volume(&f.vertices);
        let [a, b, c] = f.vertices;
        let coords = [[a.x, a.y, a.z], [b.x, b.y, b.z], [c.x, c.y, c.z]];

        for i in 0..3 {
            for j in i..3 {
                // ∫ x_i x_j dV over the simplex (0, a, b, c):
                //   V/20 * (Σ_k x_k,i x_k,j + Σ_{k<l} (x_k,i x_l,j + x_l,i x_k,j))
                // which reduces to V/10 * (Σ x² + Σ cross terms) on the diagonal.
                let mut self_terms = 0.;
                let mut cross_terms = 0.;
                for k in 0..3 {
                    self_terms += coords[k][i] * coords[k][j];
                    for l in (k + 1)..3 {
                        cross_terms += coords[k][i] * coords[l][j] + coords[l][i] * coords[k][j];
                    }
                }
                p[i][j] += v / 20. * (2. * self_terms + cross_terms);
            }
        }
    }
    for i in 0..3 {
        for j in 0..i {
            p[i][j] = p[j][i];
        }
    }

    let trace = p[0][0] + p[1][1] + p[2][2];
    let r = [cof.x, cof.y, cof.z];
    let r_sq = r[0] * r[0] + r[1] * r[1] + r[2] * r[2];

    let mut inertia = [[0.; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            let delta = if i == j { 1. } else { 0. };
            let about_origin = delta * trace - p[i][j];
            // Parallel-axis shift from the origin to the center of figure.
            inertia[i][j] = about_origin - volume * (delta * r_sq - r[i] * r[j]);
        }
    }
    inertia
}
