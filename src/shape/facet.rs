use crate::geom::triangle;
use crate::{Point, Vector};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Radiative fluxes absorbed by one facet [W/m²].
///
/// Written by the illumination collaborator between time steps; the
/// conduction solver only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FluxBundle {
    /// Direct solar flux.
    pub sun: f64,
    /// Sunlight scattered from other facets.
    pub scat: f64,
    /// Thermal re-radiation from other facets.
    pub rad: f64,
}

/// One entry of a facet's visibility list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleFacet {
    /// Index of the visible facet in the shape's facet array.
    pub index: usize,
    /// Lambertian point-to-area view factor towards that facet.
    pub view_factor: f64,
    /// Unit vector from this facet's center to that facet's center.
    pub direction: Vector,
}

/// One triangular facet of the shape model.
///
/// Bundles the vertex positions, the cached geometric quantities, the
/// visibility list, the current flux bundle and the depth-resolved
/// temperature column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facet {
    /// Vertex positions, wound so that the normal points outward.
    pub vertices: [Point; 3],
    /// Facet center.
    pub center: Point,
    /// Outward unit normal.
    pub normal: Vector,
    /// Facet area.
    pub area: f64,
    /// Facets visible from this one, with their view factors.
    pub visible: Vec<VisibleFacet>,
    /// Current absorbed-flux bundle [W/m²].
    pub flux: FluxBundle,
    /// Temperatures at depths `0, dz, 2*dz, ...` [K], surface first.
    ///
    /// Sized and seeded by the conduction solver.
    pub temperatures: Vec<f64>,
    /// Photon recoil accumulator (not used by the core).
    pub recoil: Vector,
}

impl Facet {
    /// Creates a facet from three vertices.
    ///
    /// Fails for degenerate triangles (zero area / collinear vertices),
    /// which cannot produce a unit normal.
    pub fn new(a: Point, b: Point, c: Point) -> Result<Self> {
        let normal = triangle::normal(a, b, c)
            .ok_or_else(|| anyhow!("Degenerate facet: ({a}, {b}, {c})"))?;
        Ok(Self {
            vertices: [a, b, c],
            center: triangle::centroid(a, b, c),
            normal,
            area: triangle::area(a, b, c),
            visible: Vec::new(),
            flux: FluxBundle::default(),
            temperatures: Vec::new(),
            recoil: Vector::new(0., 0., 0.),
        })
    }

    /// Current surface temperature [K].
    pub fn surface_temperature(&self) -> f64 {
        self.temperatures.first().copied().unwrap_or(0.)
    }

    /// A facet is above its local horizon when no other facet is visible
    /// from it.
    pub fn is_above_horizon(&self) -> bool {
        self.visible.is_empty()
    }
}
