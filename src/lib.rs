pub mod geom;
pub mod shape;
pub mod thermal;
pub mod vecutils;

// Prelude
pub use geom::point::Point;
pub use geom::triangle::TriangleIndex;
pub use geom::vector::Vector;
pub use shape::facet::{Facet, FluxBundle, VisibleFacet};
pub use shape::{Shape, ShapeConfig};
pub use thermal::params::{Scheme, ThermalConfig, ThermalParams};
