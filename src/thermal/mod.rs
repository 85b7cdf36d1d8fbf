//! Subsurface heat conduction.
//!
//! Each facet carries a vertical temperature column driven by its absorbed
//! flux through a nonlinear radiative surface balance:
//!
//! ```text
//! ThermalConfig ──► ThermalParams ──► init_temperatures()
//!                                          │
//!                  flux collaborator ──► update_temperatures()  (per tick)
//! ```
//!
//! Times are normalized by the rotation period and depths by the thermal
//! skin depth, so the solver sees only the non-dimensional step sizes and
//! the diffusion number `lambda`.

pub mod params;
pub mod radiance;
pub mod solver;

pub use self::params::{Scheme, ThermalConfig, ThermalParams};
pub use self::solver::{
    absorbed_flux, equilibrium_temperature, init_temperatures, surface_energy_balance,
    update_temperatures,
};
