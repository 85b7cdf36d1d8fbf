//! One-dimensional subsurface conduction solver.
//!
//! Every facet owns a temperature column over the depth grid
//! `0, dz, 2*dz, ...` (non-dimensional, in skin depths). One call to
//! [`update_temperatures`] advances every column by one time step:
//! an explicit FTCS update of the interior, a Newton solve of the
//! nonlinear radiative balance at the surface node, and a zero-gradient
//! (insulating) deep boundary.

use crate::Shape;
use crate::shape::facet::FluxBundle;
use crate::thermal::params::{Scheme, ThermalParams};
use crate::thermal::radiance::SIGMA_SB;

const NEWTON_MAX_ITER: usize = 20;
const NEWTON_ABS_TOL: f64 = 1e-6;
const NEWTON_REL_TOL: f64 = 1e-10;

/// Flux absorbed by a facet, composed from its current flux bundle:
/// `(1 - A_B) * (sun + scat) + (1 - A_TH) * rad` [W/m²].
pub fn absorbed_flux(params: &ThermalParams, flux: &FluxBundle) -> f64 {
    (1. - params.albedo_bond) * (flux.sun + flux.scat)
        + (1. - params.albedo_thermal) * flux.rad
}

/// Radiative-equilibrium temperature for an absorbed flux,
/// `(F / (ε σ))^(1/4)` [K].
pub fn equilibrium_temperature(absorbed: f64, emissivity: f64) -> f64 {
    (absorbed / (emissivity * SIGMA_SB)).powf(0.25)
}

/// Sizes every facet's temperature column and the shared scratch column to
/// `params.nz` and seeds a uniform profile. Must be called once before
/// stepping; the solver itself allocates nothing per tick.
pub fn init_temperatures(shape: &mut Shape, params: &ThermalParams, t_init: f64) {
    for facet in shape.facets.iter_mut() {
        facet.temperatures = vec![t_init; params.nz];
    }
    shape.scratch = vec![t_init; params.nz];
}

/// Advances every facet's temperature column by one time step.
///
/// The flux bundle of each facet must be current: within one tick the
/// flux write for a facet has to complete before this call.
pub fn update_temperatures(shape: &mut Shape, params: &ThermalParams) {
    let Shape {
        facets, scratch, ..
    } = shape;
    for facet in facets.iter_mut() {
        let absorbed = absorbed_flux(params, &facet.flux);
        match params.scheme {
            Scheme::Explicit => {
                step_explicit(&mut facet.temperatures, scratch, params, absorbed)
            }
            Scheme::Implicit => step_implicit(&mut facet.temperatures, params, absorbed),
        }
    }
}

/// Explicit FTCS update of the interior nodes:
/// `next[i] = (1 - 2λ) cur[i] + λ (cur[i+1] + cur[i-1])`
/// for `1 <= i <= n-2`. Boundary nodes are left untouched.
pub fn conduct_interior(current: &[f64], next: &mut [f64], lambda: f64) {
    if current.len() < 3 {
        return;
    }
    for i in 1..current.len() - 1 {
        next[i] = (1. - 2. * lambda) * current[i] + lambda * (current[i + 1] + current[i - 1]);
    }
}

/// Residual of the surface energy balance [W/m²]:
/// absorbed flux plus conduction into the surface minus thermal emission.
pub fn surface_energy_balance(
    params: &ThermalParams,
    t_surface: f64,
    t_below: f64,
    absorbed: f64,
) -> f64 {
    absorbed + params.conduction_coefficient() * (t_below - t_surface) / params.dz
        - params.emissivity * SIGMA_SB * t_surface.powi(4)
}

/// One explicit time step of a single column.
fn step_explicit(temps: &mut [f64], scratch: &mut [f64], params: &ThermalParams, absorbed: f64) {
    let nz = temps.len();
    if nz < 3 {
        return;
    }
    conduct_interior(temps, scratch, params.lambda);
    scratch[0] = newton_surface(params, absorbed, scratch[1], temps[0]);
    scratch[nz - 1] = scratch[nz - 2];
    temps.copy_from_slice(&scratch[..nz]);
}

/// Newton iteration of the nonlinear surface balance.
///
/// Starts from the surface temperature of the previous step and leaves the
/// best iterate after [`NEWTON_MAX_ITER`] iterations; non-convergence is
/// not an error.
fn newton_surface(params: &ThermalParams, absorbed: f64, t_below: f64, guess: f64) -> f64 {
    let conduction = params.conduction_coefficient();
    let emission = params.emissivity * SIGMA_SB;
    let mut t = guess;
    for _ in 0..NEWTON_MAX_ITER {
        let residual = absorbed + conduction * (t_below - t) / params.dz - emission * t.powi(4);
        let slope = -conduction / params.dz - 4. * emission * t.powi(3);
        let next = t - residual / slope;
        let converged = (next - t).abs() < NEWTON_ABS_TOL + NEWTON_REL_TOL * next.abs();
        t = next;
        if converged {
            break;
        }
    }
    t
}

/// One backward-Euler time step of a single column.
///
/// The interior and deep nodes form a tridiagonal system solved with the
/// Thomas algorithm; the surface node is relaxed against it with the same
/// Newton balance as the explicit scheme until the surface temperature
/// settles.
fn step_implicit(temps: &mut [f64], params: &ThermalParams, absorbed: f64) {
    let nz = temps.len();
    if nz < 3 {
        return;
    }
    let unknowns = nz - 1; // nodes 1..nz-1; the surface node is Newton's
    let lambda = params.lambda;

    let mut t_surface = temps[0];
    let mut solution = vec![0.; unknowns];
    for _ in 0..NEWTON_MAX_ITER {
        let mut a = vec![0.; unknowns];
        let mut b = vec![0.; unknowns];
        let mut c = vec![0.; unknowns];
        let mut d = vec![0.; unknowns];
        for row in 0..unknowns {
            let i = row + 1;
            if i == nz - 1 {
                // Insulating deep boundary: T[nz-1] = T[nz-2]
                a[row] = -1.;
                b[row] = 1.;
            } else {
                a[row] = -lambda;
                b[row] = 1. + 2. * lambda;
                c[row] = -lambda;
                d[row] = temps[i];
                if i == 1 {
                    a[row] = 0.;
                    d[row] += lambda * t_surface;
                }
            }
        }
        thomas_solve(&a, &mut b, &c, &mut d);
        solution.copy_from_slice(&d);

        let next = newton_surface(params, absorbed, solution[0], t_surface);
        let converged =
            (next - t_surface).abs() < NEWTON_ABS_TOL + NEWTON_REL_TOL * next.abs();
        t_surface = next;
        if converged {
            break;
        }
    }

    temps[0] = t_surface;
    temps[1..].copy_from_slice(&solution);
}

/// Thomas algorithm for solving a tridiagonal system.
///
/// On entry:
/// - `a[i]` is the sub-diagonal (a[0] unused)
/// - `b[i]` is the diagonal
/// - `c[i]` is the super-diagonal (c[n-1] unused)
/// - `d[i]` is the RHS
///
/// On exit `d` contains the solution.
fn thomas_solve(a: &[f64], b: &mut [f64], c: &[f64], d: &mut [f64]) {
    let n = b.len();
    if n == 0 {
        return;
    }

    // Forward sweep
    for i in 1..n {
        if b[i - 1].abs() < 1e-30 {
            continue;
        }
        let w = a[i] / b[i - 1];
        b[i] -= w * c[i - 1];
        d[i] -= w * d[i - 1];
    }

    // Back substitution
    d[n - 1] /= b[n - 1];
    for i in (0..n - 1).rev() {
        d[i] = (d[i] - c[i] * d[i + 1]) / b[i];
    }
}
