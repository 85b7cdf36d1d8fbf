use crate::thermal::radiance::SIGMA_SB;
use std::f64::consts::PI;

/// Time-stepping scheme for the conduction solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Explicit forward-time centered-space update. Conditionally stable,
    /// requires `lambda < 0.5`.
    #[default]
    Explicit,
    /// Backward-Euler update solved with the Thomas algorithm.
    /// Unconditionally stable.
    Implicit,
}

/// Physical inputs in SI units plus user-chosen step sizes.
#[derive(Debug, Clone, Copy)]
pub struct ThermalConfig {
    /// Bond albedo.
    pub albedo_bond: f64,
    /// Albedo in the thermal band.
    pub albedo_thermal: f64,
    /// Thermal conductivity [W/(m K)].
    pub conductivity: f64,
    /// Bulk density [kg/m³].
    pub density: f64,
    /// Specific heat capacity [J/(kg K)].
    pub specific_heat: f64,
    /// Emissivity.
    pub emissivity: f64,
    /// Rotation period [s].
    pub period: f64,
    /// Simulation start time [s].
    pub t_begin: f64,
    /// Simulation end time [s].
    pub t_end: f64,
    /// Time step [s].
    pub dt: f64,
    /// Depth of the computational column [m].
    pub z_max: f64,
    /// Depth step [m].
    pub dz: f64,
    /// Time-stepping scheme.
    pub scheme: Scheme,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        // Regolith-like material on a slow rotator.
        Self {
            albedo_bond: 0.04,
            albedo_thermal: 0.0,
            conductivity: 0.1,
            density: 1500.,
            specific_heat: 600.,
            emissivity: 0.9,
            period: 8. * 3600.,
            t_begin: 0.,
            t_end: 8. * 3600.,
            dt: 28.8,
            z_max: 0.6,
            dz: 0.02,
            scheme: Scheme::Explicit,
        }
    }
}

/// Derived thermophysical parameters, non-dimensionalized.
///
/// Times are normalized by the rotation period and depths by the thermal
/// skin depth, so the solver only sees the diffusion number
/// `lambda = (1/4π) · dt / dz²`.
#[derive(Debug, Clone, Copy)]
pub struct ThermalParams {
    pub albedo_bond: f64,
    pub albedo_thermal: f64,
    pub conductivity: f64,
    pub density: f64,
    pub specific_heat: f64,
    pub emissivity: f64,
    /// Rotation period [s].
    pub period: f64,
    /// Thermal skin depth `l = sqrt(4π P k / (ρ Cp))` [m].
    pub skin_depth: f64,
    /// Thermal inertia `Γ = sqrt(k ρ Cp)` [J/(m² K s^(1/2))].
    pub thermal_inertia: f64,
    /// Time step, normalized by the period.
    pub dt: f64,
    /// Start time, normalized by the period.
    pub t_begin: f64,
    /// End time, normalized by the period.
    pub t_end: f64,
    /// Number of time-grid points in the closed range `[t_begin, t_end]`.
    pub nt: usize,
    /// Depth step, normalized by the skin depth.
    pub dz: f64,
    /// Column depth, normalized by the skin depth.
    pub z_max: f64,
    /// Number of depth-grid points in the closed range `[0, z_max]`.
    pub nz: usize,
    /// Diffusion number of the explicit scheme.
    pub lambda: f64,
    pub scheme: Scheme,
}

impl ThermalParams {
    /// Derives the non-dimensional parameter set from SI inputs.
    ///
    /// Warns (non-fatally) when `lambda >= 0.5`, where the explicit scheme
    /// is unstable; the parameters are produced regardless and the solver
    /// proceeds.
    pub fn new(config: &ThermalConfig) -> Self {
        let skin_depth = (4. * PI * config.period * config.conductivity
            / (config.density * config.specific_heat))
            .sqrt();
        let thermal_inertia =
            (config.conductivity * config.density * config.specific_heat).sqrt();

        let dt = config.dt / config.period;
        let t_begin = config.t_begin / config.period;
        let t_end = config.t_end / config.period;
        // Closed-range step counts; the small offset guards against a
        // division landing just below a whole number.
        let nt = ((t_end - t_begin) / dt + 1e-9).floor() as usize + 1;

        let dz = config.dz / skin_depth;
        let z_max = config.z_max / skin_depth;
        let nz = (z_max / dz + 1e-9).floor() as usize + 1;

        let lambda = dt / (4. * PI * dz * dz);
        if lambda >= 0.5 {
            eprintln!(
                "Warning: lambda = {lambda:.3} >= 0.5, the explicit scheme is unstable \
                 (decrease dt or increase dz)"
            );
        }

        Self {
            albedo_bond: config.albedo_bond,
            albedo_thermal: config.albedo_thermal,
            conductivity: config.conductivity,
            density: config.density,
            specific_heat: config.specific_heat,
            emissivity: config.emissivity,
            period: config.period,
            skin_depth,
            thermal_inertia,
            dt,
            t_begin,
            t_end,
            nt,
            dz,
            z_max,
            nz,
            lambda,
            scheme: config.scheme,
        }
    }

    /// Conductive coefficient of the surface balance,
    /// `Γ / sqrt(4π P)` [W/(m² K)] per unit of non-dimensional depth.
    pub fn conduction_coefficient(&self) -> f64 {
        self.thermal_inertia / (4. * PI * self.period).sqrt()
    }

    /// Instantaneous radiative-equilibrium subsolar temperature for the
    /// given incident solar flux [W/m²].
    pub fn equilibrium_subsolar_temperature(&self, solar_flux: f64) -> f64 {
        ((1. - self.albedo_bond) * solar_flux / (self.emissivity * SIGMA_SB)).powf(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_quantities() {
        let config = ThermalConfig {
            conductivity: 0.1,
            density: 1500.,
            specific_heat: 600.,
            period: 86400.,
            ..Default::default()
        };
        let params = ThermalParams::new(&config);

        let expected_skin =
            (4. * PI * 86400. * 0.1 / (1500. * 600.)).sqrt();
        let expected_gamma = (0.1_f64 * 1500. * 600.).sqrt();
        assert!((params.skin_depth - expected_skin).abs() < 1e-12);
        assert!((params.thermal_inertia - expected_gamma).abs() < 1e-12);
        assert!((params.thermal_inertia - 300.).abs() < 1e-9);
    }

    #[test]
    fn test_normalization_and_counts() {
        let config = ThermalConfig {
            period: 1000.,
            t_begin: 0.,
            t_end: 2000.,
            dt: 10.,
            ..Default::default()
        };
        let params = ThermalParams::new(&config);

        assert!((params.dt - 0.01).abs() < 1e-15);
        assert!((params.t_begin - 0.).abs() < 1e-15);
        assert!((params.t_end - 2.).abs() < 1e-15);
        // Closed range [0, 2] at step 0.01 has 201 points.
        assert_eq!(params.nt, 201);

        // Depth grid: closed range [0, z_max] at step dz.
        let expected_nz = (params.z_max / params.dz + 1e-9).floor() as usize + 1;
        assert_eq!(params.nz, expected_nz);
    }

    #[test]
    fn test_lambda() {
        let config = ThermalConfig::default();
        let params = ThermalParams::new(&config);
        let expected = params.dt / (4. * PI * params.dz * params.dz);
        assert!((params.lambda - expected).abs() < 1e-15);
        assert!(params.lambda < 0.5, "default config must be stable");
    }

    #[test]
    fn test_unstable_config_still_constructs() {
        // Huge time step: lambda >= 0.5 only warns.
        let config = ThermalConfig {
            dt: 10_000.,
            ..Default::default()
        };
        let params = ThermalParams::new(&config);
        assert!(params.lambda >= 0.5);
    }

    #[test]
    fn test_equilibrium_subsolar_temperature() {
        let config = ThermalConfig {
            albedo_bond: 0.,
            emissivity: 1.,
            ..Default::default()
        };
        let params = ThermalParams::new(&config);
        let t = params.equilibrium_subsolar_temperature(1361.);
        assert!(
            (t - (1361. / SIGMA_SB).powf(0.25)).abs() < 1e-9,
            "t = {t}"
        );
    }
}
