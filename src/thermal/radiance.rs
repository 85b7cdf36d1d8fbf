//! Physical constants and the Planck radiation utility.

/// Stefan–Boltzmann constant [W/(m² K⁴)].
pub const SIGMA_SB: f64 = 5.670_374_419e-8;

/// Planck constant [J s].
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Boltzmann constant [J/K].
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Speed of light in vacuum [m/s].
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// Planck spectral radiance `B(λ, T)` [W/(m² m sr)].
///
/// Provided for instrument forward models; the conduction core itself works
/// in a single thermal band and never calls this.
pub fn planck_intensity(wavelength: f64, temperature: f64) -> f64 {
    let hc = PLANCK * SPEED_OF_LIGHT;
    2. * hc * SPEED_OF_LIGHT / wavelength.powi(5)
        / ((hc / (wavelength * BOLTZMANN * temperature)).exp() - 1.)
}

/// Converts wavelength [m] to frequency [Hz].
pub fn wavelength_to_frequency(wavelength: f64) -> f64 {
    SPEED_OF_LIGHT / wavelength
}

/// Converts frequency [Hz] to wavelength [m].
pub fn frequency_to_wavelength(frequency: f64) -> f64 {
    SPEED_OF_LIGHT / frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wavelength_frequency_round_trip() {
        for wavelength in [1e-7, 5.5e-7, 1e-5, 1e-2] {
            let back = frequency_to_wavelength(wavelength_to_frequency(wavelength));
            assert!(
                (back - wavelength).abs() < 1e-15 * wavelength,
                "{wavelength} -> {back}"
            );
        }
    }

    #[test]
    fn test_planck_peak_follows_wien() {
        // Wien's displacement law: the spectral radiance peaks at
        // lambda_max = b / T with b = 2.898e-3 m K.
        let t = 300.;
        let peak = 2.897_771_955e-3 / t;
        let at_peak = planck_intensity(peak, t);
        assert!(at_peak > 0.);
        assert!(planck_intensity(peak * 0.8, t) < at_peak);
        assert!(planck_intensity(peak * 1.2, t) < at_peak);
    }

    #[test]
    fn test_planck_integrates_to_stefan_boltzmann() {
        // pi * ∫ B(λ, T) dλ = σ T⁴. Trapezoid over a wide band.
        let t = 250.;
        let n = 20_000;
        let (lo, hi) = (1e-7, 5e-4);
        let dl = (hi - lo) / n as f64;
        let mut integral = 0.;
        for i in 0..=n {
            let w = lo + i as f64 * dl;
            let weight = if i == 0 || i == n { 0.5 } else { 1.0 };
            integral += weight * planck_intensity(w, t) * dl;
        }
        let total = std::f64::consts::PI * integral;
        let expected = SIGMA_SB * t.powi(4);
        assert!(
            ((total - expected) / expected).abs() < 1e-3,
            "pi * integral = {total}, sigma T^4 = {expected}"
        );
    }
}
