//! # Conductor Resistance
//!
//! DC resistance at operating temperature, and the AC resistance obtained by
//! adding the skin-effect (Ys) and proximity-effect (Yp) components:
//!
//! ```text
//! Rp = Rcc × (1 + Ys + Yp)
//! ```

use super::nonzero;
use crate::errors::CalcResult;

/// DC resistance at conductor temperature Tc (mΩ/m)
///
/// # Formula
/// ```text
/// Rcc = (1000 × K1 × K2 × K3 × ρ20 / S) × (1 + α20 × (Tc − 20))
/// ```
///
/// # Arguments
/// * `k1`, `k2`, `k3` - Correction factors (Table 4.7)
/// * `resistivity_20c` - ρ20 (Ω·mm²/m)
/// * `temperature_coefficient_20c` - α20 (1/°C)
/// * `temperature_c` - Conductor temperature Tc (°C)
/// * `section_mm2` - Conductor section S (mm²)
pub fn dc_resistance(
    k1: f64,
    k2: f64,
    k3: f64,
    resistivity_20c: f64,
    temperature_coefficient_20c: f64,
    temperature_c: f64,
    section_mm2: f64,
) -> CalcResult<f64> {
    let s = nonzero("dc_resistance", "S", section_mm2)?;
    let r20 = 1000.0 * k1 * k2 * k3 * resistivity_20c / s;
    Ok(r20 * (1.0 + temperature_coefficient_20c * (temperature_c - 20.0)))
}

/// Skin-effect component Ys
///
/// # Formula
/// ```text
/// Fs = 0.15 / Rcc
/// Ys = Fs² / (192 + 0.8 × Fs²)
/// ```
pub fn skin_effect(dc_resistance: f64) -> CalcResult<f64> {
    let rcc = nonzero("skin_effect", "Rcc", dc_resistance)?;
    let fs2 = (0.15 / rcc).powi(2);
    Ok(fs2 / (192.0 + 0.8 * fs2))
}

/// Geometric mean distance between the cables of a circuit
///
/// # Formula
/// Dmg = 1.26 × D   (D = center-to-center spacing, trefoil-to-flat equivalent)
#[inline]
pub fn geometric_mean_distance(spacing: f64) -> f64 {
    1.26 * spacing
}

/// Proximity-effect component Yp
///
/// # Formula
/// ```text
/// Yp = Ys × (Dc/Dmg)² × (1.18 / (0.27 + Ys) + 0.312 × (Dc/Dmg)²)
/// ```
pub fn proximity_effect(skin_effect: f64, conductor_diameter: f64, dmg: f64) -> CalcResult<f64> {
    let dmg = nonzero("proximity_effect", "Dmg", dmg)?;
    let shape = nonzero("proximity_effect", "0.27+Ys", 0.27 + skin_effect)?;
    let ratio2 = (conductor_diameter / dmg).powi(2);
    Ok(skin_effect * ratio2 * (1.18 / shape + 0.312 * ratio2))
}

/// AC resistance at operating temperature (mΩ/m)
///
/// # Formula
/// Rp = Rcc × (1 + Ys + Yp)
#[inline]
pub fn ac_resistance(dc_resistance: f64, skin_effect: f64, proximity_effect: f64) -> f64 {
    dc_resistance * (1.0 + skin_effect + proximity_effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    // Annealed copper, 300 mm², 90 °C
    fn rcc_300() -> f64 {
        dc_resistance(1.0, 1.0, 1.0, 0.017241, 0.00393, 90.0, 300.0).unwrap()
    }

    #[test]
    fn test_dc_resistance() {
        assert!((rcc_300() - 0.073280).abs() < 1e-6);
    }

    #[test]
    fn test_dc_resistance_scales_inverse_with_section() {
        let r300 = rcc_300();
        let r600 = dc_resistance(1.0, 1.0, 1.0, 0.017241, 0.00393, 90.0, 600.0).unwrap();
        assert!((r600 - r300 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_dc_resistance_at_20c_has_no_temperature_term() {
        let r = dc_resistance(1.02, 1.0, 1.0, 0.017241, 0.00393, 20.0, 100.0).unwrap();
        assert!((r - 1000.0 * 1.02 * 0.017241 / 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_dc_resistance_zero_section() {
        let err = dc_resistance(1.0, 1.0, 1.0, 0.017241, 0.00393, 90.0, 0.0).unwrap_err();
        assert!(matches!(err, CalcError::DomainError { ref formula, .. } if formula == "dc_resistance"));
    }

    #[test]
    fn test_skin_effect() {
        let ys = skin_effect(rcc_300()).unwrap();
        assert!((ys - 0.0214483).abs() < 1e-6);
        assert!(skin_effect(0.0).is_err());
    }

    #[test]
    fn test_proximity_effect() {
        let ys = skin_effect(rcc_300()).unwrap();
        let dmg = geometric_mean_distance(100.0);
        assert!((dmg - 126.0).abs() < 1e-12);

        let yp = proximity_effect(ys, 20.4, dmg).unwrap();
        assert!((yp - 0.00228092).abs() < 1e-7);

        // Closer cables, stronger proximity effect
        let yp_close = proximity_effect(ys, 20.4, geometric_mean_distance(38.6)).unwrap();
        assert!(yp_close > yp);
    }

    #[test]
    fn test_ac_resistance() {
        let rcc = rcc_300();
        let ys = skin_effect(rcc).unwrap();
        let yp = proximity_effect(ys, 20.4, 126.0).unwrap();
        let rp = ac_resistance(rcc, ys, yp);
        assert!((rp - 0.0750189).abs() < 1e-6);
        assert!(rp > rcc);
    }
}
