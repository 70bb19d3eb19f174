//! # Dielectric Equations
//!
//! Electric stress, capacitance and dielectric losses of a shielded
//! single-core cable.
//!
//! ```text
//! Dc            conductor diameter
//! Dc + 2Ebi     over the inner semiconducting shield
//! Dsi           over the insulation = Dc + 2A + 2Ebi
//! ```

use super::{ln_checked, nonzero};
use crate::errors::CalcResult;

/// Potential gradient at distance B inside the insulation, used to assess
/// the stress on a void or contaminant of permittivity `eps_impurity`.
///
/// # Formula
/// ```text
/// Vb = 0.869 × (εis / εimp) × Vf / ((B + Rc) × ln((Rc + A) / Rc))
/// ```
///
/// # Arguments
/// * `eps_insulation` - Permittivity of the insulation εis
/// * `eps_impurity` - Permittivity of the impurity εimp
/// * `phase_voltage` - Phase-to-neutral voltage Vf (V)
/// * `distance_b` - Distance B from the conductor surface (mm)
/// * `conductor_radius` - Conductor radius Rc (mm)
/// * `insulation_thickness` - Insulation thickness A (mm)
pub fn potential_gradient(
    eps_insulation: f64,
    eps_impurity: f64,
    phase_voltage: f64,
    distance_b: f64,
    conductor_radius: f64,
    insulation_thickness: f64,
) -> CalcResult<f64> {
    const FORMULA: &str = "potential_gradient";

    let eps_impurity = nonzero(FORMULA, "eps_impurity", eps_impurity)?;
    let rc = nonzero(FORMULA, "Rc", conductor_radius)?;
    let log_term = ln_checked(FORMULA, "(Rc+A)/Rc", (rc + insulation_thickness) / rc)?;
    let denominator = nonzero(FORMULA, "(B+Rc)·ln((Rc+A)/Rc)", (distance_b + rc) * log_term)?;

    Ok(0.869 * (eps_insulation / eps_impurity) * phase_voltage / denominator)
}

/// Diameter over the insulation
///
/// # Formula
/// Dsi = Dc + 2A + 2Ebi
#[inline]
pub fn diameter_over_insulation(conductor_diameter: f64, insulation_thickness: f64, inner_shield: f64) -> f64 {
    conductor_diameter + 2.0 * insulation_thickness + 2.0 * inner_shield
}

/// Cable capacitance (µF/km)
///
/// # Formula
/// ```text
/// C = 0.0556 × εis / ln(Dsi / (Dc + 2Ebi))
/// ```
///
/// A zero insulation thickness makes the log ratio 1 and fails with a
/// domain error.
pub fn capacitance(
    eps_insulation: f64,
    conductor_diameter: f64,
    insulation_thickness: f64,
    inner_shield: f64,
) -> CalcResult<f64> {
    const FORMULA: &str = "capacitance";

    let dsi = diameter_over_insulation(conductor_diameter, insulation_thickness, inner_shield);
    let inner = nonzero(FORMULA, "Dc+2Ebi", conductor_diameter + 2.0 * inner_shield)?;
    let log_term = ln_checked(FORMULA, "Dsi/(Dc+2Ebi)", dsi / inner)?;
    let log_term = nonzero(FORMULA, "ln(Dsi/(Dc+2Ebi))", log_term)?;

    Ok(0.0556 * eps_insulation / log_term)
}

/// Dielectric loss per unit length
///
/// # Formula
/// Pd = 0.3769 × C × Vf² × tg δ
#[inline]
pub fn dielectric_loss(capacitance: f64, phase_voltage: f64, loss_tangent: f64) -> f64 {
    0.3769 * capacitance * phase_voltage * phase_voltage * loss_tangent
}

/// Dielectric loss over a cable run
///
/// # Formula
/// Pdt = Pd × length
#[inline]
pub fn total_dielectric_loss(loss_per_length: f64, length: f64) -> f64 {
    loss_per_length * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    const PHASE_15KV: f64 = 8660.254037844386;

    #[test]
    fn test_potential_gradient_air_void() {
        // XLPE 300 mm², 8.7/15 kV: Rc = 10.2, A = 4.5, B = 2.25
        let vb = potential_gradient(2.3, 1.0, PHASE_15KV, 2.25, 10.2, 4.5).unwrap();
        assert!((vb - 3804.252).abs() < 0.01);
    }

    #[test]
    fn test_potential_gradient_linear_in_voltage() {
        let v1 = potential_gradient(2.3, 1.0, PHASE_15KV, 2.25, 10.2, 4.5).unwrap();
        let v2 = potential_gradient(2.3, 1.0, 2.0 * PHASE_15KV, 2.25, 10.2, 4.5).unwrap();
        assert!((v2 - 2.0 * v1).abs() < 1e-9);
    }

    #[test]
    fn test_potential_gradient_zero_thickness() {
        let err = potential_gradient(2.3, 1.0, PHASE_15KV, 0.0, 10.2, 0.0).unwrap_err();
        assert!(matches!(err, CalcError::DomainError { .. }));
    }

    #[test]
    fn test_capacitance() {
        // Dsi = 20.4 + 9.0 + 1.6 = 31.0
        assert!((diameter_over_insulation(20.4, 4.5, 0.8) - 31.0).abs() < 1e-12);
        let c = capacitance(2.3, 20.4, 4.5, 0.8).unwrap();
        assert!((c - 0.372888).abs() < 1e-5);
    }

    #[test]
    fn test_capacitance_ordering_with_inner_shield() {
        // Thicker inner shield narrows the log ratio, raising C
        let thin = capacitance(2.3, 20.4, 4.5, 0.8).unwrap();
        let thick = capacitance(2.3, 20.4, 4.5, 1.5).unwrap();
        assert!(thick > thin);
        assert!((thick - 0.392966).abs() < 1e-5);
    }

    #[test]
    fn test_capacitance_zero_insulation() {
        let err = capacitance(2.3, 20.4, 0.0, 0.8).unwrap_err();
        assert!(matches!(err, CalcError::DomainError { ref formula, .. } if formula == "capacitance"));
    }

    #[test]
    fn test_dielectric_loss() {
        let pd = dielectric_loss(0.3728880514421591, PHASE_15KV, 0.001);
        assert!((pd - 10540.613).abs() < 0.01);
        // Quadratic in phase voltage
        let pd2 = dielectric_loss(0.3728880514421591, 2.0 * PHASE_15KV, 0.001);
        assert!((pd2 - 4.0 * pd).abs() < 1e-6);

        assert!((total_dielectric_loss(pd, 250.0) - 250.0 * pd).abs() < 1e-9);
    }
}
