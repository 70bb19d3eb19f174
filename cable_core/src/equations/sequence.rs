//! # Positive-Sequence Impedance
//!
//! Reactance of the circuit and of the metallic shield, the shield
//! resistance, and the corrections that apply when the shield is grounded at
//! more than one point.
//!
//! ## Grounding
//!
//! - **Single point**: no shield current flows, `Zp = Rp + jXp`.
//! - **Multiple points**: induced shield current adds a resistive component
//!   and cancels part of the reactance:
//!
//! ```text
//! ratio = (Rb / Xb)²
//! ΔRb   = Rb / (ratio + 1)      Rf = Rp + ΔRb
//! ΔXb   = Xb / (ratio + 1)      Xf = Xp − ΔXb
//! ΔLb   = M  / (ratio + 1)
//! Zpf   = Rf + jXf
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::{ln_checked, nonzero};
use crate::errors::{CalcError, CalcResult};

/// Positive-sequence reactance (mΩ/m)
///
/// # Formula
/// ```text
/// Xp = 0.0754 × ln(Dmg / (0.779 × Dc / 2))
/// ```
pub fn positive_sequence_reactance(dmg: f64, conductor_diameter: f64) -> CalcResult<f64> {
    const FORMULA: &str = "positive_sequence_reactance";

    let gmr = nonzero(FORMULA, "0.779·Dc/2", 0.779 * conductor_diameter / 2.0)?;
    Ok(0.0754 * ln_checked(FORMULA, "Dmg/(0.779·Dc/2)", dmg / gmr)?)
}

/// Mean diameter of the metallic shield (mm)
///
/// # Formula
/// Dmb = Dc + 2Ei + 2Ebi + 2Ebe + Ebm/2
///
/// # Arguments
/// * `conductor_diameter` - Dc
/// * `insulation` - Insulation thickness Ei
/// * `inner_shield` - Inner semiconducting shield thickness Ebi
/// * `outer_shield` - Outer semiconducting shield thickness Ebe
/// * `metallic_shield` - Metallic shield thickness Ebm
#[inline]
pub fn mean_shield_diameter(
    conductor_diameter: f64,
    insulation: f64,
    inner_shield: f64,
    outer_shield: f64,
    metallic_shield: f64,
) -> f64 {
    conductor_diameter + 2.0 * insulation + 2.0 * inner_shield + 2.0 * outer_shield + metallic_shield / 2.0
}

/// Shield reactance (mΩ/m). The same expression serves single- and
/// multi-point grounding.
///
/// # Formula
/// Xb = 0.0754 × ln(2 × Dmg / Dmb)
pub fn shield_reactance(dmg: f64, dmb: f64) -> CalcResult<f64> {
    const FORMULA: &str = "shield_reactance";

    let dmb = nonzero(FORMULA, "Dmb", dmb)?;
    Ok(0.0754 * ln_checked(FORMULA, "2·Dmg/Dmb", 2.0 * dmg / dmb)?)
}

/// Shield resistance at shield temperature Tb (mΩ/m)
///
/// # Formula
/// Rb = (1 + αb × (Tb − 20)) × 1000 × K4 × ρb / Sb
pub fn shield_resistance(
    temperature_coefficient_20c: f64,
    resistivity_20c: f64,
    shield_section_mm2: f64,
    temperature_c: f64,
    k4: f64,
) -> CalcResult<f64> {
    let sb = nonzero("shield_resistance", "Sb", shield_section_mm2)?;
    Ok((1.0 + temperature_coefficient_20c * (temperature_c - 20.0)) * 1000.0 * k4 * resistivity_20c / sb)
}

/// Corrections caused by shield current under multi-point grounding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundingReduction {
    /// (Rb / Xb)²
    pub ratio: f64,
    /// Resistance added to Rp (mΩ/m)
    pub delta_rb: f64,
    /// Reactance subtracted from Xp (mΩ/m)
    pub delta_xb: f64,
    /// Positive-sequence inductance reduction, in the units of M
    pub delta_lb: f64,
}

/// Multi-point grounding corrections ΔRb, ΔXb, ΔLb
///
/// # Arguments
/// * `rb` - Shield resistance
/// * `xb` - Shield reactance
/// * `mutual_inductance` - Conductor-to-shield mutual inductance M
pub fn grounding_reduction(rb: f64, xb: f64, mutual_inductance: f64) -> CalcResult<GroundingReduction> {
    const FORMULA: &str = "grounding_reduction";

    let xb = nonzero(FORMULA, "Xb", xb)?;
    if rb.is_nan() || rb <= 0.0 {
        return Err(CalcError::domain(
            FORMULA,
            format!("Rb = {} must be a positive shield resistance", rb),
        ));
    }

    let ratio = (rb / xb).powi(2);
    let divisor = ratio + 1.0;

    Ok(GroundingReduction {
        ratio,
        delta_rb: rb / divisor,
        delta_xb: xb / divisor,
        delta_lb: mutual_inductance / divisor,
    })
}

/// Effective resistance under multi-point grounding
///
/// # Formula
/// Rf = Rp + ΔRb
#[inline]
pub fn effective_resistance(rp: f64, delta_rb: f64) -> f64 {
    rp + delta_rb
}

/// Effective reactance under multi-point grounding
///
/// # Formula
/// Xf = Xp − ΔXb
#[inline]
pub fn effective_reactance(xp: f64, delta_xb: f64) -> f64 {
    xp - delta_xb
}

/// Positive-sequence impedance R + jX
#[inline]
pub fn positive_sequence_impedance(resistance: f64, reactance: f64) -> Complex64 {
    Complex64::new(resistance, reactance)
}
