//! # Cable Parameter Equations
//!
//! Closed-form formulas for medium-voltage cable design. Every function is a
//! pure transform of its explicit arguments; none reads tables.
//!
//! ## Modules
//!
//! - [`dielectric`] - potential gradient, capacitance, dielectric losses
//! - [`resistance`] - DC/AC conductor resistance, skin and proximity effects
//! - [`sequence`] - positive-sequence reactance, shield resistance/reactance,
//!   multi-point grounding reductions and impedance
//!
//! ## Units
//!
//! - Lengths and diameters: mm
//! - Voltage: V (phase-to-neutral)
//! - Resistance, reactance: mΩ/m
//! - Capacitance: µF/km
//! - Dielectric loss: W/m (total loss in W)
//!
//! ## Failure
//!
//! A zero denominator or a logarithm of a non-positive ratio returns
//! `CalcError::DomainError` naming the formula and the offending input.
//! There is no partial result.

pub mod dielectric;
pub mod resistance;
pub mod sequence;

pub use dielectric::{
    capacitance,
    diameter_over_insulation,
    dielectric_loss,
    potential_gradient,
    total_dielectric_loss,
};

pub use resistance::{
    ac_resistance,
    dc_resistance,
    geometric_mean_distance,
    proximity_effect,
    skin_effect,
};

pub use sequence::{
    effective_reactance,
    effective_resistance,
    grounding_reduction,
    mean_shield_diameter,
    positive_sequence_impedance,
    positive_sequence_reactance,
    shield_reactance,
    shield_resistance,
    GroundingReduction,
};

use crate::errors::{CalcError, CalcResult};

/// Fail unless `value` can be used as a denominator
pub(crate) fn nonzero(formula: &str, name: &str, value: f64) -> CalcResult<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(CalcError::domain(
            formula,
            format!("{} = {} cannot be used as a denominator", name, value),
        ));
    }
    Ok(value)
}

/// Natural log of a strictly positive, finite ratio
pub(crate) fn ln_checked(formula: &str, name: &str, ratio: f64) -> CalcResult<f64> {
    if ratio.is_nan() || ratio <= 0.0 || ratio.is_infinite() {
        return Err(CalcError::domain(
            formula,
            format!("ln({}) undefined for {} = {}", name, name, ratio),
        ));
    }
    Ok(ratio.ln())
}
