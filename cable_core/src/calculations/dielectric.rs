//! # Dielectric Calculation
//!
//! Electric stress on an impurity inside the insulation, cable capacitance
//! and dielectric losses for one cable run.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::cable::CableSpecification;
//! use cable_core::calculations::dielectric::{calculate, DielectricInput};
//! use cable_core::tables::ReferenceTables;
//!
//! let tables = ReferenceTables::builtin().unwrap();
//! let cable = CableSpecification::parse("XLPE", "copper", "300", "0", 15_000.0).unwrap();
//! let input = DielectricInput::new("Run 1", 0.8, 1000.0, "Air");
//!
//! let result = calculate(&cable, tables, &input).unwrap();
//! assert!((result.potential_gradient - 3804.25).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::CableAnalysis;
use crate::cable::CableSpecification;
use crate::errors::{CalcError, CalcResult};
use crate::tables::TableRepository;

/// Input parameters for a dielectric calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Run 1",
///   "inner_shield_mm": 0.8,
///   "length_m": 1000.0,
///   "impurity": "Air"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DielectricInput {
    /// User label for this run
    pub label: String,

    /// Inner semiconducting shield thickness Ebi (mm)
    pub inner_shield_mm: f64,

    /// Cable run length for the total loss
    pub length_m: f64,

    /// Insulation-table material trapped in the insulation
    pub impurity: String,
}

impl DielectricInput {
    pub fn new(label: impl Into<String>, inner_shield_mm: f64, length_m: f64, impurity: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inner_shield_mm,
            length_m,
            impurity: impurity.into(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.inner_shield_mm.is_finite() || self.inner_shield_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "inner_shield_mm",
                self.inner_shield_mm.to_string(),
                "Inner shield thickness cannot be negative",
            ));
        }
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_m",
                self.length_m.to_string(),
                "Length must be positive",
            ));
        }
        if self.impurity.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "impurity",
                &self.impurity,
                "Impurity material is required",
            ));
        }
        Ok(())
    }
}

/// Results from a dielectric calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DielectricResult {
    pub label: String,

    /// Vf (V)
    pub phase_voltage_v: f64,

    /// Dc (mm)
    pub conductor_diameter_mm: f64,

    /// Rc (mm)
    pub conductor_radius_mm: f64,

    /// A (mm)
    pub insulation_thickness_mm: f64,

    /// B (mm)
    pub distance_b_mm: f64,

    /// εis
    pub insulation_permittivity: f64,

    /// εimp
    pub impurity_permittivity: f64,

    /// tg δ
    pub loss_tangent: f64,

    /// Vb at distance B
    pub potential_gradient: f64,

    /// Dsi (mm)
    pub diameter_over_insulation_mm: f64,

    /// C (µF/km)
    pub capacitance_uf_km: f64,

    /// Pd per unit length
    pub dielectric_loss: f64,

    /// Pdt = Pd × length
    pub total_dielectric_loss: f64,
}

/// Calculate dielectric stress, capacitance and losses.
///
/// # Returns
///
/// * `Ok(DielectricResult)` - Calculation results
/// * `Err(CalcError)` - Invalid input, unknown impurity, or a formula domain
///   failure
pub fn calculate<T: TableRepository + ?Sized>(
    cable: &CableSpecification,
    tables: &T,
    input: &DielectricInput,
) -> CalcResult<DielectricResult> {
    input.validate()?;

    let analysis = CableAnalysis::new(cable, tables);
    let geometry = analysis.geometry()?;

    let potential_gradient = analysis.potential_gradient(&input.impurity)?;
    let capacitance = analysis.capacitance(input.inner_shield_mm)?;
    let dielectric_loss = analysis.dielectric_loss(capacitance)?;
    let total_dielectric_loss = analysis.total_dielectric_loss(dielectric_loss, input.length_m);

    debug!(
        label = %input.label,
        cable = %cable,
        impurity = %input.impurity,
        capacitance,
        dielectric_loss,
        "dielectric calculation complete"
    );

    Ok(DielectricResult {
        label: input.label.clone(),
        phase_voltage_v: cable.phase_voltage().0,
        conductor_diameter_mm: geometry.conductor_diameter_mm,
        conductor_radius_mm: geometry.conductor_radius_mm(),
        insulation_thickness_mm: geometry.insulation_thickness_mm,
        distance_b_mm: geometry.distance_b_mm(),
        insulation_permittivity: analysis.insulation_dielectric_constant()?,
        impurity_permittivity: analysis.impurity_dielectric_constant(&input.impurity)?,
        loss_tangent: analysis.loss_tangent()?,
        potential_gradient,
        diameter_over_insulation_mm: analysis.diameter_over_insulation(input.inner_shield_mm)?,
        capacitance_uf_km: capacitance,
        dielectric_loss,
        total_dielectric_loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    fn cable(line_voltage: f64) -> CableSpecification {
        CableSpecification::parse("XLPE", "copper", "300", "0", line_voltage).unwrap()
    }

    #[test]
    fn test_xlpe_300_air_void() {
        let tables = ReferenceTables::builtin().unwrap();
        let input = DielectricInput::new("D-1", 0.8, 1000.0, "Air");
        let r = calculate(&cable(15_000.0), tables, &input).unwrap();

        assert!((r.phase_voltage_v - 8660.254).abs() < 1e-3);
        assert_eq!(r.conductor_radius_mm, 10.2);
        assert_eq!(r.distance_b_mm, 2.25);
        assert_eq!(r.impurity_permittivity, 1.0);
        assert!((r.potential_gradient - 3804.252).abs() < 0.01);
        assert!((r.diameter_over_insulation_mm - 31.0).abs() < 1e-9);
        assert!((r.capacitance_uf_km - 0.372888).abs() < 1e-5);
        assert!((r.total_dielectric_loss - 1000.0 * r.dielectric_loss).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_scales_with_line_voltage() {
        let tables = ReferenceTables::builtin().unwrap();
        let input = DielectricInput::new("D-2", 0.8, 1.0, "Air");
        let low = calculate(&cable(15_000.0), tables, &input).unwrap();
        let high = calculate(&cable(30_000.0), tables, &input).unwrap();

        assert!((high.potential_gradient - 2.0 * low.potential_gradient).abs() < 1e-9);
        assert_eq!(high.capacitance_uf_km, low.capacitance_uf_km);
    }

    #[test]
    fn test_epr_has_higher_loss_than_xlpe() {
        let tables = ReferenceTables::builtin().unwrap();
        let input = DielectricInput::new("D-3", 0.8, 1.0, "Air");
        let xlpe = calculate(&cable(15_000.0), tables, &input).unwrap();
        let epr_cable = CableSpecification::parse("EPR", "copper", "300", "0", 15_000.0).unwrap();
        let epr = calculate(&epr_cable, tables, &input).unwrap();

        assert!(epr.dielectric_loss > xlpe.dielectric_loss);
    }

    #[test]
    fn test_validation() {
        assert!(DielectricInput::new("D", 0.8, 0.0, "Air").validate().is_err());
        assert!(DielectricInput::new("D", -0.1, 10.0, "Air").validate().is_err());
        assert!(DielectricInput::new("D", 0.8, 10.0, " ").validate().is_err());
        assert!(DielectricInput::new("D", 0.0, 10.0, "Air").validate().is_ok());
    }
}
