//! # Cable Calculations
//!
//! Report-ready calculation bundles. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Every intermediate and final quantity (JSON-serializable)
//! - `calculate(cable, tables, input) -> CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`dielectric`] - potential gradient, capacitance, dielectric losses
//! - [`impedance`] - AC resistance and positive-sequence impedance for
//!   single- or multi-point shield grounding

pub mod dielectric;
pub mod impedance;

use serde::{Deserialize, Serialize};

use crate::cable::{CableSpecification, InsulationMaterial};
use crate::errors::CalcResult;
use crate::tables::TableRepository;

pub use dielectric::{DielectricInput, DielectricResult};
pub use impedance::{
    ConductorConditions, ImpedanceInput, ImpedanceResult, ShieldConditions, ShieldGrounding, ShieldResult,
    Spacing,
};

/// Rated conductor temperatures of an insulation compound (°C).
///
/// Nothing in the engine applies these implicitly; callers copy the value
/// they want into [`ConductorConditions::temperature_c`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingTemperatures {
    /// Maximum continuous operating temperature
    pub continuous_c: f64,
    /// Maximum emergency overload temperature
    pub emergency_c: f64,
    /// Maximum short-circuit temperature (≤ 5 s)
    pub short_circuit_c: f64,
}

impl OperatingTemperatures {
    /// Rated temperatures for XLPE and EPR insulation
    pub fn rated(insulation: InsulationMaterial) -> Self {
        match insulation {
            InsulationMaterial::Xlpe | InsulationMaterial::Epr => Self {
                continuous_c: 90.0,
                emergency_c: 130.0,
                short_circuit_c: 250.0,
            },
        }
    }
}

/// Enum wrapper for all calculation types, so heterogeneous calculations
/// can be stored and run as one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CableCalculation {
    Dielectric(DielectricInput),
    Impedance(ImpedanceInput),
}

/// Output of a [`CableCalculation`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Dielectric(DielectricResult),
    Impedance(ImpedanceResult),
}

impl CableCalculation {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CableCalculation::Dielectric(d) => &d.label,
            CableCalculation::Impedance(i) => &i.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CableCalculation::Dielectric(_) => "Dielectric",
            CableCalculation::Impedance(_) => "Impedance",
        }
    }

    /// Run against one cable
    pub fn run<T: TableRepository + ?Sized>(
        &self,
        cable: &CableSpecification,
        tables: &T,
    ) -> CalcResult<CalculationOutput> {
        match self {
            CableCalculation::Dielectric(input) => {
                dielectric::calculate(cable, tables, input).map(CalculationOutput::Dielectric)
            }
            CableCalculation::Impedance(input) => {
                impedance::calculate(cable, tables, input).map(CalculationOutput::Impedance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    #[test]
    fn test_rated_temperatures() {
        let t = OperatingTemperatures::rated(InsulationMaterial::Xlpe);
        assert_eq!(t.continuous_c, 90.0);
        assert!(t.short_circuit_c > t.emergency_c);
    }

    #[test]
    fn test_batch_run() {
        let tables = ReferenceTables::builtin().unwrap();
        let cable = CableSpecification::parse("XLPE", "copper", "300", "0", 15_000.0).unwrap();

        let batch = vec![
            CableCalculation::Dielectric(DielectricInput::new("D-1", 0.8, 1000.0, "Air")),
            CableCalculation::Impedance(ImpedanceInput::single_point(
                "Z-1",
                ConductorConditions::compact_single_core(300.0, 90.0),
                Spacing::CenterToCenter(100.0),
            )),
        ];

        assert_eq!(batch[0].calc_type(), "Dielectric");
        assert_eq!(batch[1].label(), "Z-1");

        for calc in &batch {
            let output = calc.run(&cable, tables).unwrap();
            match (calc, output) {
                (CableCalculation::Dielectric(_), CalculationOutput::Dielectric(r)) => {
                    assert!(r.capacitance_uf_km > 0.0)
                }
                (CableCalculation::Impedance(_), CalculationOutput::Impedance(r)) => {
                    assert!(r.impedance.re > 0.0 && r.impedance.im > 0.0)
                }
                _ => panic!("output type does not match input type"),
            }
        }
    }

    #[test]
    fn test_calculation_serialization() {
        let calc = CableCalculation::Dielectric(DielectricInput::new("D-1", 0.8, 500.0, "Water"));
        let json = serde_json::to_string(&calc).unwrap();
        assert!(json.contains("\"type\":\"Dielectric\""));
        let parsed: CableCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.label(), "D-1");
    }
}
