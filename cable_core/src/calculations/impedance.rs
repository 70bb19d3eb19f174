//! # Positive-Sequence Impedance Calculation
//!
//! Runs the full resistance and reactance chain for one cable circuit and
//! keeps every intermediate value for reporting.
//!
//! ## Procedure
//!
//! 1. Dmg from the cable spacing
//! 2. K1, K2, K3 from Table 4.7, then Rcc, Ys, Yp and Rp
//! 3. Xp from Dmg and the tabulated conductor diameter
//! 4. Single-point grounding stops here with `Zp = Rp + jXp`
//! 5. Multi-point grounding adds the shield: Dmb, Sb (Table 4.8), K4, Rb,
//!    Xb, then `Zpf = (Rp + ΔRb) + j(Xp − ΔXb)`
//!
//! ## Example
//!
//! ```rust
//! use cable_core::cable::CableSpecification;
//! use cable_core::calculations::impedance::{calculate, ConductorConditions, ImpedanceInput, Spacing};
//! use cable_core::tables::ReferenceTables;
//!
//! let tables = ReferenceTables::builtin().unwrap();
//! let cable = CableSpecification::parse("XLPE", "copper", "300", "0", 15_000.0).unwrap();
//! let input = ImpedanceInput::single_point(
//!     "Feeder A",
//!     ConductorConditions::compact_single_core(300.0, 90.0),
//!     Spacing::CenterToCenter(100.0),
//! );
//!
//! let result = calculate(&cable, tables, &input).unwrap();
//! assert!(result.shield.is_none());
//! assert!((result.impedance.re - 0.07502).abs() < 1e-4);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::CableAnalysis;
use crate::cable::{CableSpecification, ConductorMaterial};
use crate::correction_factors::{ConductorClass, ConductorFactors};
use crate::equations::{self, GroundingReduction};
use crate::errors::{CalcError, CalcResult};
use crate::tables::TableRepository;
use crate::units::{MilliohmsPerMeter, OhmsPerKilometer};

fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// Operating state and construction of the phase conductor.
///
/// K1, K2 and K3 are not carried here: they are read from the correction
/// factor table for `stranding`, `assembly` and the cable's diameter class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorConditions {
    /// Conductor cross-section S (mm²)
    pub section_mm2: f64,
    /// Conductor temperature Tc (°C)
    pub temperature_c: f64,
    /// Stranding class for K1 and K2
    pub stranding: ConductorClass,
    /// Cable assembly class for K3
    pub assembly: ConductorClass,
}

impl ConductorConditions {
    pub fn new(section_mm2: f64, temperature_c: f64, stranding: ConductorClass, assembly: ConductorClass) -> Self {
        Self {
            section_mm2,
            temperature_c,
            stranding,
            assembly,
        }
    }

    /// Solid or compact conductor in a single-core cable
    pub fn compact_single_core(section_mm2: f64, temperature_c: f64) -> Self {
        Self::new(
            section_mm2,
            temperature_c,
            ConductorClass::SolidOrCompact,
            ConductorClass::SingleCore,
        )
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("section_mm2", self.section_mm2, "Conductor section must be positive")?;
        if !self.temperature_c.is_finite() {
            return Err(CalcError::invalid_input(
                "temperature_c",
                self.temperature_c.to_string(),
                "Conductor temperature must be a finite number",
            ));
        }
        if !matches!(self.stranding, ConductorClass::SolidOrCompact | ConductorClass::NonCompact) {
            return Err(CalcError::invalid_input(
                "stranding",
                self.stranding.display_name(),
                "Stranding must be solid/compact or non-compact",
            ));
        }
        if !matches!(self.assembly, ConductorClass::SingleCore | ConductorClass::MultiCore) {
            return Err(CalcError::invalid_input(
                "assembly",
                self.assembly.display_name(),
                "Assembly must be single-core or multi-core",
            ));
        }
        Ok(())
    }
}

/// Spacing used for the geometric mean distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spacing_mm", rename_all = "snake_case")]
pub enum Spacing {
    /// Center-to-center distance between cables (mm)
    CenterToCenter(f64),
    /// Use the cable's own external diameter, i.e. cables touching
    SelfDiameter,
}

impl Spacing {
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            Spacing::CenterToCenter(d) => require_positive("spacing_mm", *d, "Cable spacing must be positive"),
            Spacing::SelfDiameter => Ok(()),
        }
    }
}

/// Metallic shield description for multi-point grounding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldConditions {
    /// Shield metal (ρb and αb come from the conductor table)
    pub material: ConductorMaterial,
    /// Shield construction for K4 (wire or tape)
    pub construction: ConductorClass,
    /// Shield wire diameter (mm)
    pub wire_diameter_mm: f64,
    /// Rated 1 s fault current (kA); with the wire diameter selects Sb
    pub fault_current_ka: f64,
    /// Shield temperature Tb (°C)
    pub temperature_c: f64,
    /// Insulation thickness Ei (mm)
    pub insulation_mm: f64,
    /// Inner semiconducting shield thickness Ebi (mm)
    pub inner_shield_mm: f64,
    /// Outer semiconducting shield thickness Ebe (mm)
    pub outer_shield_mm: f64,
    /// Metallic shield thickness Ebm (mm)
    pub metallic_shield_mm: f64,
    /// Conductor-to-shield mutual inductance M
    pub mutual_inductance: f64,
}

impl ShieldConditions {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("wire_diameter_mm", self.wire_diameter_mm, "Shield wire diameter must be positive")?;
        require_positive("fault_current_ka", self.fault_current_ka, "Fault current must be positive")?;
        if !self.temperature_c.is_finite() {
            return Err(CalcError::invalid_input(
                "temperature_c",
                self.temperature_c.to_string(),
                "Shield temperature must be a finite number",
            ));
        }
        require_non_negative("insulation_mm", self.insulation_mm, "Thickness cannot be negative")?;
        require_non_negative("inner_shield_mm", self.inner_shield_mm, "Thickness cannot be negative")?;
        require_non_negative("outer_shield_mm", self.outer_shield_mm, "Thickness cannot be negative")?;
        require_non_negative("metallic_shield_mm", self.metallic_shield_mm, "Thickness cannot be negative")?;
        if !self.mutual_inductance.is_finite() {
            return Err(CalcError::invalid_input(
                "mutual_inductance",
                self.mutual_inductance.to_string(),
                "Mutual inductance must be a finite number",
            ));
        }
        Ok(())
    }
}

/// How the metallic shield is bonded to ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "grounding", content = "shield", rename_all = "snake_case")]
pub enum ShieldGrounding {
    /// No circulating shield current
    SinglePoint,
    /// Shield grounded at both ends or more
    MultiPoint(ShieldConditions),
}

/// Input parameters for an impedance calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Feeder A",
///   "conductor": {
///     "section_mm2": 300.0,
///     "temperature_c": 90.0,
///     "stranding": "solid_or_compact",
///     "assembly": "single_core"
///   },
///   "spacing": { "kind": "center_to_center", "spacing_mm": 100.0 },
///   "grounding": { "grounding": "single_point" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpedanceInput {
    /// User label (e.g., "Feeder A")
    pub label: String,
    pub conductor: ConductorConditions,
    pub spacing: Spacing,
    pub grounding: ShieldGrounding,
}

impl ImpedanceInput {
    pub fn single_point(label: impl Into<String>, conductor: ConductorConditions, spacing: Spacing) -> Self {
        Self {
            label: label.into(),
            conductor,
            spacing,
            grounding: ShieldGrounding::SinglePoint,
        }
    }

    pub fn multi_point(
        label: impl Into<String>,
        conductor: ConductorConditions,
        spacing: Spacing,
        shield: ShieldConditions,
    ) -> Self {
        Self {
            label: label.into(),
            conductor,
            spacing,
            grounding: ShieldGrounding::MultiPoint(shield),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.conductor.validate()?;
        self.spacing.validate()?;
        if let ShieldGrounding::MultiPoint(shield) = &self.grounding {
            shield.validate()?;
        }
        Ok(())
    }
}

/// Conductor resistance breakdown (mΩ/m except the dimensionless Ys, Yp)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcResistance {
    /// K1, K2, K3 read from Table 4.7
    pub factors: ConductorFactors,
    /// Rcc
    pub dc_resistance: f64,
    /// Ys
    pub skin_effect: f64,
    /// Yp
    pub proximity_effect: f64,
    /// Rp
    pub ac_resistance: f64,
}

/// Shield quantities of a multi-point grounded circuit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldResult {
    /// Dmb (mm)
    pub mean_diameter_mm: f64,
    /// Sb (mm²)
    pub section_mm2: f64,
    /// K4
    pub k4: f64,
    /// Rb (mΩ/m)
    pub resistance: f64,
    /// Xb (mΩ/m)
    pub reactance: f64,
    /// ΔRb, ΔXb, ΔLb
    pub reduction: GroundingReduction,
}

/// Results from an impedance calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpedanceResult {
    pub label: String,

    /// Geometric mean distance Dmg (mm)
    pub dmg_mm: f64,

    pub conductor: AcResistance,

    /// Xp (mΩ/m)
    pub positive_sequence_reactance: f64,

    /// Present only for multi-point grounding
    pub shield: Option<ShieldResult>,

    /// Rp, or Rf under multi-point grounding (mΩ/m)
    pub resistance: f64,

    /// Xp, or Xf under multi-point grounding (mΩ/m)
    pub reactance: f64,

    /// Positive-sequence impedance (mΩ/m)
    pub impedance: Complex64,
}

impl ImpedanceResult {
    pub fn resistance_ohm_per_km(&self) -> OhmsPerKilometer {
        MilliohmsPerMeter(self.resistance).into()
    }

    pub fn reactance_ohm_per_km(&self) -> OhmsPerKilometer {
        MilliohmsPerMeter(self.reactance).into()
    }

    /// |Z| over a cable run (Ω)
    pub fn impedance_magnitude_ohm(&self, length_m: f64) -> f64 {
        self.impedance.norm() * length_m / 1000.0
    }
}

/// Calculate the positive-sequence impedance of a cable circuit.
///
/// # Returns
///
/// * `Ok(ImpedanceResult)` - All intermediates and the final impedance
/// * `Err(CalcError)` - Invalid input, a missing table entry, or a formula
///   domain failure
pub fn calculate<T: TableRepository + ?Sized>(
    cable: &CableSpecification,
    tables: &T,
    input: &ImpedanceInput,
) -> CalcResult<ImpedanceResult> {
    input.validate()?;

    let analysis = CableAnalysis::new(cable, tables);

    let dmg = analysis.geometric_mean_distance(input.spacing)?;
    let conductor = analysis.resistance_breakdown(&input.conductor, dmg)?;
    let xp = analysis.positive_sequence_reactance(dmg)?;

    let (shield, resistance, reactance) = match &input.grounding {
        ShieldGrounding::SinglePoint => (None, conductor.ac_resistance, xp),
        ShieldGrounding::MultiPoint(conditions) => {
            let shield = analysis.shield_parameters(conditions, dmg)?;
            let rf = equations::effective_resistance(conductor.ac_resistance, shield.reduction.delta_rb);
            let xf = equations::effective_reactance(xp, shield.reduction.delta_xb);
            (Some(shield), rf, xf)
        }
    };

    let impedance = equations::positive_sequence_impedance(resistance, reactance);

    debug!(
        label = %input.label,
        cable = %cable,
        multi_point = shield.is_some(),
        resistance,
        reactance,
        "impedance calculation complete"
    );

    Ok(ImpedanceResult {
        label: input.label.clone(),
        dmg_mm: dmg,
        conductor,
        positive_sequence_reactance: xp,
        shield,
        resistance,
        reactance,
        impedance,
    })
}
