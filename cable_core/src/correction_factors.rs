//! # Resistance Correction Factors (Table 4.7)
//!
//! Empirical factors applied to the DC resistance of a conductor or a
//! metallic shield:
//!
//! ```text
//! Rcc = (1000 × K1 × K2 × K3 × ρ20 / S) × (1 + α20 × (Tc − 20))
//! Rb  = (1 + αb × (Tb − 20)) × 1000 × K4 × ρb / Sb
//! ```
//!
//! | Factor | Accounts for                                | Keyed by                      |
//! |--------|---------------------------------------------|-------------------------------|
//! | K1     | wire diameter / coating                     | construction + diameter class |
//! | K2     | stranding (lay length)                      | construction                  |
//! | K3     | cable assembly (single vs multi-core)       | construction                  |
//! | K4     | shield construction                         | construction                  |
//!
//! Rows are keyed by `(factor, construction)`. The column is the wire
//! diameter class, or the `default` column when no class applies.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::{columns, Predicate, TableId, TableRepository};

/// Named correction factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionFactor {
    K1,
    K2,
    K3,
    K4,
}

impl CorrectionFactor {
    pub const ALL: [CorrectionFactor; 4] = [
        CorrectionFactor::K1,
        CorrectionFactor::K2,
        CorrectionFactor::K3,
        CorrectionFactor::K4,
    ];

    /// Row key in the factor table
    pub fn table_name(&self) -> &'static str {
        match self {
            CorrectionFactor::K1 => "K1",
            CorrectionFactor::K2 => "K2",
            CorrectionFactor::K3 => "K3",
            CorrectionFactor::K4 => "K4",
        }
    }
}

impl std::fmt::Display for CorrectionFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// Conductor or shield construction class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductorClass {
    /// Solid wire or compacted stranding (K1, K2)
    SolidOrCompact,
    /// Non-compacted stranding (K1, K2)
    NonCompact,
    /// Single-core cable (K3)
    SingleCore,
    /// Multi-core cable (K3)
    MultiCore,
    /// Copper wire shield (K4)
    WireShield,
    /// Copper tape shield (K4)
    TapeShield,
}

impl ConductorClass {
    /// Row key in the factor table
    pub fn table_name(&self) -> &'static str {
        match self {
            ConductorClass::SolidOrCompact => "solid_or_compact",
            ConductorClass::NonCompact => "non_compact",
            ConductorClass::SingleCore => "single_core",
            ConductorClass::MultiCore => "multi_core",
            ConductorClass::WireShield => "wire_shield",
            ConductorClass::TapeShield => "tape_shield",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorClass::SolidOrCompact => "Solid wire or compact stranding",
            ConductorClass::NonCompact => "Non-compact stranding",
            ConductorClass::SingleCore => "Single-core cable",
            ConductorClass::MultiCore => "Multi-core cable",
            ConductorClass::WireShield => "Wire shield",
            ConductorClass::TapeShield => "Tape shield",
        }
    }
}

impl std::fmt::Display for ConductorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Wire diameter class selecting the K1 column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DiameterClass {
    /// No diameter class applies; read the default column
    #[default]
    NotApplicable,
    /// d ≤ 0.05 mm
    UpTo0_05,
    /// 0.05 < d ≤ 0.10 mm
    From0_05To0_10,
    /// 0.10 < d ≤ 0.31 mm
    From0_10To0_31,
    /// 0.31 < d ≤ 0.91 mm
    From0_31To0_91,
    /// 0.91 < d ≤ 3.60 mm
    From0_91To3_60,
}

impl DiameterClass {
    pub const ALL: [DiameterClass; 6] = [
        DiameterClass::NotApplicable,
        DiameterClass::UpTo0_05,
        DiameterClass::From0_05To0_10,
        DiameterClass::From0_10To0_31,
        DiameterClass::From0_31To0_91,
        DiameterClass::From0_91To3_60,
    ];

    /// Factor table column read for this class
    pub fn column(&self) -> &'static str {
        match self {
            DiameterClass::NotApplicable => columns::DEFAULT_FACTOR,
            DiameterClass::UpTo0_05 => "up_to_0.05",
            DiameterClass::From0_05To0_10 => "0.05-0.10",
            DiameterClass::From0_10To0_31 => "0.10-0.31",
            DiameterClass::From0_31To0_91 => "0.31-0.91",
            DiameterClass::From0_91To3_60 => "0.91-3.60",
        }
    }

    /// Classify a wire diameter in mm. Diameters above 3.60 mm have no class.
    pub fn for_wire_diameter(diameter_mm: f64) -> CalcResult<Self> {
        match diameter_mm {
            d if d.is_nan() || d <= 0.0 => Err(CalcError::invalid_input(
                "wire_diameter_mm",
                diameter_mm.to_string(),
                "Wire diameter must be positive",
            )),
            d if d <= 0.05 => Ok(DiameterClass::UpTo0_05),
            d if d <= 0.10 => Ok(DiameterClass::From0_05To0_10),
            d if d <= 0.31 => Ok(DiameterClass::From0_10To0_31),
            d if d <= 0.91 => Ok(DiameterClass::From0_31To0_91),
            d if d <= 3.60 => Ok(DiameterClass::From0_91To3_60),
            _ => Err(CalcError::invalid_input(
                "wire_diameter_mm",
                diameter_mm.to_string(),
                "No diameter class above 3.60 mm",
            )),
        }
    }

    /// Parse a column label; `"0"` (or empty) means not applicable
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let trimmed = s.trim();
        if matches!(trimmed, "" | "0" | "0.0") || trimmed.eq_ignore_ascii_case("n/a") {
            return Ok(DiameterClass::NotApplicable);
        }
        Self::ALL
            .into_iter()
            .find(|class| class.column() == trimmed)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "diameter_selector",
                    s,
                    "Expected 0 or a wire diameter class such as '0.31-0.91'",
                )
            })
    }
}

/// Conductor correction factors ready for the DC resistance formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorFactors {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
}

impl ConductorFactors {
    pub fn new(k1: f64, k2: f64, k3: f64) -> Self {
        Self { k1, k2, k3 }
    }

    /// K1 × K2 × K3
    pub fn product(&self) -> f64 {
        self.k1 * self.k2 * self.k3
    }
}

/// Reads K1..K4 from the correction factor table
pub struct CorrectionFactorResolver<'a, T: TableRepository + ?Sized> {
    tables: &'a T,
}

impl<'a, T: TableRepository + ?Sized> CorrectionFactorResolver<'a, T> {
    pub fn new(tables: &'a T) -> Self {
        Self { tables }
    }

    /// Look up one factor. Undefined `(factor, class, diameter)`
    /// combinations fail with `LookupNotFound`.
    pub fn factor(
        &self,
        factor: CorrectionFactor,
        class: ConductorClass,
        diameter: DiameterClass,
    ) -> CalcResult<f64> {
        self.tables.lookup(
            TableId::CorrectionFactors,
            &[
                Predicate::text(columns::FACTOR, factor.table_name()),
                Predicate::text(columns::CONSTRUCTION, class.table_name()),
            ],
            diameter.column(),
        )
    }

    /// K1 (by diameter class), K2 and K3 (default column) for a conductor
    pub fn conductor_factors(
        &self,
        stranding: ConductorClass,
        assembly: ConductorClass,
        diameter: DiameterClass,
    ) -> CalcResult<ConductorFactors> {
        Ok(ConductorFactors {
            k1: self.factor(CorrectionFactor::K1, stranding, diameter)?,
            k2: self.factor(CorrectionFactor::K2, stranding, DiameterClass::NotApplicable)?,
            k3: self.factor(CorrectionFactor::K3, assembly, DiameterClass::NotApplicable)?,
        })
    }

    /// K4 for a metallic shield
    pub fn shield_factor(&self, shield: ConductorClass) -> CalcResult<f64> {
        self.factor(CorrectionFactor::K4, shield, DiameterClass::NotApplicable)
    }
}
