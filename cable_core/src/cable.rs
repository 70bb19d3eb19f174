//! # Cable Specification
//!
//! The immutable identity of the cable being analyzed, plus the closed
//! enumerations used as table keys. String forms are parsed (and rejected)
//! here, at construction, so an unknown material never reaches a lookup.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::cable::{CableSpecification, ConductorMaterial, InsulationMaterial, SectionVoltageSelector};
//! use cable_core::correction_factors::DiameterClass;
//! use cable_core::units::Volts;
//!
//! let cable = CableSpecification::new(
//!     InsulationMaterial::Xlpe,
//!     ConductorMaterial::AnnealedCopperIacs,
//!     SectionVoltageSelector::from_str_flexible("300").unwrap(),
//!     DiameterClass::NotApplicable,
//!     Volts(15_000.0),
//! )
//! .unwrap();
//!
//! assert!((cable.phase_voltage().0 - 8660.254).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};

use crate::correction_factors::DiameterClass;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilovolts, Volts};

/// Cable insulation compound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsulationMaterial {
    /// Cross-linked polyethylene
    #[serde(rename = "XLPE")]
    Xlpe,
    /// Ethylene propylene rubber
    #[serde(rename = "EPR")]
    Epr,
}

impl InsulationMaterial {
    /// All insulation variants for selection lists
    pub const ALL: [InsulationMaterial; 2] = [InsulationMaterial::Xlpe, InsulationMaterial::Epr];

    /// Name used as row key in the geometry and insulation tables
    pub fn table_name(&self) -> &'static str {
        match self {
            InsulationMaterial::Xlpe => "XLPE",
            InsulationMaterial::Epr => "EPR",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "XLPE" | "CROSSLINKEDPOLYETHYLENE" | "PEX" => Ok(InsulationMaterial::Xlpe),
            "EPR" | "ETHYLENEPROPYLENERUBBER" => Ok(InsulationMaterial::Epr),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationMaterial::Xlpe => "XLPE (cross-linked polyethylene)",
            InsulationMaterial::Epr => "EPR (ethylene propylene rubber)",
        }
    }
}

impl std::fmt::Display for InsulationMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// Conductor (or shield wire) metal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductorMaterial {
    /// Hard-drawn aluminium wire
    HardDrawnAluminium,
    /// Hard-drawn copper wire
    HardDrawnCopper,
    /// Annealed copper, International Annealed Copper Standard
    AnnealedCopperIacs,
    /// Zinc-coated steel wire for aluminium conductor cores
    ZincCoatedSteel,
}

impl ConductorMaterial {
    pub const ALL: [ConductorMaterial; 4] = [
        ConductorMaterial::HardDrawnAluminium,
        ConductorMaterial::HardDrawnCopper,
        ConductorMaterial::AnnealedCopperIacs,
        ConductorMaterial::ZincCoatedSteel,
    ];

    /// Column name in the conductor materials table
    pub fn column(&self) -> &'static str {
        match self {
            ConductorMaterial::HardDrawnAluminium => "hard_drawn_aluminium",
            ConductorMaterial::HardDrawnCopper => "hard_drawn_copper",
            ConductorMaterial::AnnealedCopperIacs => "annealed_copper_iacs",
            ConductorMaterial::ZincCoatedSteel => "zinc_coated_steel",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "hard_drawn_aluminium" | "hard_drawn_aluminum" | "aluminium" | "aluminum" | "al" => {
                Ok(ConductorMaterial::HardDrawnAluminium)
            }
            "hard_drawn_copper" | "hard_copper" => Ok(ConductorMaterial::HardDrawnCopper),
            "annealed_copper_iacs" | "annealed_copper" | "iacs" | "copper" | "cu" => {
                Ok(ConductorMaterial::AnnealedCopperIacs)
            }
            "zinc_coated_steel" | "galvanized_steel" | "steel" => Ok(ConductorMaterial::ZincCoatedSteel),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::HardDrawnAluminium => "Hard-drawn aluminium",
            ConductorMaterial::HardDrawnCopper => "Hard-drawn copper",
            ConductorMaterial::AnnealedCopperIacs => "Annealed copper (IACS)",
            ConductorMaterial::ZincCoatedSteel => "Zinc-coated steel",
        }
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Rated voltage class of the geometry table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VoltageClass {
    /// 8.7/15 kV (the table's nominal columns)
    #[default]
    #[serde(rename = "8.7/15kV")]
    Kv8_7To15,
    /// 12/20 kV (columns suffixed with ".1")
    #[serde(rename = "12/20kV")]
    Kv12To20,
}

impl VoltageClass {
    /// Suffix appended to the section number to form a geometry column
    pub fn column_suffix(&self) -> &'static str {
        match self {
            VoltageClass::Kv8_7To15 => "",
            VoltageClass::Kv12To20 => ".1",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VoltageClass::Kv8_7To15 => "8.7/15 kV",
            VoltageClass::Kv12To20 => "12/20 kV",
        }
    }
}

/// Conductor section and voltage class, selecting one geometry column.
///
/// Whether the column exists is only known to the table; an unknown section
/// fails at lookup time with `LookupNotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionVoltageSelector {
    /// Nominal conductor section (mm²)
    pub section_mm2: u32,
    pub voltage_class: VoltageClass,
}

impl SectionVoltageSelector {
    pub fn new(section_mm2: u32, voltage_class: VoltageClass) -> Self {
        Self {
            section_mm2,
            voltage_class,
        }
    }

    /// Parse the table form: `"300"` (8.7/15 kV) or `"300.1"` (12/20 kV)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let trimmed = s.trim();
        let (section, suffix) = match trimmed.split_once('.') {
            Some((section, suffix)) => (section, Some(suffix)),
            None => (trimmed, None),
        };

        let section_mm2: u32 = section.parse().map_err(|_| {
            CalcError::invalid_input("section_voltage_selector", s, "Section must be a whole number of mm²")
        })?;
        if section_mm2 == 0 {
            return Err(CalcError::invalid_input(
                "section_voltage_selector",
                s,
                "Section must be positive",
            ));
        }

        let voltage_class = match suffix {
            None | Some("0") => VoltageClass::Kv8_7To15,
            Some("1") => VoltageClass::Kv12To20,
            Some(_) => {
                return Err(CalcError::invalid_input(
                    "section_voltage_selector",
                    s,
                    "Voltage class suffix must be '.1' or absent",
                ))
            }
        };

        Ok(Self::new(section_mm2, voltage_class))
    }

    /// Geometry table column for this selector
    pub fn column_label(&self) -> String {
        format!("{}{}", self.section_mm2, self.voltage_class.column_suffix())
    }

    /// Nominal section as a formula input (mm²)
    pub fn nominal_section_mm2(&self) -> f64 {
        f64::from(self.section_mm2)
    }
}

impl std::fmt::Display for SectionVoltageSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mm² {}", self.section_mm2, self.voltage_class.display_name())
    }
}

#[derive(Deserialize)]
struct RawCableSpecification {
    insulation_material: InsulationMaterial,
    conductor_material: ConductorMaterial,
    section_voltage_selector: SectionVoltageSelector,
    diameter_selector: DiameterClass,
    line_voltage: Volts,
}

impl TryFrom<RawCableSpecification> for CableSpecification {
    type Error = CalcError;

    fn try_from(raw: RawCableSpecification) -> CalcResult<Self> {
        CableSpecification::new(
            raw.insulation_material,
            raw.conductor_material,
            raw.section_voltage_selector,
            raw.diameter_selector,
            raw.line_voltage,
        )
    }
}

/// Immutable description of one cable.
///
/// `phase_voltage` is derived once at construction. On deserialization it is
/// recomputed from `line_voltage`, never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCableSpecification")]
pub struct CableSpecification {
    insulation_material: InsulationMaterial,
    conductor_material: ConductorMaterial,
    section_voltage_selector: SectionVoltageSelector,
    diameter_selector: DiameterClass,
    line_voltage: Volts,
    phase_voltage: Volts,
}

impl CableSpecification {
    /// Create a specification. Fails if the line voltage is not a positive
    /// finite number.
    pub fn new(
        insulation_material: InsulationMaterial,
        conductor_material: ConductorMaterial,
        section_voltage_selector: SectionVoltageSelector,
        diameter_selector: DiameterClass,
        line_voltage: Volts,
    ) -> CalcResult<Self> {
        if !line_voltage.0.is_finite() || line_voltage.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "line_voltage",
                line_voltage.0.to_string(),
                "Line voltage must be a positive number of volts",
            ));
        }

        Ok(Self {
            insulation_material,
            conductor_material,
            section_voltage_selector,
            diameter_selector,
            line_voltage,
            phase_voltage: line_voltage.line_to_neutral(),
        })
    }

    /// Create a specification from the string forms used in the tables.
    ///
    /// ```rust
    /// use cable_core::cable::CableSpecification;
    ///
    /// let cable = CableSpecification::parse("EPR", "copper", "240.1", "0", 20_000.0).unwrap();
    /// assert_eq!(cable.section_voltage_selector().column_label(), "240.1");
    /// ```
    pub fn parse(
        insulation_material: &str,
        conductor_material: &str,
        section_voltage_selector: &str,
        diameter_selector: &str,
        line_voltage_v: f64,
    ) -> CalcResult<Self> {
        Self::new(
            InsulationMaterial::from_str_flexible(insulation_material)?,
            ConductorMaterial::from_str_flexible(conductor_material)?,
            SectionVoltageSelector::from_str_flexible(section_voltage_selector)?,
            DiameterClass::from_str_flexible(diameter_selector)?,
            Volts(line_voltage_v),
        )
    }

    pub fn insulation_material(&self) -> InsulationMaterial {
        self.insulation_material
    }

    pub fn conductor_material(&self) -> ConductorMaterial {
        self.conductor_material
    }

    pub fn section_voltage_selector(&self) -> SectionVoltageSelector {
        self.section_voltage_selector
    }

    pub fn diameter_selector(&self) -> DiameterClass {
        self.diameter_selector
    }

    /// Line-to-line voltage (V)
    pub fn line_voltage(&self) -> Volts {
        self.line_voltage
    }

    /// Line voltage in kV, as the voltage class is written
    pub fn line_voltage_kv(&self) -> Kilovolts {
        self.line_voltage.into()
    }

    /// Line-to-neutral voltage, `line_voltage / √3` (V)
    pub fn phase_voltage(&self) -> Volts {
        self.phase_voltage
    }
}

impl std::fmt::Display for CableSpecification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.conductor_material, self.insulation_material, self.section_voltage_selector,
            self.line_voltage_kv()
        )
    }
}
