//! # Reference Tables
//!
//! Row-oriented lookup tables holding the cable design reference data
//! (conductor dimensions, material constants, correction factors, shield
//! sections), and the [`TableRepository`] seam every resolver reads through.
//!
//! ## Lookup Semantics
//!
//! A lookup ANDs one or two equality predicates over named columns and reads
//! a single target cell:
//!
//! - zero matching rows: [`CalcError::LookupNotFound`]
//! - more than one matching row: [`CalcError::LookupAmbiguous`]
//! - matching row without the target column: [`CalcError::LookupNotFound`]
//!
//! Numbers compare equal within [`NUMERIC_MATCH_TOLERANCE`]. There is no
//! interpolation between rows.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::tables::{Predicate, ReferenceTables, TableId, TableRepository, columns};
//!
//! let tables = ReferenceTables::builtin().unwrap();
//! let eps = tables
//!     .lookup(
//!         TableId::Insulation,
//!         &[Predicate::text(columns::MATERIAL, "XLPE")],
//!         columns::PERMITTIVITY,
//!     )
//!     .unwrap();
//! assert!(eps > 1.0);
//! ```

pub mod reference;

pub use reference::ReferenceTables;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};

/// Absolute tolerance used when matching numeric cells
pub const NUMERIC_MATCH_TOLERANCE: f64 = 1e-9;

/// Column names shared by the built-in tables and the resolvers
pub mod columns {
    // Table 4.21 - cable construction
    /// Insulation material row filter
    pub const INSULATION: &str = "insulation";
    /// Characteristic row filter
    pub const CHARACTERISTIC: &str = "characteristic";
    /// Conductor diameter characteristic (mm)
    pub const CONDUCTOR_DIAMETER: &str = "conductor_diameter_mm";
    /// Insulation thickness characteristic (mm)
    pub const INSULATION_THICKNESS: &str = "insulation_thickness_mm";
    /// Cable external diameter characteristic (mm)
    pub const EXTERNAL_DIAMETER: &str = "external_diameter_mm";

    // Table 4.2 - conductor materials
    /// Specification row filter
    pub const SPECIFICATION: &str = "specification";
    /// Maximum resistivity at 20 °C (Ω·mm²/m)
    pub const RESISTIVITY_20C: &str = "resistivity_20c";
    /// Resistance temperature coefficient at 20 °C (1/°C)
    pub const TEMPERATURE_COEFFICIENT_20C: &str = "temperature_coefficient_20c";

    // Table 4.6 - insulating materials
    /// Material name row filter
    pub const MATERIAL: &str = "material";
    /// Relative permittivity ε
    pub const PERMITTIVITY: &str = "permittivity";
    /// Loss tangent tg δ at 20 °C
    pub const LOSS_TANGENT: &str = "loss_tangent_20c";

    // Table 4.7 - correction factors
    /// Factor name row filter (K1..K4)
    pub const FACTOR: &str = "factor";
    /// Conductor construction row filter
    pub const CONSTRUCTION: &str = "construction";
    /// Column used when no wire-diameter class applies
    pub const DEFAULT_FACTOR: &str = "default";

    // Table 4.8 - metallic shield sections
    /// Shield wire diameter (mm)
    pub const WIRE_DIAMETER: &str = "wire_diameter_mm";
    /// Admissible short-circuit current for 1 s (kA)
    pub const FAULT_CURRENT_1S: &str = "fault_current_1s_ka";
    /// Shield cross-section (mm²)
    pub const SHIELD_SECTION: &str = "shield_section_mm2";
}

/// Identifier of a reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableId {
    /// Cable construction dimensions (Table 4.21)
    Geometry,
    /// Conductor material characteristics (Table 4.2)
    Conductors,
    /// Insulating material characteristics (Table 4.6)
    Insulation,
    /// K1..K4 resistance correction factors (Table 4.7)
    CorrectionFactors,
    /// Metallic shield sections (Table 4.8)
    ShieldSections,
}

impl TableId {
    /// All table identifiers
    pub const ALL: [TableId; 5] = [
        TableId::Geometry,
        TableId::Conductors,
        TableId::Insulation,
        TableId::CorrectionFactors,
        TableId::ShieldSections,
    ];

    /// Section name in the TOML reference document
    pub fn key(&self) -> &'static str {
        match self {
            TableId::Geometry => "geometry",
            TableId::Conductors => "conductors",
            TableId::Insulation => "insulation",
            TableId::CorrectionFactors => "correction_factors",
            TableId::ShieldSections => "shield_sections",
        }
    }

    /// Published table number
    pub fn reference(&self) -> &'static str {
        match self {
            TableId::Geometry => "Table 4.21",
            TableId::Conductors => "Table 4.2",
            TableId::Insulation => "Table 4.6",
            TableId::CorrectionFactors => "Table 4.7",
            TableId::ShieldSections => "Table 4.8",
        }
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.reference(), self.key())
    }
}

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Equality used by lookups: exact for text, tolerant for numbers
    pub fn matches(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => (a - b).abs() <= NUMERIC_MATCH_TOLERANCE,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Numeric value, if this cell holds one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// Equality predicate `column == value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: String,
    pub value: CellValue,
}

impl Predicate {
    /// Match a text cell
    pub fn text(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: CellValue::Text(value.into()),
        }
    }

    /// Match a numeric cell
    pub fn number(column: impl Into<String>, value: f64) -> Self {
        Self {
            column: column.into(),
            value: CellValue::Number(value),
        }
    }

    fn holds_for(&self, row: &Row) -> bool {
        row.get(&self.column)
            .map(|cell| cell.matches(&self.value))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

fn describe(predicates: &[Predicate]) -> String {
    predicates
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// One table row: column name to cell
pub type Row = BTreeMap<String, CellValue>;

/// Ordered, immutable collection of rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    pub id: TableId,
    rows: Vec<Row>,
}

impl LookupTable {
    /// Create a table from its rows
    pub fn new(id: TableId, rows: Vec<Row>) -> Self {
        Self { id, rows }
    }

    /// All rows in table order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the unique row satisfying every predicate and return its
    /// `target` cell.
    pub fn lookup(&self, predicates: &[Predicate], target: &str) -> CalcResult<&CellValue> {
        let mut matching = self
            .rows
            .iter()
            .filter(|row| predicates.iter().all(|p| p.holds_for(row)));

        let row = match (matching.next(), matching.next()) {
            (Some(row), None) => row,
            (None, _) => {
                return Err(CalcError::lookup_not_found(
                    self.id.reference(),
                    describe(predicates),
                    target,
                ))
            }
            (Some(_), Some(_)) => {
                let matches = 2 + matching.count();
                warn!(
                    table = self.id.key(),
                    predicates = %describe(predicates),
                    matches,
                    "ambiguous table lookup"
                );
                return Err(CalcError::lookup_ambiguous(
                    self.id.reference(),
                    describe(predicates),
                    matches,
                ));
            }
        };

        let cell = row.get(target).ok_or_else(|| {
            CalcError::lookup_not_found(self.id.reference(), describe(predicates), target)
        })?;

        debug!(
            table = self.id.key(),
            predicates = %describe(predicates),
            column = target,
            value = %cell,
            "table lookup"
        );
        Ok(cell)
    }

    /// Like [`lookup`](Self::lookup), requiring a numeric cell
    pub fn lookup_number(&self, predicates: &[Predicate], target: &str) -> CalcResult<f64> {
        let cell = self.lookup(predicates, target)?;
        cell.as_f64().ok_or_else(|| {
            CalcError::table_format(
                self.id.reference(),
                target,
                format!("expected a number, found {}", cell),
            )
        })
    }
}

/// Read access to loaded reference tables.
///
/// Resolvers only ever read through this trait, so any store (the built-in
/// [`ReferenceTables`], a spreadsheet importer, a test fixture) can back them.
pub trait TableRepository {
    /// Get a loaded table. Fails with [`CalcError::TableLoad`] if the
    /// repository does not hold it.
    fn table(&self, id: TableId) -> CalcResult<&LookupTable>;

    /// Numeric lookup against table `id`
    fn lookup(&self, id: TableId, predicates: &[Predicate], target: &str) -> CalcResult<f64> {
        self.table(id)?.lookup_number(predicates, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_table() -> LookupTable {
        LookupTable::new(
            TableId::ShieldSections,
            vec![
                row(&[
                    ("wire_diameter_mm", CellValue::Number(0.5)),
                    ("fault_current_1s_ka", CellValue::Number(1.5)),
                    ("shield_section_mm2", CellValue::Number(10.0)),
                ]),
                row(&[
                    ("wire_diameter_mm", CellValue::Number(0.5)),
                    ("fault_current_1s_ka", CellValue::Number(2.3)),
                    ("shield_section_mm2", CellValue::Number(16.0)),
                ]),
                row(&[
                    ("wire_diameter_mm", CellValue::Number(0.5)),
                    ("fault_current_1s_ka", CellValue::Number(2.3)),
                    ("shield_section_mm2", CellValue::Text("n/a".to_string())),
                ]),
            ],
        )
    }

    #[test]
    fn test_lookup_single_match() {
        let table = sample_table();
        let value = table
            .lookup_number(
                &[
                    Predicate::number("wire_diameter_mm", 0.5),
                    Predicate::number("fault_current_1s_ka", 1.5),
                ],
                "shield_section_mm2",
            )
            .unwrap();
        assert_eq!(value, 10.0);
    }

    #[test]
    fn test_lookup_no_match() {
        let table = sample_table();
        let err = table
            .lookup_number(&[Predicate::number("wire_diameter_mm", 0.8)], "shield_section_mm2")
            .unwrap_err();
        assert!(matches!(err, CalcError::LookupNotFound { .. }));
    }

    #[test]
    fn test_lookup_ambiguous() {
        let table = sample_table();
        let err = table
            .lookup_number(&[Predicate::number("wire_diameter_mm", 0.5)], "shield_section_mm2")
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::LookupAmbiguous {
                table: "Table 4.8".to_string(),
                predicates: "wire_diameter_mm = 0.5".to_string(),
                matches: 3,
            }
        );
    }

    #[test]
    fn test_lookup_missing_target_column() {
        let table = sample_table();
        let err = table
            .lookup_number(&[Predicate::number("fault_current_1s_ka", 1.5)], "weight_kg_km")
            .unwrap_err();
        assert!(matches!(err, CalcError::LookupNotFound { ref target, .. } if target == "weight_kg_km"));
    }

    #[test]
    fn test_text_cell_where_number_expected() {
        let table = LookupTable::new(
            TableId::Insulation,
            vec![row(&[
                ("material", CellValue::Text("XLPE".to_string())),
                ("permittivity", CellValue::Text("2.3".to_string())),
            ])],
        );
        let err = table
            .lookup_number(&[Predicate::text("material", "XLPE")], "permittivity")
            .unwrap_err();
        assert_eq!(err.error_code(), "TABLE_FORMAT");
    }

    #[test]
    fn test_text_and_number_never_match() {
        assert!(!CellValue::Text("300".to_string()).matches(&CellValue::Number(300.0)));
        assert!(CellValue::Number(0.1 + 0.2).matches(&CellValue::Number(0.3)));
    }
}
