//! Reference table store backed by a TOML (or JSON) document.
//!
//! The document has one section per [`TableId`], each an array of row tables:
//!
//! ```toml
//! [[insulation.rows]]
//! material = "XLPE"
//! permittivity = 2.3
//! loss_tangent_20c = 0.001
//! ```
//!
//! The built-in data set is compiled into the binary and parsed once on first
//! use; see [`ReferenceTables::builtin`].

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LookupTable, Row, TableId, TableRepository};
use crate::errors::{CalcError, CalcResult};

const BUILTIN_SOURCE: &str = "builtin reference_tables.toml";
const BUILTIN_DATA: &str = include_str!("../../data/reference_tables.toml");

static BUILTIN: Lazy<CalcResult<ReferenceTables>> =
    Lazy::new(|| ReferenceTables::from_toml_str(BUILTIN_SOURCE, BUILTIN_DATA));

#[derive(Debug, Serialize, Deserialize)]
struct TableSection {
    #[serde(default)]
    title: Option<String>,
    rows: Vec<Row>,
}

/// Immutable set of all reference tables.
///
/// Construct once, then share by reference with every resolver. The store is
/// `Send + Sync` and never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    tables: BTreeMap<TableId, LookupTable>,
}

impl ReferenceTables {
    /// The built-in reference data.
    ///
    /// Parsed on the first call; later calls return the same instance.
    pub fn builtin() -> CalcResult<&'static ReferenceTables> {
        match &*BUILTIN {
            Ok(tables) => Ok(tables),
            Err(e) => Err(e.clone()),
        }
    }

    /// Parse a TOML reference document. `source_name` only labels errors.
    pub fn from_toml_str(source_name: &str, text: &str) -> CalcResult<Self> {
        let sections: BTreeMap<String, TableSection> =
            toml::from_str(text).map_err(|e| CalcError::table_load(source_name, e.to_string()))?;
        Self::from_sections(source_name, sections)
    }

    /// Parse a JSON reference document with the same layout as the TOML one
    pub fn from_json_str(source_name: &str, text: &str) -> CalcResult<Self> {
        let sections: BTreeMap<String, TableSection> = serde_json::from_str(text)
            .map_err(|e| CalcError::table_load(source_name, e.to_string()))?;
        Self::from_sections(source_name, sections)
    }

    /// Load a reference document from disk. Files ending in `.json` are read
    /// as JSON, everything else as TOML.
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let source_name = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::table_load(&source_name, e.to_string()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source_name, &text),
            _ => Self::from_toml_str(&source_name, &text),
        }
    }

    fn from_sections(source_name: &str, mut sections: BTreeMap<String, TableSection>) -> CalcResult<Self> {
        let mut tables = BTreeMap::new();

        for id in TableId::ALL {
            let section = sections.remove(id.key()).ok_or_else(|| {
                CalcError::table_load(source_name, format!("missing table section '{}'", id.key()))
            })?;
            debug!(
                source = source_name,
                table = id.key(),
                title = section.title.as_deref().unwrap_or(""),
                rows = section.rows.len(),
                "loaded reference table"
            );
            tables.insert(id, LookupTable::new(id, section.rows));
        }

        if let Some(unknown) = sections.keys().next() {
            return Err(CalcError::table_load(
                source_name,
                format!("unknown table section '{}'", unknown),
            ));
        }

        Ok(Self { tables })
    }
}

impl TableRepository for ReferenceTables {
    fn table(&self, id: TableId) -> CalcResult<&LookupTable> {
        self.tables
            .get(&id)
            .ok_or_else(|| CalcError::table_load("reference tables", format!("table '{}' not loaded", id.key())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{columns, Predicate};

    const MINIMAL: &str = r#"
        [geometry]
        rows = []

        [conductors]
        rows = []

        [shield_sections]
        rows = []

        [correction_factors]
        rows = []

        [insulation]
        title = "Insulating materials"

        [[insulation.rows]]
        material = "XLPE"
        permittivity = 2.3
        loss_tangent_20c = 0.001
    "#;

    #[test]
    fn test_builtin_loads_every_table() {
        let tables = ReferenceTables::builtin().unwrap();
        for id in TableId::ALL {
            assert!(!tables.table(id).unwrap().is_empty(), "{} is empty", id);
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = ReferenceTables::builtin().unwrap();
        let b = ReferenceTables::builtin().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_from_toml_minimal() {
        let tables = ReferenceTables::from_toml_str("minimal", MINIMAL).unwrap();
        let eps = tables
            .lookup(
                TableId::Insulation,
                &[Predicate::text(columns::MATERIAL, "XLPE")],
                columns::PERMITTIVITY,
            )
            .unwrap();
        assert_eq!(eps, 2.3);
    }

    #[test]
    fn test_missing_section_fails() {
        let err = ReferenceTables::from_toml_str("broken", "[geometry]\nrows = []\n").unwrap_err();
        assert_eq!(err.error_code(), "TABLE_LOAD");
        assert!(err.to_string().contains("conductors"));
    }

    #[test]
    fn test_unknown_section_fails() {
        let text = format!("{}\n[cable_weights]\nrows = []\n", MINIMAL);
        let err = ReferenceTables::from_toml_str("extra", &text).unwrap_err();
        assert!(err.to_string().contains("cable_weights"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "geometry": { "rows": [] },
            "conductors": { "rows": [] },
            "insulation": { "rows": [ { "material": "EPR", "permittivity": 2.6 } ] },
            "correction_factors": { "rows": [] },
            "shield_sections": { "rows": [] }
        }"#;
        let tables = ReferenceTables::from_json_str("inline", json).unwrap();
        let eps = tables
            .lookup(
                TableId::Insulation,
                &[Predicate::text(columns::MATERIAL, "EPR")],
                columns::PERMITTIVITY,
            )
            .unwrap();
        assert_eq!(eps, 2.6);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ReferenceTables::from_path(Path::new("/nonexistent/tables.toml")).unwrap_err();
        assert!(matches!(err, CalcError::TableLoad { .. }));
    }
}
