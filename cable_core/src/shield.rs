//! Metallic shield sizing (Table 4.8).
//!
//! The shield section is read for an exact `(wire diameter, 1 s fault
//! current)` pair. Values between rows are not interpolated.

use crate::errors::CalcResult;
use crate::tables::{columns, Predicate, TableId, TableRepository};

pub struct ShieldSizingResolver<'a, T: TableRepository + ?Sized> {
    tables: &'a T,
}

impl<'a, T: TableRepository + ?Sized> ShieldSizingResolver<'a, T> {
    pub fn new(tables: &'a T) -> Self {
        Self { tables }
    }

    /// Shield cross-section Sb (mm²) for a wire diameter (mm) and rated
    /// 1-second short-circuit current (kA)
    pub fn shield_section(&self, wire_diameter_mm: f64, fault_current_ka: f64) -> CalcResult<f64> {
        self.tables.lookup(
            TableId::ShieldSections,
            &[
                Predicate::number(columns::WIRE_DIAMETER, wire_diameter_mm),
                Predicate::number(columns::FAULT_CURRENT_1S, fault_current_ka),
            ],
            columns::SHIELD_SECTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::tables::ReferenceTables;

    #[test]
    fn test_exact_match() {
        let r = ShieldSizingResolver::new(ReferenceTables::builtin().unwrap());
        assert_eq!(r.shield_section(0.85, 5.0).unwrap(), 35.0);
        assert_eq!(r.shield_section(1.05, 13.6).unwrap(), 95.0);
    }

    #[test]
    fn test_no_interpolation() {
        let r = ShieldSizingResolver::new(ReferenceTables::builtin().unwrap());
        let err = r.shield_section(0.85, 6.0).unwrap_err();
        assert!(matches!(err, CalcError::LookupNotFound { .. }));

        // Right current, wrong wire
        assert!(r.shield_section(0.65, 5.0).is_err());
    }
}
