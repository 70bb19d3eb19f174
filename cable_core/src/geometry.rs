//! # Cable Geometry (Table 4.21)
//!
//! Conductor and insulation dimensions of a cable construction. Each value is
//! a lookup on the same row set:
//!
//! 1. filter rows by insulation material
//! 2. filter rows by characteristic (conductor diameter, insulation
//!    thickness, external diameter)
//! 3. read the column named by the section/voltage selector (`"300"`, `"300.1"`)
//!
//! All results are in millimeters.

use serde::{Deserialize, Serialize};

use crate::cable::{InsulationMaterial, SectionVoltageSelector};
use crate::errors::CalcResult;
use crate::tables::{columns, Predicate, TableId, TableRepository};

/// Tabulated dimensions of one cable construction (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableGeometry {
    /// Conductor diameter Dc
    pub conductor_diameter_mm: f64,
    /// Insulation thickness A
    pub insulation_thickness_mm: f64,
    /// Overall cable diameter
    pub external_diameter_mm: f64,
}

impl CableGeometry {
    /// Conductor radius Rc = Dc / 2
    pub fn conductor_radius_mm(&self) -> f64 {
        self.conductor_diameter_mm / 2.0
    }

    /// Distance B = A / 2, the insulation mid-point measured from the
    /// conductor surface
    pub fn distance_b_mm(&self) -> f64 {
        self.insulation_thickness_mm / 2.0
    }
}

/// Resolves cable dimensions for an insulation material and selector
pub struct GeometryResolver<'a, T: TableRepository + ?Sized> {
    tables: &'a T,
    insulation: InsulationMaterial,
    selector: SectionVoltageSelector,
}

impl<'a, T: TableRepository + ?Sized> GeometryResolver<'a, T> {
    pub fn new(tables: &'a T, insulation: InsulationMaterial, selector: SectionVoltageSelector) -> Self {
        Self {
            tables,
            insulation,
            selector,
        }
    }

    fn characteristic(&self, characteristic: &str) -> CalcResult<f64> {
        self.tables.lookup(
            TableId::Geometry,
            &[
                Predicate::text(columns::INSULATION, self.insulation.table_name()),
                Predicate::text(columns::CHARACTERISTIC, characteristic),
            ],
            &self.selector.column_label(),
        )
    }

    /// Tabulated conductor diameter Dc (mm)
    pub fn conductor_diameter(&self) -> CalcResult<f64> {
        self.characteristic(columns::CONDUCTOR_DIAMETER)
    }

    /// Conductor radius Rc, half the tabulated conductor diameter (mm)
    pub fn conductor_radius(&self) -> CalcResult<f64> {
        Ok(0.5 * self.conductor_diameter()?)
    }

    /// Distance B, half the tabulated insulation thickness (mm)
    pub fn distance_b(&self) -> CalcResult<f64> {
        Ok(0.5 * self.insulation_thickness()?)
    }

    /// Insulation layer thickness A, unhalved (mm)
    pub fn insulation_thickness(&self) -> CalcResult<f64> {
        self.characteristic(columns::INSULATION_THICKNESS)
    }

    /// Overall cable diameter (mm)
    pub fn external_diameter(&self) -> CalcResult<f64> {
        self.characteristic(columns::EXTERNAL_DIAMETER)
    }

    /// All tabulated dimensions at once
    pub fn geometry(&self) -> CalcResult<CableGeometry> {
        Ok(CableGeometry {
            conductor_diameter_mm: self.conductor_diameter()?,
            insulation_thickness_mm: self.insulation_thickness()?,
            external_diameter_mm: self.external_diameter()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cable::VoltageClass;
    use crate::errors::CalcError;
    use crate::tables::ReferenceTables;

    fn resolver(
        insulation: InsulationMaterial,
        section_mm2: u32,
        class: VoltageClass,
    ) -> GeometryResolver<'static, ReferenceTables> {
        GeometryResolver::new(
            ReferenceTables::builtin().unwrap(),
            insulation,
            SectionVoltageSelector::new(section_mm2, class),
        )
    }

    #[test]
    fn test_xlpe_300_nominal_class() {
        let r = resolver(InsulationMaterial::Xlpe, 300, VoltageClass::Kv8_7To15);
        assert_eq!(r.conductor_diameter().unwrap(), 20.4);
        assert!((r.conductor_radius().unwrap() - 10.2).abs() < 1e-12);
        assert_eq!(r.insulation_thickness().unwrap(), 4.5);
        assert!((r.distance_b().unwrap() - 2.25).abs() < 1e-12);
        assert_eq!(r.external_diameter().unwrap(), 38.6);
    }

    #[test]
    fn test_alternate_voltage_class_is_thicker() {
        let nominal = resolver(InsulationMaterial::Xlpe, 150, VoltageClass::Kv8_7To15);
        let alternate = resolver(InsulationMaterial::Xlpe, 150, VoltageClass::Kv12To20);
        assert!(alternate.insulation_thickness().unwrap() > nominal.insulation_thickness().unwrap());
        assert_eq!(
            alternate.conductor_diameter().unwrap(),
            nominal.conductor_diameter().unwrap()
        );
    }

    #[test]
    fn test_geometry_bundle() {
        let g = resolver(InsulationMaterial::Epr, 95, VoltageClass::Kv8_7To15)
            .geometry()
            .unwrap();
        assert_eq!(g.conductor_diameter_mm, 11.3);
        assert!((g.conductor_radius_mm() - 5.65).abs() < 1e-12);
        assert!((g.distance_b_mm() - 2.25).abs() < 1e-12);
        assert!(g.external_diameter_mm > g.conductor_diameter_mm + 2.0 * g.insulation_thickness_mm);
    }

    #[test]
    fn test_unknown_section_fails() {
        let r = resolver(InsulationMaterial::Xlpe, 630, VoltageClass::Kv8_7To15);
        let err = r.conductor_radius().unwrap_err();
        assert!(matches!(err, CalcError::LookupNotFound { ref target, .. } if target == "630"));
    }
}
