//! # Material Properties
//!
//! Dielectric properties of insulating materials (Table 4.6) and electrical
//! properties of conductor metals (Table 4.2).
//!
//! The impurity lookup takes a free material name rather than an
//! [`InsulationMaterial`]: contaminants (air voids, water, paper) are not cable
//! insulations, and an unknown name fails with `LookupNotFound`.

use serde::{Deserialize, Serialize};

use crate::cable::{ConductorMaterial, InsulationMaterial};
use crate::errors::CalcResult;
use crate::tables::{columns, Predicate, TableId, TableRepository};

/// Dielectric properties of an insulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DielectricProperties {
    /// Relative permittivity ε
    pub permittivity: f64,
    /// Loss tangent tg δ at 20 °C
    pub loss_tangent: f64,
}

/// Resistive properties of a conductor metal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorProperties {
    /// Maximum resistivity at 20 °C, ρ20 (Ω·mm²/m)
    pub resistivity_20c: f64,
    /// Temperature coefficient of resistance at 20 °C, α20 (1/°C)
    pub temperature_coefficient_20c: f64,
}

/// Looks up material constants
pub struct MaterialPropertyResolver<'a, T: TableRepository + ?Sized> {
    tables: &'a T,
}

impl<'a, T: TableRepository + ?Sized> MaterialPropertyResolver<'a, T> {
    pub fn new(tables: &'a T) -> Self {
        Self { tables }
    }

    fn insulation_property(&self, material: &str, target: &str) -> CalcResult<f64> {
        self.tables.lookup(
            TableId::Insulation,
            &[Predicate::text(columns::MATERIAL, material)],
            target,
        )
    }

    fn conductor_property(&self, material: ConductorMaterial, specification: &str) -> CalcResult<f64> {
        self.tables.lookup(
            TableId::Conductors,
            &[Predicate::text(columns::SPECIFICATION, specification)],
            material.column(),
        )
    }

    /// Relative permittivity ε of a cable insulation
    pub fn dielectric_constant(&self, insulation: InsulationMaterial) -> CalcResult<f64> {
        self.dielectric_constant_of(insulation.table_name())
    }

    /// Relative permittivity ε of any tabulated material, e.g. an impurity
    /// (`"Air"`, `"Water"`) inside the insulation
    pub fn dielectric_constant_of(&self, material: &str) -> CalcResult<f64> {
        self.insulation_property(material, columns::PERMITTIVITY)
    }

    /// Loss tangent tg δ at 20 °C
    pub fn loss_tangent(&self, insulation: InsulationMaterial) -> CalcResult<f64> {
        self.insulation_property(insulation.table_name(), columns::LOSS_TANGENT)
    }

    pub fn dielectric_properties(&self, insulation: InsulationMaterial) -> CalcResult<DielectricProperties> {
        Ok(DielectricProperties {
            permittivity: self.dielectric_constant(insulation)?,
            loss_tangent: self.loss_tangent(insulation)?,
        })
    }

    /// Maximum resistivity at 20 °C (Ω·mm²/m)
    pub fn resistivity(&self, material: ConductorMaterial) -> CalcResult<f64> {
        self.conductor_property(material, columns::RESISTIVITY_20C)
    }

    /// Temperature coefficient of resistance at 20 °C (1/°C)
    pub fn temperature_coefficient(&self, material: ConductorMaterial) -> CalcResult<f64> {
        self.conductor_property(material, columns::TEMPERATURE_COEFFICIENT_20C)
    }

    pub fn conductor_properties(&self, material: ConductorMaterial) -> CalcResult<ConductorProperties> {
        Ok(ConductorProperties {
            resistivity_20c: self.resistivity(material)?,
            temperature_coefficient_20c: self.temperature_coefficient(material)?,
        })
    }
}
