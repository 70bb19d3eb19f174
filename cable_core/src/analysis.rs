//! # Cable Analysis
//!
//! Query facade binding one [`CableSpecification`] to a table repository.
//! Every derived quantity is a method: table-backed values are looked up on
//! demand, formula values take their formula-specific inputs explicitly.
//! Nothing is cached, so the same call always returns the same answer.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::analysis::CableAnalysis;
//! use cable_core::cable::CableSpecification;
//! use cable_core::tables::ReferenceTables;
//!
//! let tables = ReferenceTables::builtin().unwrap();
//! let cable = CableSpecification::parse("XLPE", "copper", "300", "0", 15_000.0).unwrap();
//! let analysis = CableAnalysis::new(&cable, tables);
//!
//! assert_eq!(analysis.conductor_diameter().unwrap(), 20.4);
//! let c = analysis.capacitance(0.8).unwrap();
//! assert!((c - 0.3729).abs() < 1e-4);
//! ```

use num_complex::Complex64;

use crate::cable::CableSpecification;
use crate::calculations::impedance::{
    self, AcResistance, ConductorConditions, ImpedanceInput, ShieldConditions, ShieldResult, Spacing,
};
use crate::correction_factors::{ConductorClass, ConductorFactors, CorrectionFactor, CorrectionFactorResolver, DiameterClass};
use crate::equations;
use crate::errors::CalcResult;
use crate::geometry::{CableGeometry, GeometryResolver};
use crate::materials::MaterialPropertyResolver;
use crate::shield::ShieldSizingResolver;
use crate::tables::TableRepository;

pub struct CableAnalysis<'a, T: TableRepository + ?Sized> {
    cable: &'a CableSpecification,
    tables: &'a T,
}

impl<'a, T: TableRepository + ?Sized> CableAnalysis<'a, T> {
    pub fn new(cable: &'a CableSpecification, tables: &'a T) -> Self {
        Self { cable, tables }
    }

    pub fn cable(&self) -> &CableSpecification {
        self.cable
    }

    fn geometry_resolver(&self) -> GeometryResolver<'a, T> {
        GeometryResolver::new(
            self.tables,
            self.cable.insulation_material(),
            self.cable.section_voltage_selector(),
        )
    }

    fn materials(&self) -> MaterialPropertyResolver<'a, T> {
        MaterialPropertyResolver::new(self.tables)
    }

    fn factors(&self) -> CorrectionFactorResolver<'a, T> {
        CorrectionFactorResolver::new(self.tables)
    }

    // ---- Geometry (Table 4.21) ----

    pub fn geometry(&self) -> CalcResult<CableGeometry> {
        self.geometry_resolver().geometry()
    }

    /// Dc (mm)
    pub fn conductor_diameter(&self) -> CalcResult<f64> {
        self.geometry_resolver().conductor_diameter()
    }

    /// Rc = Dc / 2 (mm)
    pub fn conductor_radius(&self) -> CalcResult<f64> {
        self.geometry_resolver().conductor_radius()
    }

    /// B = A / 2 (mm)
    pub fn distance_b(&self) -> CalcResult<f64> {
        self.geometry_resolver().distance_b()
    }

    /// A (mm)
    pub fn insulation_thickness(&self) -> CalcResult<f64> {
        self.geometry_resolver().insulation_thickness()
    }

    /// External diameter (mm)
    pub fn external_diameter(&self) -> CalcResult<f64> {
        self.geometry_resolver().external_diameter()
    }

    // ---- Materials (Tables 4.6, 4.2) ----

    /// εis of the cable insulation
    pub fn insulation_dielectric_constant(&self) -> CalcResult<f64> {
        self.materials().dielectric_constant(self.cable.insulation_material())
    }

    /// εimp of an impurity such as `"Air"` or `"Water"`
    pub fn impurity_dielectric_constant(&self, impurity: &str) -> CalcResult<f64> {
        self.materials().dielectric_constant_of(impurity)
    }

    /// tg δ of the cable insulation
    pub fn loss_tangent(&self) -> CalcResult<f64> {
        self.materials().loss_tangent(self.cable.insulation_material())
    }

    /// ρ20 of the conductor metal (Ω·mm²/m)
    pub fn resistivity(&self) -> CalcResult<f64> {
        self.materials().resistivity(self.cable.conductor_material())
    }

    /// α20 of the conductor metal (1/°C)
    pub fn temperature_coefficient(&self) -> CalcResult<f64> {
        self.materials().temperature_coefficient(self.cable.conductor_material())
    }

    // ---- Correction factors and shield sizing (Tables 4.7, 4.8) ----

    /// One correction factor. K1 reads the column of the cable's diameter
    /// class; K2, K3 and K4 read the default column.
    pub fn correction_factor(&self, factor: CorrectionFactor, class: ConductorClass) -> CalcResult<f64> {
        let diameter = match factor {
            CorrectionFactor::K1 => self.cable.diameter_selector(),
            _ => DiameterClass::NotApplicable,
        };
        self.factors().factor(factor, class, diameter)
    }

    /// K1, K2, K3 for a stranding and an assembly class
    pub fn conductor_factors(&self, stranding: ConductorClass, assembly: ConductorClass) -> CalcResult<ConductorFactors> {
        self.factors()
            .conductor_factors(stranding, assembly, self.cable.diameter_selector())
    }

    /// Sb (mm²)
    pub fn shield_section(&self, wire_diameter_mm: f64, fault_current_ka: f64) -> CalcResult<f64> {
        ShieldSizingResolver::new(self.tables).shield_section(wire_diameter_mm, fault_current_ka)
    }

    // ---- Dielectric ----

    /// Vb at distance B for an impurity inside the insulation
    pub fn potential_gradient(&self, impurity: &str) -> CalcResult<f64> {
        let geometry = self.geometry()?;
        equations::potential_gradient(
            self.insulation_dielectric_constant()?,
            self.impurity_dielectric_constant(impurity)?,
            self.cable.phase_voltage().0,
            geometry.distance_b_mm(),
            geometry.conductor_radius_mm(),
            geometry.insulation_thickness_mm,
        )
    }

    /// Dsi (mm) for an inner semiconducting shield thickness Ebi
    pub fn diameter_over_insulation(&self, inner_shield_mm: f64) -> CalcResult<f64> {
        Ok(equations::diameter_over_insulation(
            self.conductor_diameter()?,
            self.insulation_thickness()?,
            inner_shield_mm,
        ))
    }

    /// C (µF/km) for an inner semiconducting shield thickness Ebi
    pub fn capacitance(&self, inner_shield_mm: f64) -> CalcResult<f64> {
        equations::capacitance(
            self.insulation_dielectric_constant()?,
            self.conductor_diameter()?,
            self.insulation_thickness()?,
            inner_shield_mm,
        )
    }

    /// Pd at the cable's phase voltage
    pub fn dielectric_loss(&self, capacitance: f64) -> CalcResult<f64> {
        Ok(equations::dielectric_loss(
            capacitance,
            self.cable.phase_voltage().0,
            self.loss_tangent()?,
        ))
    }

    pub fn total_dielectric_loss(&self, dielectric_loss: f64, length: f64) -> f64 {
        equations::total_dielectric_loss(dielectric_loss, length)
    }

    // ---- Resistance ----

    /// Rcc (mΩ/m), with K1..K3 read for the conductor's stranding and
    /// assembly and the cable's diameter class
    pub fn dc_resistance(&self, conductor: &ConductorConditions) -> CalcResult<f64> {
        Ok(self.factored_dc_resistance(conductor)?.1)
    }

    fn factored_dc_resistance(&self, conductor: &ConductorConditions) -> CalcResult<(ConductorFactors, f64)> {
        conductor.validate()?;
        let factors = self.conductor_factors(conductor.stranding, conductor.assembly)?;
        let rcc = equations::dc_resistance(
            factors.k1,
            factors.k2,
            factors.k3,
            self.resistivity()?,
            self.temperature_coefficient()?,
            conductor.temperature_c,
            conductor.section_mm2,
        )?;
        Ok((factors, rcc))
    }

    /// Dmg (mm)
    pub fn geometric_mean_distance(&self, spacing: Spacing) -> CalcResult<f64> {
        spacing.validate()?;
        let distance = match spacing {
            Spacing::CenterToCenter(mm) => mm,
            Spacing::SelfDiameter => self.external_diameter()?,
        };
        Ok(equations::geometric_mean_distance(distance))
    }

    /// K1..K3, Rcc, Ys, Yp and Rp for a geometric mean distance
    pub fn resistance_breakdown(&self, conductor: &ConductorConditions, dmg: f64) -> CalcResult<AcResistance> {
        let (factors, rcc) = self.factored_dc_resistance(conductor)?;
        let ys = equations::skin_effect(rcc)?;
        let yp = equations::proximity_effect(ys, self.conductor_diameter()?, dmg)?;

        Ok(AcResistance {
            factors,
            dc_resistance: rcc,
            skin_effect: ys,
            proximity_effect: yp,
            ac_resistance: equations::ac_resistance(rcc, ys, yp),
        })
    }

    /// Rp (mΩ/m)
    pub fn ac_resistance(&self, conductor: &ConductorConditions, dmg: f64) -> CalcResult<f64> {
        Ok(self.resistance_breakdown(conductor, dmg)?.ac_resistance)
    }

    // ---- Reactance and shield ----

    /// Xp (mΩ/m)
    pub fn positive_sequence_reactance(&self, dmg: f64) -> CalcResult<f64> {
        equations::positive_sequence_reactance(dmg, self.conductor_diameter()?)
    }

    /// Dmb (mm)
    pub fn mean_shield_diameter(&self, shield: &ShieldConditions) -> CalcResult<f64> {
        Ok(equations::mean_shield_diameter(
            self.conductor_diameter()?,
            shield.insulation_mm,
            shield.inner_shield_mm,
            shield.outer_shield_mm,
            shield.metallic_shield_mm,
        ))
    }

    /// Shield quantities Dmb, Sb, K4, Rb, Xb and the grounding reductions
    pub fn shield_parameters(&self, shield: &ShieldConditions, dmg: f64) -> CalcResult<ShieldResult> {
        shield.validate()?;

        let dmb = self.mean_shield_diameter(shield)?;
        let sb = self.shield_section(shield.wire_diameter_mm, shield.fault_current_ka)?;
        let k4 = self.factors().shield_factor(shield.construction)?;
        let properties = self.materials().conductor_properties(shield.material)?;

        let rb = equations::shield_resistance(
            properties.temperature_coefficient_20c,
            properties.resistivity_20c,
            sb,
            shield.temperature_c,
            k4,
        )?;
        let xb = equations::shield_reactance(dmg, dmb)?;
        let reduction = equations::grounding_reduction(rb, xb, shield.mutual_inductance)?;

        Ok(ShieldResult {
            mean_diameter_mm: dmb,
            section_mm2: sb,
            k4,
            resistance: rb,
            reactance: xb,
            reduction,
        })
    }

    /// Zp = Rp + jXp for a shield grounded at one point
    pub fn impedance_single_point(&self, conductor: &ConductorConditions, spacing: Spacing) -> CalcResult<Complex64> {
        let input = ImpedanceInput::single_point("", *conductor, spacing);
        Ok(impedance::calculate(self.cable, self.tables, &input)?.impedance)
    }

    /// Zpf = Rf + jXf for a shield grounded at several points
    pub fn impedance_multi_point(
        &self,
        conductor: &ConductorConditions,
        spacing: Spacing,
        shield: &ShieldConditions,
    ) -> CalcResult<Complex64> {
        let input = ImpedanceInput::multi_point("", *conductor, spacing, *shield);
        Ok(impedance::calculate(self.cable, self.tables, &input)?.impedance)
    }
}
