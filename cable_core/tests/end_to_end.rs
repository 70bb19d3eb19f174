//! XLPE 300 mm², 8.7/15 kV cable operated at 15 kV, copper conductor.

use cable_core::analysis::CableAnalysis;
use cable_core::calculations::{dielectric, impedance};
use cable_core::calculations::{ConductorConditions, DielectricInput, ImpedanceInput, ShieldConditions, Spacing};
use cable_core::correction_factors::ConductorClass;
use cable_core::tables::{Predicate, ReferenceTables, TableId, TableRepository};
use cable_core::{CableSpecification, CalcError, ConductorMaterial};

fn cable() -> CableSpecification {
    CableSpecification::parse("XLPE", "copper", "300", "0", 15_000.0).unwrap()
}

fn conductor() -> ConductorConditions {
    ConductorConditions::compact_single_core(300.0, 90.0)
}

#[test]
fn phase_voltage_is_line_over_root_three() {
    let cable = cable();
    assert!((cable.phase_voltage().0 - 8660.254037844386).abs() < 1e-9);
}

#[test]
fn dielectric_results() {
    let tables = ReferenceTables::builtin().unwrap();
    let result = dielectric::calculate(&cable(), tables, &DielectricInput::new("run", 0.8, 1000.0, "Air")).unwrap();

    assert_eq!(result.conductor_radius_mm, 10.2);
    assert_eq!(result.insulation_thickness_mm, 4.5);
    assert_eq!(result.distance_b_mm, 2.25);
    assert!((result.potential_gradient - 3804.252).abs() < 0.01);
    assert!((result.capacitance_uf_km - 0.372888).abs() < 1e-5);
}

#[test]
fn single_point_impedance() {
    let tables = ReferenceTables::builtin().unwrap();
    let cable = cable();
    let analysis = CableAnalysis::new(&cable, tables);

    let zp = analysis
        .impedance_single_point(&conductor(), Spacing::CenterToCenter(100.0))
        .unwrap();
    assert!((zp.re - 0.0750188775).abs() < 1e-8);
    assert!((zp.im - 0.2083783369).abs() < 1e-8);

    let touching = analysis.impedance_single_point(&conductor(), Spacing::SelfDiameter).unwrap();
    assert!((touching.re - 0.0759864621).abs() < 1e-8);
    assert!((touching.im - 0.1366037265).abs() < 1e-8);
}

#[test]
fn multi_point_impedance() {
    let tables = ReferenceTables::builtin().unwrap();
    let shield = ShieldConditions {
        material: ConductorMaterial::AnnealedCopperIacs,
        construction: ConductorClass::WireShield,
        wire_diameter_mm: 0.85,
        fault_current_ka: 5.0,
        temperature_c: 70.0,
        insulation_mm: 4.5,
        inner_shield_mm: 0.8,
        outer_shield_mm: 0.8,
        metallic_shield_mm: 0.85,
        mutual_inductance: 1.0,
    };
    let input = ImpedanceInput::multi_point("feeder", conductor(), Spacing::CenterToCenter(100.0), shield);
    let result = impedance::calculate(&cable(), tables, &input).unwrap();

    assert!((result.impedance.re - 0.1116896230).abs() < 1e-8);
    assert!((result.impedance.im - 0.1990319747).abs() < 1e-8);

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["shield"]["reduction"]["delta_lb"].as_f64().unwrap() > 0.0);
}

#[test]
fn dc_resistance_halves_when_section_doubles() {
    let tables = ReferenceTables::builtin().unwrap();
    let cable = cable();
    let analysis = CableAnalysis::new(&cable, tables);

    let r300 = analysis.dc_resistance(&conductor()).unwrap();
    let r600 = analysis.dc_resistance(&ConductorConditions::compact_single_core(600.0, 90.0)).unwrap();
    assert!((r600 - r300 / 2.0).abs() < 1e-12);
}

#[test]
fn dc_resistance_reads_tabulated_factors() {
    let tables = ReferenceTables::builtin().unwrap();
    let classed = CableSpecification::parse("XLPE", "copper", "300", "0.31-0.91", 15_000.0).unwrap();
    let analysis = CableAnalysis::new(&classed, tables);
    let stranded = ConductorConditions::new(300.0, 90.0, ConductorClass::NonCompact, ConductorClass::MultiCore);

    let factors = analysis
        .conductor_factors(ConductorClass::NonCompact, ConductorClass::MultiCore)
        .unwrap();
    assert_eq!((factors.k1, factors.k2, factors.k3), (1.04, 1.02, 1.02));

    // Rcc = 1000·K1·K2·K3·ρ20/S·(1 + α20·(90 - 20))
    let expected = 1000.0 * 1.04 * 1.02 * 1.02 * 0.017241 / 300.0 * (1.0 + 0.00393 * 70.0);
    let rcc = analysis.dc_resistance(&stranded).unwrap();
    assert!((rcc - expected).abs() < 1e-12);

    let plain = cable();
    let r_plain = CableAnalysis::new(&plain, tables).dc_resistance(&conductor()).unwrap();
    assert!((rcc / r_plain - 1.04 * 1.02 * 1.02).abs() < 1e-12);

    let zp_plain = CableAnalysis::new(&plain, tables)
        .impedance_single_point(&conductor(), Spacing::CenterToCenter(100.0))
        .unwrap();
    let zp = analysis
        .impedance_single_point(&stranded, Spacing::CenterToCenter(100.0))
        .unwrap();
    assert!(zp.re > zp_plain.re);
    assert!((zp.im - zp_plain.im).abs() < 1e-12);
}

#[test]
fn unknown_material_is_not_found() {
    let tables = ReferenceTables::builtin().unwrap();
    let err = tables
        .lookup(
            TableId::Insulation,
            &[Predicate::text("material", "Unobtainium")],
            "permittivity",
        )
        .unwrap_err();
    assert!(matches!(err, CalcError::LookupNotFound { .. }));
}

#[test]
fn unlisted_section_is_not_found() {
    let tables = ReferenceTables::builtin().unwrap();
    let cable = CableSpecification::parse("XLPE", "copper", "630", "0", 15_000.0).unwrap();
    let err = CableAnalysis::new(&cable, tables).conductor_diameter().unwrap_err();
    assert_eq!(err.error_code(), "LOOKUP_NOT_FOUND");
}
