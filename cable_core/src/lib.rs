//! # cable_core - Medium-Voltage Cable Parameter Engine
//!
//! `cable_core` derives the electrical parameters of shielded single-core
//! medium-voltage cables from tabulated reference data: geometry, material
//! constants, correction factors and shield sections. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Quantities are computed on demand from an immutable cable
//!   description and an injected table repository
//! - **Exact lookups**: Table queries match exactly and never fall back to a
//!   default; a missing entry is an error
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_core::analysis::CableAnalysis;
//! use cable_core::calculations::{ConductorConditions, Spacing};
//! use cable_core::{CableSpecification, ReferenceTables};
//!
//! let tables = ReferenceTables::builtin().unwrap();
//! let cable = CableSpecification::parse("XLPE", "copper", "300", "0", 15_000.0).unwrap();
//! let analysis = CableAnalysis::new(&cable, tables);
//!
//! let zp = analysis
//!     .impedance_single_point(&ConductorConditions::compact_single_core(300.0, 90.0), Spacing::CenterToCenter(100.0))
//!     .unwrap();
//! assert!(zp.re > 0.0 && zp.im > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`cable`] - Cable specification and its closed enums
//! - [`tables`] - Reference tables, lookup predicates, the repository trait
//! - [`geometry`], [`materials`], [`correction_factors`], [`shield`] - Table resolvers
//! - [`equations`] - Pure cable formulas
//! - [`analysis`] - Per-cable query facade
//! - [`calculations`] - Report-ready Input/Result bundles
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod cable;
pub mod calculations;
pub mod correction_factors;
pub mod equations;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod shield;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::CableAnalysis;
pub use cable::{CableSpecification, ConductorMaterial, InsulationMaterial, SectionVoltageSelector};
pub use errors::{CalcError, CalcResult};
pub use tables::{ReferenceTables, TableRepository};
