//! # Unit Types
//!
//! Type-safe wrappers for the electrical units that cross the public API.
//! They are plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! Internally the formula layer works on bare `f64` values in the units the
//! cable design tables use:
//! - Length: millimeters (mm), cable length in meters (m)
//! - Voltage: volts (V)
//! - Resistance / reactance: milliohms per meter (mΩ/m), numerically equal to Ω/km
//! - Capacitance: microfarads per kilometer (µF/km)
//!
//! ## Example
//!
//! ```rust
//! use cable_core::units::{Kilovolts, Volts};
//!
//! let line: Volts = Kilovolts(15.0).into();
//! assert_eq!(line.0, 15_000.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Voltage Units
// ============================================================================

/// Voltage in volts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volts(pub f64);

/// Voltage in kilovolts (1 kV = 1000 V)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilovolts(pub f64);

impl From<Kilovolts> for Volts {
    fn from(kv: Kilovolts) -> Self {
        Volts(kv.0 * 1000.0)
    }
}

impl From<Volts> for Kilovolts {
    fn from(v: Volts) -> Self {
        Kilovolts(v.0 / 1000.0)
    }
}

impl Volts {
    /// Line-to-neutral voltage of a balanced three-phase system
    pub fn line_to_neutral(self) -> Volts {
        Volts(self.0 / 3.0_f64.sqrt())
    }
}

impl std::fmt::Display for Volts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} V", self.0)
    }
}

impl std::fmt::Display for Kilovolts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kV", self.0)
    }
}

// ============================================================================
// Per-length Resistance Units
// ============================================================================

/// Resistance per unit length in milliohms per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilliohmsPerMeter(pub f64);

/// Resistance per unit length in ohms per kilometer
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OhmsPerKilometer(pub f64);

impl From<MilliohmsPerMeter> for OhmsPerKilometer {
    fn from(r: MilliohmsPerMeter) -> Self {
        // 1 mΩ/m = 1e-3 Ω / 1e-3 km
        OhmsPerKilometer(r.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_conversions() {
        let v: Volts = Kilovolts(13.8).into();
        assert!((v.0 - 13_800.0).abs() < 1e-9);

        let kv: Kilovolts = Volts(34_500.0).into();
        assert!((kv.0 - 34.5).abs() < 1e-9);
        assert_eq!(kv.to_string(), "34.5 kV");
    }

    #[test]
    fn test_line_to_neutral() {
        let phase = Volts(15_000.0).line_to_neutral();
        assert!((phase.0 - 8_660.254).abs() < 0.001);
    }

    #[test]
    fn test_resistance_conversions() {
        let r = MilliohmsPerMeter(0.0781);
        let per_km: OhmsPerKilometer = r.into();
        assert!((per_km.0 - 0.0781).abs() < 1e-12);
    }

    #[test]
    fn test_serialization_transparent() {
        let json = serde_json::to_string(&Volts(8660.0)).unwrap();
        assert_eq!(json, "8660.0");
    }
}
