//! Sensor traits and readings.

use serde::Serialize;

/// Where a battery energy reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    /// `energy_now` / `energy_full`, already in µWh.
    Energy,
    /// Derived from `charge_*` (µAh) and `voltage_now` (µV).
    Charge,
    /// No battery, or its files could not be read.
    #[default]
    Unavailable,
}

impl EnergySource {
    pub fn label(&self) -> &'static str {
        match self {
            EnergySource::Energy => "energy",
            EnergySource::Charge => "charge x voltage",
            EnergySource::Unavailable => "unavailable",
        }
    }
}

/// Battery energy snapshot in microwatt-hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EnergyReading {
    /// Energy currently stored.
    pub now_uwh: u64,

    /// Energy stored when fully charged (last full charge capacity).
    pub full_uwh: u64,

    pub source: EnergySource,
}

impl EnergyReading {
    pub fn now_wh(&self) -> f64 {
        self.now_uwh as f64 / 1_000_000.0
    }

    pub fn full_wh(&self) -> f64 {
        self.full_uwh as f64 / 1_000_000.0
    }

    /// Charge level as a percentage, if the full capacity is known.
    pub fn percent(&self) -> Option<f64> {
        if self.full_uwh == 0 {
            return None;
        }
        Some(self.now_uwh as f64 / self.full_uwh as f64 * 100.0)
    }
}

/// Source of the system facts recorded around a sleep cycle.
///
/// Implementations must not fail: unreadable values are logged and
/// reported as `None` or zero.
pub trait SensorProvider {
    /// Whether the system currently draws from an external power source.
    fn is_on_ac(&self) -> bool;

    /// Active suspend-to-RAM mode, e.g. `deep` or `s2idle`.
    fn sleep_mode(&self) -> Option<String>;

    /// Firmware version string.
    fn bios_version(&self) -> Option<String>;

    /// Current and full battery energy.
    fn battery_energy(&self) -> EnergyReading;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_reading_conversions() {
        let reading = EnergyReading {
            now_uwh: 25_500_000,
            full_uwh: 51_000_000,
            source: EnergySource::Energy,
        };

        assert!((reading.now_wh() - 25.5).abs() < f64::EPSILON);
        assert!((reading.full_wh() - 51.0).abs() < f64::EPSILON);
        assert!((reading.percent().unwrap() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_unavailable_reading_has_no_percent() {
        let reading = EnergyReading::default();
        assert_eq!(reading.source, EnergySource::Unavailable);
        assert!(reading.percent().is_none());
    }
}
