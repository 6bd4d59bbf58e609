use std::fs;
use std::path::{Path, PathBuf};

use crate::sensors::{EnergyReading, EnergySource, SensorProvider};

pub const DEFAULT_SYSFS_ROOT: &str = "/sys";

const POWER_SUPPLY_DIR: &str = "class/power_supply";
const MEM_SLEEP_FILE: &str = "power/mem_sleep";
const BIOS_VERSION_FILE: &str = "class/dmi/id/bios_version";

/// Sensor readings backed by the Linux sysfs tree.
///
/// The root is configurable so the same code can read a fixture tree.
#[derive(Debug, Clone)]
pub struct SysfsSensors {
    root: PathBuf,
}

impl Default for SysfsSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsSensors {
    pub fn new() -> Self {
        Self::with_root(DEFAULT_SYSFS_ROOT)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_supported(&self) -> bool {
        self.power_supply_dir().exists()
    }

    fn power_supply_dir(&self) -> PathBuf {
        self.root.join(POWER_SUPPLY_DIR)
    }

    /// Power supply entries sorted by name, so `BAT0` wins over `BAT1`.
    fn power_supplies(&self) -> Vec<PathBuf> {
        let dir = self.power_supply_dir();
        let mut supplies: Vec<PathBuf> = match fs::read_dir(&dir) {
            Ok(entries) => entries.flatten().map(|entry| entry.path()).collect(),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to list power supplies");
                return Vec::new();
            }
        };
        supplies.sort();
        supplies
    }

    fn find_supply(&self, name_prefix: &str, supply_type: &str) -> Option<PathBuf> {
        self.power_supplies().into_iter().find(|path| {
            let by_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(name_prefix));
            by_name || read_trimmed(&path.join("type")).as_deref() == Some(supply_type)
        })
    }

    fn find_battery_path(&self) -> Option<PathBuf> {
        self.find_supply("BAT", "Battery")
    }

    fn find_ac_path(&self) -> Option<PathBuf> {
        self.find_supply("AC", "Mains")
    }
}

impl SensorProvider for SysfsSensors {
    fn is_on_ac(&self) -> bool {
        let Some(ac_path) = self.find_ac_path() else {
            tracing::debug!("No AC adapter found, assuming AC power");
            return true;
        };

        let online_path = ac_path.join("online");
        match fs::read_to_string(&online_path) {
            Ok(online) => online.trim() == "1",
            Err(e) => {
                tracing::warn!(
                    path = %online_path.display(),
                    error = %e,
                    "Failed to read AC state, assuming AC power"
                );
                true
            }
        }
    }

    fn sleep_mode(&self) -> Option<String> {
        let path = self.root.join(MEM_SLEEP_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let mode = parse_sleep_mode(&content);
                if mode.is_none() {
                    tracing::warn!(path = %path.display(), content = %content.trim(), "No active sleep mode marked");
                }
                mode
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read sleep mode");
                None
            }
        }
    }

    fn bios_version(&self) -> Option<String> {
        let path = self.root.join(BIOS_VERSION_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let version = content.trim();
                if version.is_empty() {
                    None
                } else {
                    Some(version.to_string())
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read BIOS version");
                None
            }
        }
    }

    fn battery_energy(&self) -> EnergyReading {
        let Some(battery_path) = self.find_battery_path() else {
            tracing::warn!("No battery found");
            return EnergyReading::default();
        };

        if let Some(now_uwh) = read_u64(&battery_path.join("energy_now")) {
            let full_uwh = read_u64(&battery_path.join("energy_full")).unwrap_or(0);
            return EnergyReading {
                now_uwh,
                full_uwh,
                source: EnergySource::Energy,
            };
        }

        let charge_now = read_u64(&battery_path.join("charge_now"));
        let voltage = read_u64(&battery_path.join("voltage_now"));
        if let (Some(charge_now), Some(voltage)) = (charge_now, voltage) {
            let charge_full = read_u64(&battery_path.join("charge_full")).unwrap_or(0);
            return EnergyReading {
                now_uwh: charge_to_energy(charge_now, voltage),
                full_uwh: charge_to_energy(charge_full, voltage),
                source: EnergySource::Charge,
            };
        }

        tracing::warn!(
            path = %battery_path.display(),
            "Battery exposes neither energy_now nor charge_now with voltage_now"
        );
        EnergyReading::default()
    }
}

/// Extracts the bracketed entry from a kernel choice list,
/// e.g. `s2idle [deep]` yields `deep`.
pub fn parse_sleep_mode(content: &str) -> Option<String> {
    let start = content.find('[')? + 1;
    let len = content[start..].find(']')?;
    let mode = content[start..start + len].trim();
    if mode.is_empty() {
        None
    } else {
        Some(mode.to_string())
    }
}

/// µAh × µV → µWh
fn charge_to_energy(charge_uah: u64, voltage_uv: u64) -> u64 {
    (u128::from(charge_uah) * u128::from(voltage_uv) / 1_000_000) as u64
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_u64(path: &Path) -> Option<u64> {
    let content = fs::read_to_string(path).ok()?;
    match content.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Invalid numeric value");
            None
        }
    }
}
