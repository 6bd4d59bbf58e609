//! System sensors for sntrack.
//!
//! This crate reads the handful of facts sntrack needs around a sleep
//! cycle: whether the machine runs on AC, the active sleep mode, the BIOS
//! version and the battery energy level. Everything comes from files the
//! kernel exposes under `/sys`.
//!
//! Reads never fail hard. A missing or unreadable file is logged and the
//! reading falls back to an empty value.
//!
//! # Example
//!
//! ```ignore
//! use sntrack_platform::{SensorProvider, SysfsSensors};
//!
//! let sensors = SysfsSensors::new();
//! if !sensors.is_on_ac() {
//!     println!("Energy: {:.2}Wh", sensors.battery_energy().now_wh());
//! }
//! ```

mod sensors;
mod sysfs;
mod types;

pub use sensors::{EnergyReading, EnergySource, SensorProvider};
pub use sysfs::{parse_sleep_mode, SysfsSensors, DEFAULT_SYSFS_ROOT};
pub use types::{ParseSleepActionError, SleepAction};
