use std::path::Path;

use color_eyre::eyre::Result;
use sntrack_platform::SensorProvider;

use crate::config::UserConfig;
use crate::data::{SessionMarker, SessionStore};
use crate::logging;

pub fn run(config: &UserConfig, config_file: &Path) -> Result<()> {
    println!("sntrack debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- Sensors ---");
    let sensors = super::sensors(config);
    if !sensors.is_supported() {
        println!(
            "Warning: no power supplies under {}",
            sensors.root().display()
        );
    }
    println!(
        "Power source: {}",
        if sensors.is_on_ac() { "AC" } else { "Battery" }
    );
    println!(
        "Sleep mode: {}",
        sensors.sleep_mode().as_deref().unwrap_or("Unknown")
    );
    println!(
        "BIOS version: {}",
        sensors.bios_version().as_deref().unwrap_or("Unknown")
    );

    let energy = sensors.battery_energy();
    println!("Energy source: {}", energy.source.label());
    println!("Energy now: {:.2}Wh", energy.now_wh());
    println!("Energy full: {:.2}Wh", energy.full_wh());
    if let Some(percent) = energy.percent() {
        println!("Charge: {:.1}%", percent);
    }

    println!("\n--- Sessions ---");
    let marker = SessionMarker::new(&config.marker_path);
    match marker.read() {
        Ok(Some(id)) => println!("Open session: #{}", id),
        Ok(None) => println!("Open session: none"),
        Err(e) => println!("Open session: unreadable marker ({})", e),
    }
    match SessionStore::open(&config.database_path) {
        Ok(store) => println!("Stored sessions: {}", store.session_count()?),
        Err(e) => println!("Stored sessions: database unavailable ({})", e),
    }

    println!("\n--- Paths ---");
    println!("Config: {}", config_file.display());
    println!("Database: {}", config.database_path.display());
    println!("Marker: {}", marker.path().display());
    println!("Sysfs root: {}", config.sysfs_root.display());
    println!("Logs: {}", logging::log_dir().display());

    println!("\n--- Current Config ---");
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
