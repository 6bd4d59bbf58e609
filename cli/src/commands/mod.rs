pub mod config;
pub mod debug;
pub mod hook;
pub mod list;
pub mod plot;

use crate::config::UserConfig;
use crate::data::{Report, ReportFilter, SessionStore};
use sntrack_platform::{SensorProvider, SysfsSensors};

/// Opens the session database or exits; nothing useful can run without it.
fn open_store(config: &UserConfig) -> SessionStore {
    match SessionStore::open(&config.database_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(path = %config.database_path.display(), error = %e, "Unable to open database");
            eprintln!(
                "Failed to open session database {}: {}",
                config.database_path.display(),
                e
            );
            std::process::exit(1);
        }
    }
}

fn sensors(config: &UserConfig) -> SysfsSensors {
    SysfsSensors::with_root(&config.sysfs_root)
}

/// Loads every session and builds the filtered report.
fn build_report(
    config: &UserConfig,
    filter: &ReportFilter,
) -> color_eyre::eyre::Result<Option<Report>> {
    let store = open_store(config);
    let sessions = store.get_sessions()?;
    let full_energy = sensors(config).battery_energy().full_uwh;

    tracing::debug!(
        total = sessions.len(),
        ?filter,
        "Building discharge report"
    );

    let report = Report::build(&sessions, filter, config.short_session_secs, full_energy);
    if report.is_none() {
        tracing::info!("nothing to plot");
    }
    Ok(report)
}
