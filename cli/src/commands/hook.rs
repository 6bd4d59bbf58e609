//! `pre` and `post` sleep hooks.

use color_eyre::eyre::Result;
use sntrack_platform::SleepAction;

use crate::config::UserConfig;
use crate::data::{PostOutcome, PreOutcome, Recorder, SessionMarker};

fn recorder(config: &UserConfig) -> Recorder<sntrack_platform::SysfsSensors> {
    Recorder::new(
        super::open_store(config),
        SessionMarker::new(&config.marker_path),
        super::sensors(config),
    )
}

pub fn run_pre(config: &UserConfig, action: SleepAction) -> Result<()> {
    match recorder(config).pre(action)? {
        PreOutcome::OnAc => tracing::debug!("Skipped pre hook on AC power"),
        PreOutcome::Opened(id) => tracing::debug!(session_id = id, "Pre hook done"),
    }
    Ok(())
}

pub fn run_post(config: &UserConfig, action: SleepAction) -> Result<()> {
    match recorder(config).post(action)? {
        PostOutcome::Closed(id) => tracing::debug!(session_id = id, "Post hook done"),
        outcome => tracing::debug!(?outcome, "Post hook recorded nothing"),
    }
    Ok(())
}
