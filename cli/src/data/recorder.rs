use chrono::Utc;
use tracing::{debug, info, warn};

use sntrack_platform::{SensorProvider, SleepAction};

use crate::data::{NewSession, SessionMarker, SessionStore, StoreError};

/// Result of a `pre` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreOutcome {
    /// Running on AC, nothing recorded.
    OnAc,
    Opened(i64),
}

/// Result of a `post` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// Running on AC, nothing recorded.
    OnAc,
    /// No marker file, so no session to close.
    NoOpenSession,
    /// Marker could not be parsed and was removed.
    InvalidMarker,
    /// Marker pointed at a missing or already closed session and was removed.
    Stale(i64),
    Closed(i64),
}

/// Opens a session when the system goes to sleep and closes it on resume.
pub struct Recorder<S> {
    store: SessionStore,
    marker: SessionMarker,
    sensors: S,
}

impl<S: SensorProvider> Recorder<S> {
    pub fn new(store: SessionStore, marker: SessionMarker, sensors: S) -> Self {
        Self {
            store,
            marker,
            sensors,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[cfg(test)]
    pub fn marker(&self) -> &SessionMarker {
        &self.marker
    }

    pub fn pre(&self, action: SleepAction) -> Result<PreOutcome, StoreError> {
        self.pre_at(action, Utc::now().timestamp())
    }

    pub fn post(&self, action: SleepAction) -> Result<PostOutcome, StoreError> {
        self.post_at(action, Utc::now().timestamp())
    }

    pub fn pre_at(&self, action: SleepAction, now: i64) -> Result<PreOutcome, StoreError> {
        if self.sensors.is_on_ac() {
            debug!(%action, "On AC power, not recording");
            return Ok(PreOutcome::OnAc);
        }

        match self.marker.read() {
            Ok(Some(orphaned)) => {
                warn!(session_id = orphaned, "Previous session was never closed, abandoning it")
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Replacing unreadable session marker"),
        }

        let energy = self.sensors.battery_energy();
        let session = NewSession {
            bios_version: self.sensors.bios_version(),
            sleep_mode: self.sensors.sleep_mode(),
            sleep_action: action,
            start_ts: now,
            start_energy: energy.now_uwh as i64,
        };

        let id = self.store.insert_session(&session)?;
        self.marker.write(id)?;

        info!(
            session_id = id,
            %action,
            sleep_mode = session.sleep_mode.as_deref().unwrap_or("unknown"),
            energy_wh = energy.now_wh(),
            "Sleep session opened"
        );
        Ok(PreOutcome::Opened(id))
    }

    pub fn post_at(&self, action: SleepAction, now: i64) -> Result<PostOutcome, StoreError> {
        if self.sensors.is_on_ac() {
            debug!(%action, "On AC power, not recording");
            return Ok(PostOutcome::OnAc);
        }

        let id = match self.marker.read() {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!(%action, "No open sleep session");
                return Ok(PostOutcome::NoOpenSession);
            }
            Err(StoreError::InvalidMarker(content)) => {
                warn!(content = %content.trim(), "Discarding invalid session marker");
                self.marker.clear()?;
                return Ok(PostOutcome::InvalidMarker);
            }
            Err(e) => return Err(e),
        };

        if let Some(session) = self.store.get_session(id)? {
            if session.action() != Some(action) {
                debug!(
                    session_id = id,
                    opened_with = session.sleep_action.as_deref().unwrap_or("unknown"),
                    %action,
                    "Sleep action differs from the one that opened the session"
                );
            }
        }

        let energy = self.sensors.battery_energy();
        let closed = self
            .store
            .close_session(id, now, energy.now_uwh as i64)?;
        self.marker.clear()?;

        if !closed {
            warn!(session_id = id, "Marker points to a missing or closed session");
            return Ok(PostOutcome::Stale(id));
        }

        info!(
            session_id = id,
            %action,
            energy_wh = energy.now_wh(),
            "Sleep session closed"
        );
        Ok(PostOutcome::Closed(id))
    }
}
