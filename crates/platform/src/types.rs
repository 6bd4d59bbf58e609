//! Shared types for sleep tracking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The systemd sleep action that triggered a hook.
///
/// See `systemd-suspend.service(8)` for the meaning of each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SleepAction {
    /// Suspend to RAM
    Suspend,
    /// Suspend to disk
    Hibernate,
    /// Suspend to RAM and disk at the same time
    HybridSleep,
    /// Suspend to RAM, then hibernate after a delay
    SuspendThenHibernate,
}

impl SleepAction {
    pub const ALL: [SleepAction; 4] = [
        SleepAction::Suspend,
        SleepAction::Hibernate,
        SleepAction::HybridSleep,
        SleepAction::SuspendThenHibernate,
    ];

    /// Returns the identifier systemd uses for this action.
    pub fn label(&self) -> &'static str {
        match self {
            SleepAction::Suspend => "suspend",
            SleepAction::Hibernate => "hibernate",
            SleepAction::HybridSleep => "hybrid-sleep",
            SleepAction::SuspendThenHibernate => "suspend-then-hibernate",
        }
    }
}

impl fmt::Display for SleepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSleepActionError(String);

impl fmt::Display for ParseSleepActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = SleepAction::ALL.iter().map(|a| a.label()).collect();
        write!(
            f,
            "unknown sleep action '{}' (expected one of: {})",
            self.0,
            valid.join(", ")
        )
    }
}

impl std::error::Error for ParseSleepActionError {}

impl FromStr for SleepAction {
    type Err = ParseSleepActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SleepAction::ALL
            .into_iter()
            .find(|action| action.label() == s.trim())
            .ok_or_else(|| ParseSleepActionError(s.to_string()))
    }
}
