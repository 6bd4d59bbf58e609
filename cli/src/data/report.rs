//! Discharge rate report over recorded sleep sessions.

use serde::Serialize;

use crate::data::SleepSession;

/// Equality filters applied before aggregation. Unset fields match all rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub bios: Option<String>,
    pub mode: Option<String>,
    pub action: Option<String>,
    pub include_short: bool,
}

impl ReportFilter {
    fn matches(&self, session: &SleepSession) -> bool {
        fn field_matches(filter: &Option<String>, value: &Option<String>) -> bool {
            match filter {
                Some(wanted) => value.as_deref() == Some(wanted.as_str()),
                None => true,
            }
        }

        field_matches(&self.bios, &session.bios_version)
            && field_matches(&self.mode, &session.sleep_mode)
            && field_matches(&self.action, &session.sleep_action)
    }

    /// Chart title, e.g. `bios: X, mode: deep`.
    pub fn title(&self) -> String {
        let mut parts = Vec::new();
        if let Some(bios) = &self.bios {
            parts.push(format!("bios: {}", bios));
        }
        if let Some(mode) = &self.mode {
            parts.push(format!("mode: {}", mode));
        }
        if let Some(action) = &self.action {
            parts.push(format!("action: {}", action));
        }
        parts.join(", ")
    }
}

/// One reported session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPoint {
    pub id: i64,
    pub start_ts: i64,
    pub duration_hours: f64,
    pub energy_used_wh: f64,
    /// Watts, i.e. Wh lost per hour of sleep.
    pub discharge_rate_w: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub points: Vec<SessionPoint>,
    pub mean_rate_w: f64,
    /// Days a full battery lasts in sleep at the mean rate.
    pub est_duration_days: Option<f64>,
    pub total_hours: f64,
    pub session_count: usize,
}

impl Report {
    /// Builds the report, or `None` when no session survives filtering.
    ///
    /// `short_session_secs` is inclusive: a session exactly that long is
    /// short. `full_energy_uwh` of zero means the capacity is unknown.
    pub fn build(
        sessions: &[SleepSession],
        filter: &ReportFilter,
        short_session_secs: i64,
        full_energy_uwh: u64,
    ) -> Option<Self> {
        let points: Vec<SessionPoint> = sessions
            .iter()
            .filter(|s| filter.matches(s))
            .filter_map(|s| session_point(s, filter.include_short, short_session_secs))
            .collect();

        if points.is_empty() {
            return None;
        }

        let session_count = points.len();
        let mean_rate_w =
            points.iter().map(|p| p.discharge_rate_w).sum::<f64>() / session_count as f64;
        let total_hours = points.iter().map(|p| p.duration_hours).sum();
        let est_duration_days = if full_energy_uwh > 0 && mean_rate_w > 0.0 {
            Some(full_energy_uwh as f64 / 1_000_000.0 / mean_rate_w / 24.0)
        } else {
            None
        };

        Some(Self {
            title: filter.title(),
            points,
            mean_rate_w,
            est_duration_days,
            total_hours,
            session_count,
        })
    }

    pub fn max_duration_hours(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.duration_hours)
            .fold(0.0, f64::max)
    }

    pub fn max_rate_w(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.discharge_rate_w)
            .fold(0.0, f64::max)
    }
}

fn session_point(
    session: &SleepSession,
    include_short: bool,
    short_session_secs: i64,
) -> Option<SessionPoint> {
    if !session.is_closed() {
        return None;
    }
    let duration_secs = session.duration_secs()?;
    let energy_used = session.energy_used()?;

    if duration_secs <= 0 {
        return None;
    }
    if !include_short && duration_secs <= short_session_secs {
        return None;
    }

    // Equal or rising energy is sensor noise (or charging during hibernate).
    if energy_used <= 0 {
        return None;
    }

    let duration_hours = duration_secs as f64 / 3600.0;
    let energy_used_wh = energy_used as f64 / 1_000_000.0;

    Some(SessionPoint {
        id: session.id,
        start_ts: session.start_ts,
        duration_hours,
        energy_used_wh,
        discharge_rate_w: energy_used_wh / duration_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THRESHOLD: i64 = 300;

    fn make_session(
        id: i64,
        duration_secs: i64,
        start_energy: i64,
        end_energy: i64,
    ) -> SleepSession {
        SleepSession {
            id,
            bios_version: Some("1.35".to_string()),
            sleep_mode: Some("deep".to_string()),
            sleep_action: Some("suspend".to_string()),
            start_ts: 1_700_000_000,
            end_ts: Some(1_700_000_000 + duration_secs),
            start_energy,
            end_energy: Some(end_energy),
        }
    }

    fn ids(report: &Report) -> Vec<i64> {
        report.points.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_rate_and_aggregates() {
        let sessions = vec![
            make_session(1, 7_200, 50_000_000, 48_000_000),
            make_session(2, 3_600, 50_000_000, 49_000_000),
        ];

        let report =
            Report::build(&sessions, &ReportFilter::default(), THRESHOLD, 48_000_000).unwrap();

        assert_eq!(ids(&report), vec![1, 2]);
        assert!((report.points[0].discharge_rate_w - 1.0).abs() < 1e-9);
        assert!((report.points[1].energy_used_wh - 1.0).abs() < 1e-9);
        assert!((report.mean_rate_w - 1.0).abs() < 1e-9);
        assert!((report.total_hours - 3.0).abs() < 1e-9);
        assert!((report.est_duration_days.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(report.session_count, 2);
        assert_eq!(report.title, "");
        assert!((report.max_duration_hours() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_filters_match_only_equal_fields() {
        let mut other_bios = make_session(2, 3_600, 10_000_000, 9_000_000);
        other_bios.bios_version = Some("1.40".to_string());
        let mut other_mode = make_session(3, 3_600, 10_000_000, 9_000_000);
        other_mode.sleep_mode = Some("s2idle".to_string());
        let mut other_action = make_session(4, 3_600, 10_000_000, 9_000_000);
        other_action.sleep_action = Some("hibernate".to_string());
        let mut no_bios = make_session(5, 3_600, 10_000_000, 9_000_000);
        no_bios.bios_version = None;

        let sessions = vec![
            make_session(1, 3_600, 10_000_000, 9_000_000),
            other_bios,
            other_mode,
            other_action,
            no_bios,
        ];

        let by_bios = ReportFilter {
            bios: Some("1.35".to_string()),
            ..Default::default()
        };
        let report = Report::build(&sessions, &by_bios, THRESHOLD, 0).unwrap();
        assert_eq!(ids(&report), vec![1, 3, 4]);

        let by_mode = ReportFilter {
            mode: Some("s2idle".to_string()),
            ..Default::default()
        };
        let report = Report::build(&sessions, &by_mode, THRESHOLD, 0).unwrap();
        assert_eq!(ids(&report), vec![3]);

        let by_action = ReportFilter {
            action: Some("suspend".to_string()),
            mode: Some("deep".to_string()),
            ..Default::default()
        };
        let report = Report::build(&sessions, &by_action, THRESHOLD, 0).unwrap();
        assert_eq!(ids(&report), vec![1, 2, 5]);
        assert_eq!(report.title, "mode: deep, action: suspend");
    }

    #[test]
    fn test_short_sessions_excluded_unless_requested() {
        let sessions = vec![
            make_session(1, 120, 10_000_000, 9_990_000),
            make_session(2, THRESHOLD, 10_000_000, 9_990_000),
            make_session(3, THRESHOLD + 1, 10_000_000, 9_990_000),
        ];

        let report = Report::build(&sessions, &ReportFilter::default(), THRESHOLD, 0).unwrap();
        assert_eq!(ids(&report), vec![3]);

        let with_short = ReportFilter {
            include_short: true,
            ..Default::default()
        };
        let report = Report::build(&sessions, &with_short, THRESHOLD, 0).unwrap();
        assert_eq!(ids(&report), vec![1, 2, 3]);
    }

    #[test]
    fn test_non_positive_energy_delta_excluded() {
        let sessions = vec![
            make_session(1, 36_000, 10_000_000, 10_000_000),
            make_session(2, 36_000, 10_000_000, 10_500_000),
            make_session(3, 36_000, 10_000_000, 9_000_000),
        ];
        let with_short = ReportFilter {
            include_short: true,
            ..Default::default()
        };

        let report = Report::build(&sessions, &with_short, THRESHOLD, 0).unwrap();
        assert_eq!(ids(&report), vec![3]);
        assert_eq!(report.est_duration_days, None);
    }

    #[test]
    fn test_open_and_zero_length_sessions_excluded() {
        let mut open = make_session(1, 3_600, 10_000_000, 9_000_000);
        open.end_ts = None;
        open.end_energy = None;
        let zero = make_session(2, 0, 10_000_000, 9_000_000);
        let with_short = ReportFilter {
            include_short: true,
            ..Default::default()
        };

        assert_eq!(Report::build(&[open, zero], &with_short, THRESHOLD, 0), None);
        assert_eq!(Report::build(&[], &ReportFilter::default(), THRESHOLD, 0), None);
    }
}
