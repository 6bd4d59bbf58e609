use chrono::{Local, TimeZone};
use color_eyre::eyre::Result;

use crate::config::UserConfig;
use crate::data::{Report, ReportFilter};

pub fn run(config: &UserConfig, filter: ReportFilter, json: bool) -> Result<()> {
    let Some(report) = super::build_report(config, &filter)? else {
        if json {
            println!("null");
        } else {
            println!("No sessions match.");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", format_report(&report));
    Ok(())
}

fn format_report(report: &Report) -> String {
    let mut out = String::new();

    if !report.title.is_empty() {
        out.push_str(&format!("Sleep sessions ({})\n", report.title));
    } else {
        out.push_str("Sleep sessions\n");
    }
    out.push_str(&format!("{}\n", "=".repeat(66)));
    out.push_str(&format!(
        "{:>6} {:<20} {:>10} {:>12} {:>14}\n",
        "ID", "Started", "Duration", "Energy (Wh)", "Rate (W)"
    ));
    out.push_str(&format!("{}\n", "-".repeat(66)));

    for point in &report.points {
        out.push_str(&format!(
            "{:>6} {:<20} {:>10} {:>12.2} {:>14.3}\n",
            point.id,
            format_timestamp(point.start_ts),
            format_hours(point.duration_hours),
            point.energy_used_wh,
            point.discharge_rate_w
        ));
    }

    out.push_str(&format!("{}\n", "-".repeat(66)));
    out.push_str(&format!(
        "Mean discharge rate:   {:.2} W\n",
        report.mean_rate_w
    ));
    match report.est_duration_days {
        Some(days) => out.push_str(&format!("Est. duration:         {:.1} days\n", days)),
        None => out.push_str("Est. duration:         n/a\n"),
    }
    out.push_str(&format!("Total time:            {:.1} h\n", report.total_hours));
    out.push_str(&format!("Total sessions:        {}\n", report.session_count));

    out
}

fn format_timestamp(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn format_hours(hours: f64) -> String {
    let total_mins = (hours * 60.0).round() as i64;
    let h = total_mins / 60;
    let m = total_mins % 60;
    if h > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}m", m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SessionPoint;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.5), "30m");
        assert_eq!(format_hours(7.25), "7h 15m");
        assert_eq!(format_hours(1.0), "1h 0m");
    }

    #[test]
    fn test_format_report_summary() {
        let report = Report {
            title: "action: suspend".to_string(),
            points: vec![SessionPoint {
                id: 12,
                start_ts: 1_700_000_000,
                duration_hours: 8.0,
                energy_used_wh: 4.0,
                discharge_rate_w: 0.5,
            }],
            mean_rate_w: 0.5,
            est_duration_days: None,
            total_hours: 8.0,
            session_count: 1,
        };

        let text = format_report(&report);
        assert!(text.starts_with("Sleep sessions (action: suspend)\n"));
        assert!(text.contains("8h 0m"));
        assert!(text.contains("Mean discharge rate:   0.50 W"));
        assert!(text.contains("Est. duration:         n/a"));
        assert!(text.contains("Total sessions:        1"));
    }
}
