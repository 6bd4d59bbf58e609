use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use crate::data::Report;

const DASH_SEGMENTS: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, report: &Report) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    render_chart(frame, chunks[0], report);
    render_stats(frame, chunks[1], report);
}

fn render_chart(frame: &mut Frame, area: Rect, report: &Report) {
    let title = if report.title.is_empty() {
        " Discharge rate during sleep ".to_string()
    } else {
        format!(" {} ", report.title)
    };

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let points: Vec<(f64, f64)> = report
        .points
        .iter()
        .map(|p| (p.duration_hours, p.discharge_rate_w))
        .collect();

    let max_x = nice_upper_bound(report.max_duration_hours());
    let max_y = nice_upper_bound(report.max_rate_w());
    let mean_line = dashed_line(report.max_duration_hours(), report.mean_rate_w);

    let rate_dataset = Dataset::default()
        .name("discharge rate")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);

    let mean_dataset = Dataset::default()
        .name(format!("mean discharge rate: {:.2}", report.mean_rate_w))
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Magenta))
        .data(&mean_line);

    let muted = Style::default().fg(Color::Gray);
    let x_axis = Axis::default()
        .title(Span::styled("duration (h)", muted))
        .style(muted)
        .bounds([0.0, max_x])
        .labels(axis_labels(max_x, muted));

    let y_axis = Axis::default()
        .title(Span::styled("discharge rate (W)", muted))
        .style(muted)
        .bounds([0.0, max_y])
        .labels(axis_labels(max_y, muted));

    let chart = Chart::new(vec![rate_dataset, mean_dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Percentage(60), Constraint::Percentage(40)));

    frame.render_widget(chart, area);
}

fn render_stats(frame: &mut Frame, area: Rect, report: &Report) {
    let est = report
        .est_duration_days
        .map(|d| format!("{:.1}", d))
        .unwrap_or_else(|| "n/a".to_string());

    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("est. duration (days): ", label),
        Span::styled(est, value),
        Span::styled("  |  total time (h): ", label),
        Span::styled(format!("{:.1}", report.total_hours), value),
        Span::styled("  |  total sessions: ", label),
        Span::styled(report.session_count.to_string(), value),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title_bottom(Line::from(" q: quit ").right_aligned()),
        );

    frame.render_widget(paragraph, area);
}

/// Every other segment of a horizontal line from x=0 to `max_x`.
fn dashed_line(max_x: f64, y: f64) -> Vec<(f64, f64)> {
    (0..=DASH_SEGMENTS)
        .filter(|i| i % 2 == 0)
        .map(|i| (max_x * i as f64 / DASH_SEGMENTS as f64, y))
        .collect()
}

/// Rounds up to 1, 2 or 5 times a power of ten, with 10% headroom.
fn nice_upper_bound(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    let padded = value * 1.1;
    let magnitude = 10f64.powf(padded.log10().floor());
    let normalized = padded / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn axis_labels(max: f64, style: Style) -> Vec<Span<'static>> {
    let precision = if max < 2.0 { 2 } else { 1 };
    (0..=4)
        .map(|i| Span::styled(format!("{:.*}", precision, max * i as f64 / 4.0), style))
        .collect()
}
