mod chart;

use ratatui::Frame;

use crate::data::Report;

pub fn render(frame: &mut Frame, report: &Report) {
    let area = frame.area();
    chart::render(frame, area, report);
}
