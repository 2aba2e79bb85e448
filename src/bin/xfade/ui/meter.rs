//! Crossfade position and output level gauges

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use super::UiStateUpdate;

/// Render the A↔B position and the output peak side by side
pub fn render_meters(frame: &mut Frame, area: Rect, state: &UiStateUpdate) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let position = state.level.clamp(0.0, 1.0) as f64;
    let out_of_range = state.level < 0.0 || state.level > 1.0;
    let position_gauge = Gauge::default()
        .block(Block::default().title(" A ◀──▶ B ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(if out_of_range {
            Color::Red
        } else {
            Color::Cyan
        }))
        .ratio(position)
        .label(format!("{:+.2}", state.level));
    frame.render_widget(position_gauge, chunks[0]);

    let peak = state.peak.clamp(0.0, 1.0) as f64;
    let peak_gauge = Gauge::default()
        .block(Block::default().title(" Output peak ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(if peak >= 0.99 {
            Color::Red
        } else {
            Color::Green
        }))
        .ratio(peak)
        .label(format!("{:.2}", peak));
    frame.render_widget(peak_gauge, chunks[1]);
}
