use crate::models::{AlarmStatus, WEEKDAYS};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use ratatui_macros::span;

/// Renders the alarm: headline label, time and enabled controls, and
/// the weekday toggles. Always draws from the last synced status so a
/// stale local edit can never linger on screen.
pub struct AlarmPanel;

impl AlarmPanel {
    pub fn render(f: &mut Frame, area: Rect, status: Option<&AlarmStatus>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(Line::from(" Alarm ").bold());

        let lines = match status {
            Some(status) => build_lines(status),
            None => vec![Line::from(span!("Waiting for device...").dim())],
        };

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn build_lines(status: &AlarmStatus) -> Vec<Line<'_>> {
    let state = status.state();

    let headline = if state.enabled {
        Line::from(span!(status.summary()).bold().green())
    } else {
        Line::from(span!("Disabled").bold().red())
    };

    let controls = Line::from(vec![
        span!("Time: ").gray(),
        span!(state.time.clone()).white().bold(),
        span!("   Enabled: ").gray(),
        if state.enabled {
            span!("[x]").green()
        } else {
            span!("[ ]").red()
        },
    ]);

    let mut days: Vec<Span> = vec![];
    for (i, day) in WEEKDAYS.iter().enumerate() {
        let marker = if state.has_day(day) {
            span!(format!("[{}] {}", i + 1, day)).green()
        } else {
            span!(format!("[{}] {}", i + 1, day)).dim()
        };
        days.push(marker);
        days.push(span!("  "));
    }

    vec![headline, controls, Line::from(days)]
}
