//! LED panel and status log pane

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use piezo_fx::Led;

use super::MonitorState;

pub fn render_leds(frame: &mut Frame, area: Rect, state: &MonitorState) {
    let block = Block::default().title(" LEDs ").borders(Borders::ALL);

    let lines: Vec<Line> = Led::ALL
        .iter()
        .map(|&led| {
            let (name, color) = match led {
                Led::Green => ("GREEN", Color::Green),
                Led::Red => ("RED", Color::Red),
            };
            let lamp = if state.led(led) {
                Span::styled(" ●  ", Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                Span::styled(" ○  ", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![lamp, Span::raw(name)])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Most recent log lines, newest at the bottom.
pub fn render_log(frame: &mut Frame, area: Rect, state: &MonitorState) {
    let block = Block::default().title(" Log ").borders(Borders::ALL);
    let visible = area.height.saturating_sub(2) as usize;

    let skip = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .log
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.starts_with('[') {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(line.as_str(), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
