//! Status bar widget - phase, tone, duty, elapsed time and outcome

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use piezo_fx::ShowOutcome;

use super::MonitorState;

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, state: &MonitorState) {
    let block = Block::default().title(" piezo ").borders(Borders::ALL);

    let (run_symbol, run_label, run_color) = match state.outcome {
        Some(ShowOutcome::Completed) => ("■", "Complete".to_string(), Color::Green),
        Some(ShowOutcome::Interrupted { phase }) => ("■", format!("Interrupted ({})", phase), Color::Red),
        None if state.abort_requested => ("…", "Aborting".to_string(), Color::Yellow),
        None => ("▶", "Running".to_string(), Color::Green),
    };

    let phase = state
        .phase
        .map(|p| p.banner())
        .unwrap_or("STANDBY");

    let tone = if state.is_sounding() {
        format!("{:>4} Hz  ", state.frequency_hz)
    } else {
        "  silent  ".to_string()
    };

    let elapsed = state.elapsed();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", run_symbol, run_label),
            Style::default().fg(run_color),
        ),
        Span::styled(
            format!("{}  ", phase),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}/{}  ", state.phases_started, state.total_phases()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(tone, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("Duty: {:>5.1}%  ", state.duty_percent()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("T+{}.{}s", elapsed.as_secs(), elapsed.subsec_millis() / 100),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
