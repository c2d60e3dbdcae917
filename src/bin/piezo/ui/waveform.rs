//! Scope widget for the virtual buzzer output

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Index of the first rising zero crossing, so the square wave stands still.
fn trigger_point(buffer: &[f32]) -> usize {
    buffer
        .windows(2)
        .position(|w| w[0] <= 0.0 && w[1] > 0.0)
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Render `window` samples of the buffer starting at the trigger point
pub fn render_waveform(frame: &mut Frame, area: Rect, buffer: &[f32], window: usize) {
    let block = Block::default().title(" Buzzer ").borders(Borders::ALL);

    let start = trigger_point(buffer).min(buffer.len().saturating_sub(window));
    let shown = &buffer[start..buffer.len().min(start + window)];
    let data: Vec<(f64, f64)> = shown
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 / window as f64, s as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(Axis::default().bounds([0.0, 1.0]).style(Style::default().fg(Color::DarkGray)))
        .y_axis(Axis::default().bounds([-0.3, 0.3]).style(Style::default().fg(Color::DarkGray)));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_on_rising_edge() {
        let buffer = [0.1, -0.2, -0.2, 0.2, 0.2, -0.2];
        assert_eq!(trigger_point(&buffer), 3);
        assert_eq!(trigger_point(&[0.0; 8]), 0);
    }
}
