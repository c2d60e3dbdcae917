//! Spectrum widget
//!
//! Hann-windowed FFT of the buzzer output, read at log-spaced frequencies
//! across the piezo's range.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use piezo_fx::{FREQ_MAX_HZ, FREQ_MIN_HZ};

/// Display points across the spectrum
const POINTS: usize = 64;
const FLOOR_DB: f64 = -100.0;

pub struct ToneSpectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin read for each display point
    bins: Vec<usize>,
    /// (log10 Hz, dB) per display point
    points: Vec<(f64, f64)>,
    bin_hz: f32,
}

impl ToneSpectrum {
    /// `size` samples per analysis frame at `sample_rate`.
    pub fn new(size: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);

        let window = (0..size)
            .map(|i| {
                let x = i as f32 / size.saturating_sub(1).max(1) as f32;
                0.5 - 0.5 * (2.0 * std::f32::consts::PI * x).cos()
            })
            .collect();

        let bin_hz = sample_rate / size as f32;
        let top = (FREQ_MAX_HZ.min(sample_rate / 2.0)).max(FREQ_MIN_HZ * 2.0);
        let span = (top / FREQ_MIN_HZ).ln();
        let last_bin = (size / 2).saturating_sub(1);

        let mut bins = Vec::with_capacity(POINTS);
        let mut points = Vec::with_capacity(POINTS);
        for i in 0..POINTS {
            let hz = FREQ_MIN_HZ * (span * i as f32 / (POINTS - 1) as f32).exp();
            bins.push(((hz / bin_hz).round() as usize).min(last_bin));
            points.push(((hz as f64).log10(), FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); size],
            bins,
            points,
            bin_hz,
        }
    }

    /// Analyse the latest frame. Frames of the wrong size are ignored.
    pub fn update(&mut self, frame: &[f32]) {
        if frame.len() != self.window.len() {
            return;
        }

        for ((slot, &s), &w) in self.scratch.iter_mut().zip(frame).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (point, &bin) in self.points.iter_mut().zip(&self.bins) {
            let power = self.scratch[bin].norm_sqr().max(1e-12) as f64;
            point.1 = (10.0 * power.log10()).max(FLOOR_DB);
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Frequency of the strongest display point, if anything rises above the floor.
    pub fn peak_hz(&self) -> Option<f32> {
        let (i, &(_, db)) = self
            .points
            .iter()
            .enumerate()
            .max_by(|a, b| a.1 .1.total_cmp(&b.1 .1))?;
        (db > FLOOR_DB + 20.0).then(|| self.bins[i] as f32 * self.bin_hz)
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &ToneSpectrum) {
    let title = match spectrum.peak_hz() {
        Some(hz) => format!(" Spectrum  peak ~{:.0} Hz ", hz),
        None => " Spectrum ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let points = spectrum.points();
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let lo = (FREQ_MIN_HZ as f64).log10();
    let hi = points.last().map(|p| p.0).unwrap_or(lo + 1.0);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![Span::raw("20"), Span::raw("300"), Span::raw("5k")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 20.0])
                .labels(vec![Span::raw("-100"), Span::raw("-40"), Span::raw("+20")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_pure_tone() {
        let rate = 8_000.0;
        let size = 1024;
        let mut spectrum = ToneSpectrum::new(size, rate);
        let tone: Vec<f32> = (0..size)
            .map(|i| (2.0 * std::f32::consts::PI * 1_000.0 * i as f32 / rate).sin())
            .collect();
        spectrum.update(&tone);

        let peak = spectrum.peak_hz().unwrap();
        assert!((peak - 1_000.0).abs() < 100.0, "peak {}", peak);
    }

    #[test]
    fn test_silence_has_no_peak() {
        let mut spectrum = ToneSpectrum::new(256, 8_000.0);
        spectrum.update(&[0.0; 256]);
        assert_eq!(spectrum.peak_hz(), None);
    }

    #[test]
    fn test_wrong_frame_size_is_ignored() {
        let mut spectrum = ToneSpectrum::new(256, 8_000.0);
        spectrum.update(&[1.0; 100]);
        assert!(spectrum.points().iter().all(|p| p.1 == FLOOR_DB));
    }
}
