//! Eased frequency sweeps.
//!
//! A sweep is a straight line from `start_hz` to `end_hz`, optionally bent by
//! a power curve. `SweepSteps` yields one target frequency per step; the
//! synthesizer turns each into a `ToneSample` and the caller paces them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::iter::FusedIterator;

use crate::SAMPLE_RATE;

/// Parameters of one sweep.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_ms: u32,
    /// 1.0 is linear; >1.0 starts slow and accelerates, <1.0 starts fast.
    pub curve_exponent: f32,
}

impl SweepSpec {
    pub fn new(start_hz: f32, end_hz: f32, duration_ms: u32, curve_exponent: f32) -> Self {
        Self {
            start_hz,
            end_hz,
            duration_ms,
            curve_exponent,
        }
    }

    pub fn linear(start_hz: f32, end_hz: f32, duration_ms: u32) -> Self {
        Self::new(start_hz, end_hz, duration_ms, 1.0)
    }

    /// `duration_ms * SAMPLE_RATE / 1000`, truncated.
    pub fn total_steps(&self) -> usize {
        (self.duration_ms as u64 * SAMPLE_RATE as u64 / 1000) as usize
    }

    /// Target frequency at step `index` of `total`.
    pub fn frequency_at(&self, index: usize, total: usize) -> f32 {
        if total == 0 {
            return self.start_hz;
        }
        let t = ease(index as f32 / total as f32, self.curve_exponent);
        self.start_hz + (self.end_hz - self.start_hz) * t
    }

    pub fn steps(&self) -> SweepSteps {
        SweepSteps {
            spec: *self,
            index: 0,
            total: self.total_steps(),
        }
    }
}

/// Apply the power-curve easing. `t` is expected in `[0, 1]`.
#[inline]
pub fn ease(t: f32, curve_exponent: f32) -> f32 {
    if curve_exponent != 1.0 {
        t.powf(curve_exponent)
    } else {
        t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepStep {
    pub index: usize,
    pub total: usize,
    pub frequency_hz: f32,
}

/// Lazy, finite step sequence for a sweep. Consumed once.
#[derive(Debug)]
pub struct SweepSteps {
    spec: SweepSpec,
    index: usize,
    total: usize,
}

impl Iterator for SweepSteps {
    type Item = SweepStep;

    fn next(&mut self) -> Option<SweepStep> {
        if self.index >= self.total {
            return None;
        }
        let step = SweepStep {
            index: self.index,
            total: self.total,
            frequency_hz: self.spec.frequency_at(self.index, self.total),
        };
        self.index += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepSteps {}
impl FusedIterator for SweepSteps {}
