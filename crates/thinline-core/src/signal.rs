//! Spectral analysis and adaptive decoding.

use std::collections::VecDeque;

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::config::{DecoderConfig, SignalConfig};
use crate::error::{CoreError, CoreResult};

/// Guard added to the median before dividing, so a flat spectrum cannot
/// blow the ratio up to infinity.
const RATIO_EPSILON: f64 = 1e-9;

/// Processed spectrum together with its diagnostic peak ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumResult {
    /// Magnitudes of the non-negative-frequency bins.
    pub spectrum: Vec<f64>,
    /// max(spectrum) / median(spectrum), zero when non-finite.
    pub peak_ratio: f64,
}

/// Magnitude spectrum of a real-valued signal.
///
/// Computes the forward DFT and keeps the non-negative-frequency half
/// (bins k = 0..⌊N/2⌋). When `config.normalize()` is set, magnitudes are
/// divided by (max + epsilon), leaving them in [0, 1].
pub fn fourier_spectrum(signal: &[f64], config: &SignalConfig) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mut buffer: Vec<Complex64> = signal
        .iter()
        .map(|&value| Complex64::new(value, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(signal.len());
    fft.process(&mut buffer);

    let n_bins = signal.len() / 2 + 1;
    let mut magnitudes: Vec<f64> = buffer[..n_bins].iter().map(|bin| bin.norm()).collect();
    if config.normalize() {
        let maximum = magnitudes.iter().copied().fold(0.0_f64, f64::max);
        let scale = maximum + config.epsilon();
        for value in &mut magnitudes {
            *value /= scale;
        }
    }
    magnitudes
}

/// Adaptive peak-over-median decoder for spectral patterns.
///
/// Keeps a bounded history of recent peak ratios and an exponentially
/// smoothed baseline. Detection is a pure threshold read on the baseline;
/// only [`update`](Self::update) mutates decoder state.
#[derive(Debug, Clone)]
pub struct SimpleSpectrumDecoder {
    config: DecoderConfig,
    history: VecDeque<f64>,
    baseline: f64,
}

impl SimpleSpectrumDecoder {
    /// Create a decoder with an empty history and a unit baseline.
    pub fn new(config: DecoderConfig) -> Self {
        let capacity = config.history();
        Self {
            config,
            history: VecDeque::with_capacity(capacity),
            baseline: 1.0,
        }
    }

    /// Fold a new spectrum into the decoder state.
    ///
    /// The peak ratio is appended to the history (oldest entry evicted at
    /// capacity) and the baseline re-smoothed over the history mean.
    ///
    /// # Errors
    /// `EmptySpectrum` when the spectrum has no bins.
    pub fn update(&mut self, spectrum: &[f64]) -> CoreResult<SpectrumResult> {
        if spectrum.is_empty() {
            return Err(CoreError::EmptySpectrum);
        }
        let peak = spectrum.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let med = median(spectrum);
        let mut ratio = peak / (med + RATIO_EPSILON);
        if !ratio.is_finite() {
            ratio = 0.0;
        }

        if self.history.len() == self.config.history() {
            self.history.pop_front();
        }
        self.history.push_back(ratio);

        let averaged = self.history.iter().sum::<f64>() / self.history.len() as f64;
        let smoothing = self.config.smoothing();
        self.baseline = smoothing * averaged + (1.0 - smoothing) * self.baseline;

        Ok(SpectrumResult {
            spectrum: spectrum.to_vec(),
            peak_ratio: ratio,
        })
    }

    /// True when the smoothed baseline has reached the threshold.
    ///
    /// Pure read; never mutates decoder state.
    pub fn detect(&self) -> bool {
        self.baseline >= self.config.threshold()
    }

    /// Current smoothed baseline.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }
}

/// Median of a non-empty slice; even lengths average the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
