//! Closed-loop orchestration of the evolve → measure → decode → feedback
//! cycle.
//!
//! [`ThinLineCore`] owns one state vector, one decoder, one random
//! generator, and the four configuration bundles. Each step entangles the
//! register, nudges it with a global phase rotation, samples measurement
//! counts, lifts them into a magnitude spectrum, and feeds the decoder's
//! decision back into the state as a conditional phase rotation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DecoderConfig, FeedbackConfig, QuantumConfig, SignalConfig};
use crate::dynamics::{Gate2, apply_single_qubit_gate, entangle_chain};
use crate::error::{CoreError, CoreResult};
use crate::measurement::{counts_to_signal, sample_counts};
use crate::signal::{SimpleSpectrumDecoder, SpectrumResult, fourier_spectrum};
use crate::state::{StateVector, normalize, uniform_superposition};

/// Fine-structure-like scale for the per-step global phase rotation.
pub const ALPHA: f64 = 1.0 / 137.0;

/// Result of a single simulation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Index of the step that produced this record.
    pub step: usize,
    /// Decoder decision after folding in this step's spectrum.
    pub detected_pattern: bool,
    /// Peak-over-median ratio of this step's spectrum.
    pub peak_ratio: f64,
    /// Magnitude spectrum snapshot.
    pub spectrum: Vec<f64>,
}

/// Coordinates the thin-line feedback loop.
///
/// Fully sequential: each step evolves the state left behind by the
/// previous one, so steps cannot be reordered or parallelized. Instances
/// are independent of each other.
pub struct ThinLineCore<R: Rng = StdRng> {
    quantum: QuantumConfig,
    signal: SignalConfig,
    feedback: FeedbackConfig,
    rng: R,
    decoder: SimpleSpectrumDecoder,
    state: StateVector,
}

impl ThinLineCore<StdRng> {
    /// Create a core whose generator is seeded from
    /// [`QuantumConfig::random_seed`], or from entropy when unseeded.
    pub fn new(
        quantum: QuantumConfig,
        signal: SignalConfig,
        feedback: FeedbackConfig,
        decoder: DecoderConfig,
    ) -> CoreResult<Self> {
        let rng = match quantum.random_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(quantum, signal, feedback, decoder, rng)
    }

    /// Create a core with every configuration at its default.
    pub fn with_defaults() -> CoreResult<Self> {
        Self::new(
            QuantumConfig::default(),
            SignalConfig::default(),
            FeedbackConfig::default(),
            DecoderConfig::default(),
        )
    }
}

impl<R: Rng> ThinLineCore<R> {
    /// Create a core around a caller-supplied random generator.
    ///
    /// Seeding the generator makes runs reproducible and lets independent
    /// test runs use independent streams.
    pub fn with_rng(
        quantum: QuantumConfig,
        signal: SignalConfig,
        feedback: FeedbackConfig,
        decoder: DecoderConfig,
        rng: R,
    ) -> CoreResult<Self> {
        let state = normalize(&uniform_superposition(quantum.n_qubits()))?;
        Ok(Self {
            quantum,
            signal,
            feedback,
            rng,
            decoder: SimpleSpectrumDecoder::new(decoder),
            state,
        })
    }

    /// Snapshot of the current state vector.
    pub fn state(&self) -> StateVector {
        self.state.clone()
    }

    fn apply_feedback(&mut self, detected: bool) -> CoreResult<()> {
        let (angle, target) = if detected {
            (self.feedback.pattern_rotation(), self.feedback.target_qubit())
        } else {
            (self.feedback.noise_rotation(), self.feedback.perturb_qubit())
        };
        let gate = Gate2::rz(angle);
        self.state =
            apply_single_qubit_gate(&self.state, &gate, target, self.quantum.n_qubits())?;
        Ok(())
    }

    /// Advance the simulation by one iteration.
    ///
    /// On error the internal state is left unspecified and the instance
    /// should be discarded.
    pub fn step(&mut self, step_index: usize) -> CoreResult<StepResult> {
        let n_qubits = self.quantum.n_qubits();

        self.state = entangle_chain(&self.state, n_qubits)?;
        let rotation = Gate2::rz(self.quantum.coupling_strength() * ALPHA);
        self.state = apply_single_qubit_gate(&self.state, &rotation, 0, n_qubits)?;

        let counts = sample_counts(&self.state, self.quantum.shots(), &mut self.rng)?;
        let signal = counts_to_signal(&counts)?;
        let spectrum = fourier_spectrum(&signal, &self.signal);
        let spectrum_result: SpectrumResult = self.decoder.update(&spectrum)?;
        let detected = self.decoder.detect();

        self.apply_feedback(detected)?;
        self.state = normalize(&self.state)?;

        debug!(
            step = step_index,
            detected,
            peak_ratio = spectrum_result.peak_ratio,
            baseline = self.decoder.baseline(),
            "completed step"
        );

        Ok(StepResult {
            step: step_index,
            detected_pattern: detected,
            peak_ratio: spectrum_result.peak_ratio,
            spectrum: spectrum_result.spectrum,
        })
    }

    /// Run the feedback loop for `num_steps` iterations, collecting results
    /// in step order.
    ///
    /// # Errors
    /// `InvalidSteps` when `num_steps` is zero, plus any step failure.
    pub fn run(&mut self, num_steps: usize) -> CoreResult<Vec<StepResult>> {
        if num_steps == 0 {
            return Err(CoreError::InvalidSteps(num_steps));
        }
        debug!(
            num_steps,
            n_qubits = self.quantum.n_qubits(),
            shots = self.quantum.shots(),
            "starting run"
        );
        let mut results = Vec::with_capacity(num_steps);
        for index in 0..num_steps {
            results.push(self.step(index)?);
        }
        Ok(results)
    }
}
