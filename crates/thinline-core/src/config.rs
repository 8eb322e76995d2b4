//! Configuration bundles for the simulation core.
//!
//! Each bundle is validated eagerly in its constructor and is immutable
//! afterwards, so invariant violations surface before any simulation work
//! starts. The `Default` impls carry parameters that satisfy every
//! invariant by construction.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Base quantum model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumConfig {
    n_qubits: usize,
    shots: u32,
    coupling_strength: f64,
    random_seed: Option<u64>,
}

impl QuantumConfig {
    /// Create a validated quantum configuration.
    ///
    /// # Errors
    /// `InvalidConfig` when `n_qubits` or `shots` is zero, or
    /// `coupling_strength` is negative.
    pub fn new(n_qubits: usize, shots: u32, coupling_strength: f64) -> CoreResult<Self> {
        if n_qubits == 0 {
            return Err(CoreError::InvalidConfig("n_qubits must be positive".into()));
        }
        if shots == 0 {
            return Err(CoreError::InvalidConfig("shots must be positive".into()));
        }
        if coupling_strength < 0.0 {
            return Err(CoreError::InvalidConfig(
                "coupling_strength must be non-negative".into(),
            ));
        }
        Ok(Self {
            n_qubits,
            shots,
            coupling_strength,
            random_seed: None,
        })
    }

    /// Fix the random seed for deterministic replay.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Number of qubits in the register.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Measurement samples drawn per step.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Scale of the per-step global phase rotation.
    pub fn coupling_strength(&self) -> f64 {
        self.coupling_strength
    }

    /// Seed for the owned random generator, if fixed.
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self {
            n_qubits: 6,
            shots: 256,
            coupling_strength: 0.1,
            random_seed: None,
        }
    }
}

/// Parameters for converting measurements into spectra.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    normalize: bool,
    epsilon: f64,
}

impl SignalConfig {
    /// Create a validated signal configuration.
    ///
    /// # Errors
    /// `InvalidConfig` when `epsilon` is not strictly positive.
    pub fn new(normalize: bool, epsilon: f64) -> CoreResult<Self> {
        if epsilon <= 0.0 {
            return Err(CoreError::InvalidConfig("epsilon must be positive".into()));
        }
        Ok(Self { normalize, epsilon })
    }

    /// Whether spectra are rescaled into [0, 1].
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// Divisor guard used when rescaling.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            epsilon: 1e-12,
        }
    }
}

/// Feedback actions applied to the circuit after each decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    pattern_rotation: f64,
    noise_rotation: f64,
    target_qubit: usize,
    perturb_qubit: usize,
}

impl FeedbackConfig {
    /// Create a validated feedback configuration.
    ///
    /// Qubit indices are range-checked against the register at gate
    /// application, not here.
    ///
    /// # Errors
    /// `InvalidConfig` when either rotation angle is negative.
    pub fn new(
        pattern_rotation: f64,
        noise_rotation: f64,
        target_qubit: usize,
        perturb_qubit: usize,
    ) -> CoreResult<Self> {
        if pattern_rotation < 0.0 {
            return Err(CoreError::InvalidConfig(
                "pattern_rotation must be non-negative".into(),
            ));
        }
        if noise_rotation < 0.0 {
            return Err(CoreError::InvalidConfig(
                "noise_rotation must be non-negative".into(),
            ));
        }
        Ok(Self {
            pattern_rotation,
            noise_rotation,
            target_qubit,
            perturb_qubit,
        })
    }

    /// Rotation angle applied when a pattern is detected.
    pub fn pattern_rotation(&self) -> f64 {
        self.pattern_rotation
    }

    /// Rotation angle applied when no pattern is detected.
    pub fn noise_rotation(&self) -> f64 {
        self.noise_rotation
    }

    /// Qubit rotated on detection.
    pub fn target_qubit(&self) -> usize {
        self.target_qubit
    }

    /// Qubit perturbed when nothing is detected.
    pub fn perturb_qubit(&self) -> usize {
        self.perturb_qubit
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            pattern_rotation: 0.05,
            noise_rotation: 0.02,
            target_qubit: 1,
            perturb_qubit: 2,
        }
    }
}

/// Parameters of the adaptive spectrum decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    threshold: f64,
    smoothing: f64,
    history: usize,
}

impl DecoderConfig {
    /// Create a validated decoder configuration.
    ///
    /// # Errors
    /// `InvalidConfig` when `threshold` or `history` is not positive, or
    /// `smoothing` falls outside [0, 1].
    pub fn new(threshold: f64, smoothing: f64, history: usize) -> CoreResult<Self> {
        if threshold <= 0.0 {
            return Err(CoreError::InvalidConfig(
                "threshold must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&smoothing) {
            return Err(CoreError::InvalidConfig(
                "smoothing must be between 0 and 1".into(),
            ));
        }
        if history == 0 {
            return Err(CoreError::InvalidConfig("history must be positive".into()));
        }
        Ok(Self {
            threshold,
            smoothing,
            history,
        })
    }

    /// Detection threshold compared against the smoothed baseline.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Exponential smoothing factor in [0, 1].
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Capacity of the peak-ratio history.
    pub fn history(&self) -> usize {
        self.history
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            threshold: 1.5,
            smoothing: 0.25,
            history: 5,
        }
    }
}
