//! Error types for the thin-line core.

use thiserror::Error;

/// Errors produced by the thin-line simulation core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A configuration parameter violated its invariant at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A qubit index is outside the register.
    #[error("qubit {qubit} out of range for a {n_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the register.
        n_qubits: usize,
    },

    /// A basis-state index is outside the state space.
    #[error("basis index {index} out of range for dimension {dimension}")]
    IndexOutOfRange {
        /// The offending basis index.
        index: usize,
        /// Dimension of the state space (2^n).
        dimension: usize,
    },

    /// Controlled gate invoked with identical control and target.
    #[error("control and target must be different qubits, both were {0}")]
    ControlTargetOverlap(usize),

    /// Attempt to normalize the zero vector.
    #[error("cannot normalize a zero-norm state vector")]
    ZeroNorm,

    /// Measurement on a state with no probability mass.
    #[error("state has zero probability mass")]
    ZeroProbabilityMass,

    /// State vector length is not a power of two.
    #[error("state vector length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// shots must be ≥ 1.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),

    /// num_steps must be ≥ 1.
    #[error("num_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Counts mapping with no entries.
    #[error("counts cannot be empty")]
    EmptyCounts,

    /// Decoder update with an empty spectrum.
    #[error("spectrum cannot be empty")]
    EmptySpectrum,
}

/// Result type for thin-line core operations.
pub type CoreResult<T> = Result<T, CoreError>;
