//! State-vector preparation and normalization.

use num_complex::Complex64;

use crate::error::{CoreError, CoreResult};

/// Dense complex amplitude vector over the full register (2^n entries).
pub type StateVector = Vec<Complex64>;

/// Return the computational basis state |index⟩ for an `n_qubits` register.
///
/// # Errors
/// `IndexOutOfRange` when `index` is not in [0, 2^n).
pub fn basis_state(index: usize, n_qubits: usize) -> CoreResult<StateVector> {
    let dimension = 1usize << n_qubits;
    if index >= dimension {
        return Err(CoreError::IndexOutOfRange { index, dimension });
    }
    let mut state = vec![Complex64::new(0.0, 0.0); dimension];
    state[index] = Complex64::new(1.0, 0.0);
    Ok(state)
}

/// Return the |+...+⟩ state: every amplitude equal to 1/√(2^n).
pub fn uniform_superposition(n_qubits: usize) -> StateVector {
    let dimension = 1usize << n_qubits;
    let amplitude = 1.0 / (dimension as f64).sqrt();
    vec![Complex64::new(amplitude, 0.0); dimension]
}

/// Rescale a state vector to unit L2 norm.
///
/// # Errors
/// `ZeroNorm` when the vector has zero norm.
pub fn normalize(state: &[Complex64]) -> CoreResult<StateVector> {
    let norm_sq: f64 = state.iter().map(|amp| amp.norm_sqr()).sum();
    if norm_sq == 0.0 {
        return Err(CoreError::ZeroNorm);
    }
    let norm = norm_sq.sqrt();
    Ok(state.iter().map(|value| *value / norm).collect())
}
