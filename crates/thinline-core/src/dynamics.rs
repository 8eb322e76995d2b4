//! Gate application over dense state vectors.
//!
//! Every operation returns a fresh vector; the caller's state is never
//! mutated in place. Qubit 0 is the least significant bit of the basis
//! index.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{CoreError, CoreResult};
use crate::state::StateVector;

/// A 2×2 complex gate matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate2(pub [[Complex64; 2]; 2]);

impl Gate2 {
    /// The Hadamard gate.
    pub fn hadamard() -> Self {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Gate2([[h, h], [h, -h]])
    }

    /// Rotation about the Z axis: diag(e^(−iθ/2), e^(iθ/2)).
    pub fn rz(theta: f64) -> Self {
        let half = theta / 2.0;
        let zero = Complex64::new(0.0, 0.0);
        Gate2([
            [Complex64::from_polar(1.0, -half), zero],
            [zero, Complex64::from_polar(1.0, half)],
        ])
    }
}

/// Apply a single-qubit gate to the given qubit of the register.
///
/// Basis indices are partitioned into pairs differing only in the target
/// bit (`stride = 1 << qubit`, period `2·stride`) and the 2×2 map is
/// applied to each pair. O(2^n) per call.
///
/// # Errors
/// `QubitOutOfRange` when `qubit` is not in [0, n).
pub fn apply_single_qubit_gate(
    state: &[Complex64],
    gate: &Gate2,
    qubit: usize,
    n_qubits: usize,
) -> CoreResult<StateVector> {
    if qubit >= n_qubits {
        return Err(CoreError::QubitOutOfRange { qubit, n_qubits });
    }
    let mut result = state.to_vec();
    let stride = 1usize << qubit;
    let period = stride << 1;
    for start in (0..state.len()).step_by(period) {
        for offset in 0..stride {
            let zero_index = start + offset;
            let one_index = zero_index + stride;
            let zero_amp = state[zero_index];
            let one_amp = state[one_index];
            result[zero_index] = gate.0[0][0] * zero_amp + gate.0[0][1] * one_amp;
            result[one_index] = gate.0[1][0] * zero_amp + gate.0[1][1] * one_amp;
        }
    }
    Ok(result)
}

/// Apply a controlled-X gate to the register.
///
/// # Errors
/// `ControlTargetOverlap` when `control == target`, `QubitOutOfRange` when
/// either index falls outside the register.
pub fn apply_controlled_x(
    state: &[Complex64],
    control: usize,
    target: usize,
    n_qubits: usize,
) -> CoreResult<StateVector> {
    if control == target {
        return Err(CoreError::ControlTargetOverlap(control));
    }
    if control >= n_qubits {
        return Err(CoreError::QubitOutOfRange {
            qubit: control,
            n_qubits,
        });
    }
    if target >= n_qubits {
        return Err(CoreError::QubitOutOfRange {
            qubit: target,
            n_qubits,
        });
    }
    let mut result = state.to_vec();
    for index in 0..state.len() {
        // Each pair is swapped from its control=1, target=0 side only, so a
        // single pass touches every qualifying pair exactly once.
        if (index >> control) & 1 == 1 && (index >> target) & 1 == 0 {
            let flipped = index ^ (1usize << target);
            result.swap(index, flipped);
        }
    }
    Ok(result)
}

/// Apply controlled-X between every pair of neighbouring qubits,
/// control = 0..n−2, target = control+1.
pub fn entangle_chain(state: &[Complex64], n_qubits: usize) -> CoreResult<StateVector> {
    let mut state = state.to_vec();
    for control in 0..n_qubits.saturating_sub(1) {
        state = apply_controlled_x(&state, control, control + 1, n_qubits)?;
    }
    Ok(state)
}

/// Apply the Hadamard gate to every qubit of the register.
pub fn apply_hadamard_all(state: &[Complex64], n_qubits: usize) -> CoreResult<StateVector> {
    let gate = Gate2::hadamard();
    let mut state = state.to_vec();
    for qubit in 0..n_qubits {
        state = apply_single_qubit_gate(&state, &gate, qubit, n_qubits)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::basis_state;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn hadamard_creates_equal_superposition() {
        let state = basis_state(0, 1).unwrap();
        let state = apply_single_qubit_gate(&state, &Gate2::hadamard(), 0, 1).unwrap();
        assert!(approx_eq(state[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(state[1], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn hadamard_then_cx_builds_bell_state() {
        let state = basis_state(0, 2).unwrap();
        let state = apply_single_qubit_gate(&state, &Gate2::hadamard(), 0, 2).unwrap();
        let state = apply_controlled_x(&state, 0, 1, 2).unwrap();
        assert!(approx_eq(state[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(state[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(state[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(state[3], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn rz_applies_opposite_half_phases() {
        let theta = 0.7;
        let state = vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)];
        let rotated = apply_single_qubit_gate(&state, &Gate2::rz(theta), 0, 1).unwrap();
        assert!(approx_eq(rotated[0], Complex64::from_polar(1.0, -theta / 2.0)));
        assert!(approx_eq(rotated[1], Complex64::from_polar(1.0, theta / 2.0)));
    }

    #[test]
    fn controlled_x_flips_target_when_control_set() {
        // |01⟩ (control qubit 0 set) → |11⟩
        let state = basis_state(1, 2).unwrap();
        let state = apply_controlled_x(&state, 0, 1, 2).unwrap();
        assert!(approx_eq(state[3], Complex64::new(1.0, 0.0)));
        // |10⟩ (control qubit 0 clear) stays put
        let state = basis_state(2, 2).unwrap();
        let state = apply_controlled_x(&state, 0, 1, 2).unwrap();
        assert!(approx_eq(state[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn controlled_x_rejects_equal_control_and_target() {
        let state = basis_state(0, 2).unwrap();
        assert!(matches!(
            apply_controlled_x(&state, 1, 1, 2),
            Err(CoreError::ControlTargetOverlap(1))
        ));
    }

    #[test]
    fn controlled_x_rejects_out_of_range_qubits() {
        let state = basis_state(0, 2).unwrap();
        assert!(matches!(
            apply_controlled_x(&state, 2, 0, 2),
            Err(CoreError::QubitOutOfRange { qubit: 2, .. })
        ));
        assert!(matches!(
            apply_controlled_x(&state, 0, 5, 2),
            Err(CoreError::QubitOutOfRange { qubit: 5, .. })
        ));
    }

    #[test]
    fn single_qubit_gate_rejects_out_of_range_qubit() {
        let state = basis_state(0, 2).unwrap();
        assert!(matches!(
            apply_single_qubit_gate(&state, &Gate2::hadamard(), 2, 2),
            Err(CoreError::QubitOutOfRange { qubit: 2, .. })
        ));
    }

    #[test]
    fn entangle_chain_on_ghz_prefix() {
        // H on qubit 0 then the chain CX(0,1), CX(1,2) yields a GHZ state.
        let state = basis_state(0, 3).unwrap();
        let state = apply_single_qubit_gate(&state, &Gate2::hadamard(), 0, 3).unwrap();
        let state = entangle_chain(&state, 3).unwrap();
        assert!(approx_eq(state[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(state[7], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        for index in 1..7 {
            assert!(approx_eq(state[index], Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn entangle_chain_is_identity_for_single_qubit() {
        let state = basis_state(1, 1).unwrap();
        let chained = entangle_chain(&state, 1).unwrap();
        assert_eq!(chained, state);
    }

    #[test]
    fn hadamard_all_maps_ground_state_to_uniform() {
        let state = basis_state(0, 3).unwrap();
        let state = apply_hadamard_all(&state, 3).unwrap();
        let expected = Complex64::new(1.0 / 8.0_f64.sqrt(), 0.0);
        assert!(state.iter().all(|amp| approx_eq(*amp, expected)));
    }
}
