//! Property-based tests for gate application and measurement.
//!
//! Checks the algebraic invariants that hold for arbitrary states: gates
//! are linear and length-preserving, controlled-X is an involution, and
//! sampling always conserves the shot total.

use num_complex::Complex64;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use thinline_core::dynamics::{Gate2, apply_controlled_x, apply_single_qubit_gate};
use thinline_core::measurement::sample_counts;
use thinline_core::state::normalize;

const TOLERANCE: f64 = 1e-9;

fn approx_eq(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < TOLERANCE
}

/// An arbitrary complex amplitude with bounded magnitude.
fn arb_amplitude() -> impl Strategy<Value = Complex64> {
    (-1.0_f64..1.0, -1.0_f64..1.0).prop_map(|(re, im)| Complex64::new(re, im))
}

/// An arbitrary dense state over `n_qubits` qubits (not normalized).
fn arb_state(n_qubits: usize) -> impl Strategy<Value = Vec<Complex64>> {
    prop::collection::vec(arb_amplitude(), 1 << n_qubits)
}

/// A register size, a qubit index within it, and one arbitrary state.
fn arb_sized_state() -> impl Strategy<Value = (usize, usize, Vec<Complex64>)> {
    (1_usize..=4).prop_flat_map(|n_qubits| {
        (Just(n_qubits), 0..n_qubits, arb_state(n_qubits))
    })
}

/// As above but with two states and two scalars, for linearity checks.
fn arb_linearity_input()
-> impl Strategy<Value = (usize, usize, Vec<Complex64>, Vec<Complex64>, f64, f64)> {
    (1_usize..=4).prop_flat_map(|n_qubits| {
        (
            Just(n_qubits),
            0..n_qubits,
            arb_state(n_qubits),
            arb_state(n_qubits),
            -2.0_f64..2.0,
            -2.0_f64..2.0,
        )
    })
}

proptest! {
    #[test]
    fn gate_application_preserves_length(
        (n_qubits, qubit, state) in arb_sized_state(),
        theta in -6.3_f64..6.3,
    ) {
        let rotated = apply_single_qubit_gate(&state, &Gate2::rz(theta), qubit, n_qubits).unwrap();
        prop_assert_eq!(rotated.len(), state.len());
        let mixed = apply_single_qubit_gate(&state, &Gate2::hadamard(), qubit, n_qubits).unwrap();
        prop_assert_eq!(mixed.len(), state.len());
    }

    #[test]
    fn gate_application_is_linear(
        (n_qubits, qubit, state_a, state_b, scale_a, scale_b) in arb_linearity_input(),
    ) {
        let gate = Gate2::hadamard();
        let combined: Vec<Complex64> = state_a
            .iter()
            .zip(&state_b)
            .map(|(&a, &b)| scale_a * a + scale_b * b)
            .collect();

        let of_combined = apply_single_qubit_gate(&combined, &gate, qubit, n_qubits).unwrap();
        let of_a = apply_single_qubit_gate(&state_a, &gate, qubit, n_qubits).unwrap();
        let of_b = apply_single_qubit_gate(&state_b, &gate, qubit, n_qubits).unwrap();

        for index in 0..combined.len() {
            let recombined = scale_a * of_a[index] + scale_b * of_b[index];
            prop_assert!(approx_eq(of_combined[index], recombined));
        }
    }

    #[test]
    fn controlled_x_is_an_involution(
        (n_qubits, control, state) in (2_usize..=4)
            .prop_flat_map(|n| (Just(n), 0..n - 1, arb_state(n))),
    ) {
        let target = control + 1;
        let once = apply_controlled_x(&state, control, target, n_qubits).unwrap();
        let twice = apply_controlled_x(&once, control, target, n_qubits).unwrap();
        for index in 0..state.len() {
            prop_assert!(approx_eq(twice[index], state[index]));
        }
    }

    #[test]
    fn controlled_x_rejects_equal_control_and_target(
        n_qubits in 2_usize..=5,
        qubit in 0_usize..5,
    ) {
        prop_assume!(qubit < n_qubits);
        let state = vec![Complex64::new(1.0, 0.0); 1 << n_qubits];
        prop_assert!(apply_controlled_x(&state, qubit, qubit, n_qubits).is_err());
    }

    #[test]
    fn normalize_yields_unit_norm(
        (_, _, state) in arb_sized_state(),
    ) {
        let norm_sq: f64 = state.iter().map(|amp| amp.norm_sqr()).sum();
        prop_assume!(norm_sq > 1e-6);
        let normalized = normalize(&state).unwrap();
        let total: f64 = normalized.iter().map(|amp| amp.norm_sqr()).sum();
        prop_assert!((total - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn sampled_counts_total_the_shot_count(
        (_, _, state) in arb_sized_state(),
        shots in 1_u32..200,
        seed in any::<u64>(),
    ) {
        let norm_sq: f64 = state.iter().map(|amp| amp.norm_sqr()).sum();
        prop_assume!(norm_sq > 1e-6);
        let mut rng = StdRng::seed_from_u64(seed);
        let counts = sample_counts(&state, shots, &mut rng).unwrap();
        prop_assert_eq!(counts.total(), u64::from(shots));
    }
}
