//! Measurement sampling and signal extraction.

use std::collections::BTreeMap;

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Measurement outcome frequencies keyed by fixed-width bitstring.
///
/// Every possible outcome key is present, including zero-count ones, and
/// iteration is lexicographic by key (ascending basis index for fixed-width
/// keys), so the derived signal always has length 2^n.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Create an empty counts mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for an outcome key.
    pub fn insert(&mut self, key: impl Into<String>, count: u64) {
        self.counts.insert(key.into(), count);
    }

    /// Count recorded for a key, zero when absent.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all recorded counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of outcome keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no keys are recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, &count)| (key.as_str(), count))
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Measurement probabilities over the computational basis.
///
/// Squared magnitudes renormalized to total 1.
///
/// # Errors
/// `ZeroProbabilityMass` when the state has no probability mass at all.
pub fn probabilities(state: &[Complex64]) -> CoreResult<Vec<f64>> {
    let probs: Vec<f64> = state.iter().map(|amp| amp.norm_sqr()).collect();
    let total: f64 = probs.iter().sum();
    if total == 0.0 {
        return Err(CoreError::ZeroProbabilityMass);
    }
    Ok(probs.into_iter().map(|value| value / total).collect())
}

/// Draw `shots` independent measurement samples and tally them per outcome.
///
/// Uses inverse-CDF sampling against the cumulative probability array. The
/// returned mapping covers every outcome key, zero counts included, so its
/// total always equals `shots`.
///
/// # Errors
/// `InvalidShots` when `shots` is zero, `NotPowerOfTwo` when the state
/// length is not a power of two, plus any `probabilities` failure.
pub fn sample_counts<R: Rng>(state: &[Complex64], shots: u32, rng: &mut R) -> CoreResult<Counts> {
    if shots == 0 {
        return Err(CoreError::InvalidShots(shots));
    }
    let length = state.len();
    if !length.is_power_of_two() {
        return Err(CoreError::NotPowerOfTwo(length));
    }
    let n_qubits = length.trailing_zeros() as usize;

    let probs = probabilities(state)?;
    let mut cumulative = Vec::with_capacity(length);
    let mut running = 0.0;
    for value in probs {
        running += value;
        cumulative.push(running);
    }

    let mut tallies = vec![0u64; length];
    for _ in 0..shots {
        let r: f64 = rng.r#gen();
        // First bin whose cumulative probability reaches r; the clamp
        // absorbs float shortfall in the final bin.
        let index = cumulative.partition_point(|&threshold| threshold < r);
        tallies[index.min(length - 1)] += 1;
    }
    let mut counts = Counts::new();
    for (index, tally) in tallies.into_iter().enumerate() {
        counts.insert(format!("{index:0n_qubits$b}"), tally);
    }
    Ok(counts)
}

/// Flatten counts into a signal vector, ordered lexicographically by key.
///
/// # Errors
/// `EmptyCounts` when the mapping has no entries.
pub fn counts_to_signal(counts: &Counts) -> CoreResult<Vec<f64>> {
    if counts.is_empty() {
        return Err(CoreError::EmptyCounts);
    }
    Ok(counts.iter().map(|(_, count)| count as f64).collect())
}
