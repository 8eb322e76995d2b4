//! `thinline-core` — closed-loop statevector simulation with spectral
//! feedback decoding.
//!
//! Evolves a small dense state vector through a fixed entangling circuit,
//! samples measurement outcomes, lifts them into a frequency-domain
//! signature, and feeds an adaptive threshold decoder's decision back into
//! the next evolution step:
//!
//!   evolve → sample → spectrum → decode → feedback rotation
//!
//! The state is dense (2^n amplitudes), so qubit counts are expected to
//! stay small. Everything is synchronous and single-threaded; one
//! [`ThinLineCore`] exclusively owns its state, decoder, and random
//! generator, and separate instances are fully independent.
//!
//! # Quick start
//!
//! ```rust
//! use thinline_core::{
//!     DecoderConfig, FeedbackConfig, QuantumConfig, SignalConfig, ThinLineCore,
//! };
//!
//! let quantum = QuantumConfig::new(3, 64, 0.1).unwrap().with_seed(42);
//! let mut core = ThinLineCore::new(
//!     quantum,
//!     SignalConfig::default(),
//!     FeedbackConfig::default(),
//!     DecoderConfig::default(),
//! )
//! .unwrap();
//!
//! let results = core.run(3).unwrap();
//! assert_eq!(results.len(), 3);
//! assert!(results.iter().all(|step| !step.spectrum.is_empty()));
//! ```

pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod measurement;
pub mod signal;
pub mod state;

pub use config::{DecoderConfig, FeedbackConfig, QuantumConfig, SignalConfig};
pub use self::core::{ALPHA, StepResult, ThinLineCore};
pub use error::{CoreError, CoreResult};
pub use measurement::Counts;
pub use signal::{SimpleSpectrumDecoder, SpectrumResult};
pub use state::StateVector;
