//! guardbench: run guardrails over tabular benchmark datasets and record
//! their judgments.
//!
//! The harness loops over benchmark columns (or column pairs), calls an
//! opaque [`Guardrail`], and writes the serialized outputs to a JSON results
//! file. See [`runner::execute_single_input_experiment`] and
//! [`runner::execute_dual_input_experiment`].

pub mod config;
pub mod errors;
pub mod guardrail;
pub mod guardrails;
pub mod io;
pub mod runner;

pub use errors::{GuardBenchError, GuardBenchResult};
pub use guardrail::{Bundle, Guardrail, GuardrailOutput, PairEntries};
pub use runner::{
    execute_dual_input_experiment, execute_single_input_experiment, run_experiment,
    ResultCollection,
};
