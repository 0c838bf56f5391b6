//! Joko step-by-step state-vector simulator.
//!
//! Runs a [`joko_ir::Circuit`] column by column and records the state before
//! and after every non-empty column, including measurement collapse.
//!
//! # Example
//!
//! ```rust
//! use joko_ir::presets;
//! use joko_sim::{Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::with_config(SimulatorConfig::default().with_seed(42)).unwrap();
//! let steps = sim.execute_circuit(&presets::bell()).unwrap();
//!
//! assert_eq!(steps.len(), 2);
//! assert_eq!(
//!     steps[1].state_after.format_ket(),
//!     "(0.7071)|00⟩ + (0.7071)|11⟩"
//! );
//! ```
//!
//! Measurement draws from the simulator's own RNG; seed it through
//! [`SimulatorConfig::seed`] or pass one to [`Simulator::with_rng`] for
//! reproducible runs.

pub mod config;
pub mod error;
pub mod executor;
pub mod kernel;
pub mod statevector;

pub use config::SimulatorConfig;
pub use error::{SimError, SimResult};
pub use executor::{Counts, ExecutionStep, MeasurementResults, Simulator, StepResult};
pub use kernel::apply_gate;
pub use statevector::{Outcome, StateVector};
