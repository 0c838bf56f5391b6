//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Hard ceiling on register width; `2^20` amplitudes is already 16 MiB.
pub const MAX_QUBITS_CEILING: usize = joko_ir::MAX_QUBITS;

/// Default register cap.
pub const DEFAULT_MAX_QUBITS: usize = 12;

/// Knobs for a [`Simulator`](crate::Simulator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register a circuit may declare.
    pub max_qubits: usize,
    /// Seed for the measurement RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Reject columns in which two gates share a qubit.
    pub strict_columns: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
            strict_columns: true,
        }
    }
}

impl SimulatorConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the register cap.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Toggle column disjointness checking.
    pub fn with_strict_columns(mut self, strict: bool) -> Self {
        self.strict_columns = strict;
        self
    }

    /// Check that `max_qubits` is in `1..=MAX_QUBITS_CEILING`.
    pub fn validate(&self) -> SimResult<()> {
        if !(1..=MAX_QUBITS_CEILING).contains(&self.max_qubits) {
            return Err(SimError::InvalidConfig(format!(
                "max_qubits must be between 1 and {MAX_QUBITS_CEILING}, got {}",
                self.max_qubits
            )));
        }
        Ok(())
    }
}
