//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while executing circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Gate, circuit or state validation failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] joko_ir::IrError),

    /// Register wider than the configured cap.
    #[error("Circuit has {requested} qubits but the simulator is capped at {max}")]
    TooManyQubits {
        /// Qubits the circuit asks for.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Shot count must be ≥ 1.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),

    /// Simulator configuration is out of bounds.
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
