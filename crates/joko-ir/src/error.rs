//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors raised while resolving gates or validating circuits and states.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate identifier is not in the catalogue.
    #[error("Unknown gate: \"{gate_id}\"")]
    UnknownGate {
        /// The identifier as supplied by the caller.
        gate_id: String,
    },

    /// Target-qubit count or matrix dimension does not match the arity.
    #[error("Arity mismatch for {subject}: expected {expected}, got {got}")]
    ArityMismatch {
        /// What was being checked, e.g. `gate 'CNOT' target qubits`.
        subject: String,
        /// Expected count or dimension.
        expected: usize,
        /// Actual count or dimension.
        got: usize,
    },

    /// Qubit index is outside `[0, num_qubits)`.
    #[error(
        "Qubit index {qubit} is out of range for a {num_qubits}-qubit system{}",
        format_gate_context(.gate_name)
    )]
    IndexOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Register width.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Register width below one.
    #[error("num_qubits must be >= 1, got {0}")]
    InvalidQubitCount(usize),

    /// Register width above what a dense state vector can hold.
    #[error("Cannot allocate a {requested}-qubit state vector (at most {max} qubits)")]
    TooManyQubits {
        /// Requested width.
        requested: usize,
        /// Largest supported width.
        max: usize,
    },

    /// The same qubit appears twice in one gate.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Two gates in the same column act on the same qubit.
    #[error("Column {column} places more than one gate on qubit {qubit}")]
    DisjointColumnViolation {
        /// The column containing the overlap.
        column: usize,
        /// The qubit claimed twice.
        qubit: QubitId,
    },

    /// Gate placed past the last addressable column.
    #[error("Column {column} is out of range (at most {max})")]
    ColumnOutOfRange {
        /// The offending column.
        column: usize,
        /// Largest allowed column.
        max: usize,
    },

    /// Amplitude vector length is not a power of two of at least 2.
    #[error("State vector length {0} is not 2^n for n >= 1")]
    InvalidStateLength(usize),
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
