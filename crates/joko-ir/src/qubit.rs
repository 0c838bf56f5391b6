//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest register a dense state vector may be allocated for.
pub const MAX_QUBITS: usize = 20;

/// Index of a qubit within a circuit.
///
/// Qubit 0 is the most-significant bit of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The index as a `usize`, for addressing state vectors.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit position of this qubit inside a basis-state index of an
    /// `num_qubits`-qubit register.
    #[inline]
    pub fn bit_position(self, num_qubits: usize) -> usize {
        num_qubits - 1 - self.index()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).unwrap_or(u32::MAX))
    }
}
