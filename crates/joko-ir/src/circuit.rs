//! Circuits as qubits plus gates placed on time columns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::{GateId, GateSpec, lookup};
use crate::qubit::QubitId;

/// Highest column a gate may be placed on.
pub const MAX_COLUMN: usize = 65_535;

/// A gate placed on specific qubits at a specific column.
///
/// `gate_id` is kept as the caller supplied it; it is resolved against the
/// catalogue when the gate is validated or executed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedGate {
    /// Catalogue identifier, e.g. `"H"` or `"CNOT"`.
    pub gate_id: String,
    /// Ordered targets. For CNOT: `[control, target]`.
    pub target_qubits: Vec<QubitId>,
    /// Zero-based time step.
    pub column: usize,
}

impl PlacedGate {
    /// Place `gate_id` on `targets` at `column`.
    pub fn new(
        gate_id: impl Into<String>,
        targets: impl IntoIterator<Item = u32>,
        column: usize,
    ) -> Self {
        Self {
            gate_id: gate_id.into(),
            target_qubits: targets.into_iter().map(QubitId).collect(),
            column,
        }
    }

    /// Look the gate up in the catalogue.
    pub fn resolve(&self) -> IrResult<&'static GateSpec> {
        lookup(&self.gate_id)
    }

    /// Resolve the gate and check its targets against a register of
    /// `num_qubits` qubits.
    ///
    /// # Errors
    ///
    /// `UnknownGate`, `ArityMismatch` when the target count differs from the
    /// gate's arity, `IndexOutOfRange`, `DuplicateQubit`, or
    /// `ColumnOutOfRange` past [`MAX_COLUMN`].
    pub fn validate(&self, num_qubits: usize) -> IrResult<&'static GateSpec> {
        let spec = self.resolve()?;

        if self.column > MAX_COLUMN {
            return Err(IrError::ColumnOutOfRange {
                column: self.column,
                max: MAX_COLUMN,
            });
        }

        if self.target_qubits.len() != spec.num_qubits {
            return Err(IrError::ArityMismatch {
                subject: format!("gate '{}' target qubits", spec.id),
                expected: spec.num_qubits,
                got: self.target_qubits.len(),
            });
        }

        for (i, &qubit) in self.target_qubits.iter().enumerate() {
            if qubit.index() >= num_qubits {
                return Err(IrError::IndexOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: Some(spec.id.to_string()),
                });
            }
            if self.target_qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(spec.id.to_string()),
                });
            }
        }

        Ok(spec)
    }
}

/// A circuit: register width plus an unordered set of placed gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    num_qubits: usize,
    #[serde(default)]
    gates: Vec<PlacedGate>,
}

impl Circuit {
    /// An empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: vec![],
        }
    }

    /// A circuit from already placed gates.
    pub fn from_gates(num_qubits: usize, gates: Vec<PlacedGate>) -> Self {
        Self { num_qubits, gates }
    }

    /// Register width.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Placed gates in insertion order.
    #[inline]
    pub fn gates(&self) -> &[PlacedGate] {
        &self.gates
    }

    /// Number of placed gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// `true` if no gate has been placed.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Highest occupied column, if any.
    pub fn max_column(&self) -> Option<usize> {
        self.gates.iter().map(|g| g.column).max()
    }

    /// Place a gate by identifier.
    pub fn place(
        &mut self,
        gate_id: impl Into<String>,
        targets: impl IntoIterator<Item = u32>,
        column: usize,
    ) -> &mut Self {
        self.gates.push(PlacedGate::new(gate_id, targets, column));
        self
    }

    /// Append an already placed gate.
    pub fn push(&mut self, gate: PlacedGate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    // =========================================================================
    // Catalogue shorthands
    // =========================================================================

    /// Place a Hadamard.
    pub fn h(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::H, [qubit], column)
    }

    /// Place a Pauli-X.
    pub fn x(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::X, [qubit], column)
    }

    /// Place a Pauli-Y.
    pub fn y(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::Y, [qubit], column)
    }

    /// Place a Pauli-Z.
    pub fn z(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::Z, [qubit], column)
    }

    /// Place an S gate.
    pub fn s(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::S, [qubit], column)
    }

    /// Place a T gate.
    pub fn t(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::T, [qubit], column)
    }

    /// Place a CNOT.
    pub fn cnot(&mut self, control: u32, target: u32, column: usize) -> &mut Self {
        self.place(GateId::Cnot, [control, target], column)
    }

    /// Place a SWAP.
    pub fn swap(&mut self, a: u32, b: u32, column: usize) -> &mut Self {
        self.place(GateId::Swap, [a, b], column)
    }

    /// Place a measurement.
    pub fn measure(&mut self, qubit: u32, column: usize) -> &mut Self {
        self.place(GateId::Measure, [qubit], column)
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Group gates by column.
    ///
    /// The result has `max_column + 1` entries; columns without gates are
    /// empty. Within a column gates keep their insertion order.
    ///
    /// # Errors
    ///
    /// `ColumnOutOfRange` if a gate sits past [`MAX_COLUMN`].
    pub fn columns(&self) -> IrResult<Vec<Vec<&PlacedGate>>> {
        let Some(max_column) = self.max_column() else {
            return Ok(vec![]);
        };
        if max_column > MAX_COLUMN {
            return Err(IrError::ColumnOutOfRange {
                column: max_column,
                max: MAX_COLUMN,
            });
        }

        let mut columns: Vec<Vec<&PlacedGate>> = vec![Vec::new(); max_column + 1];
        for gate in &self.gates {
            columns[gate.column].push(gate);
        }
        Ok(columns)
    }

    /// Occupied columns only, ascending, keyed by column index.
    pub fn occupied_columns(&self) -> BTreeMap<usize, Vec<&PlacedGate>> {
        let mut columns: BTreeMap<usize, Vec<&PlacedGate>> = BTreeMap::new();
        for gate in &self.gates {
            columns.entry(gate.column).or_default().push(gate);
        }
        columns
    }

    /// Check the whole circuit up front.
    ///
    /// # Errors
    ///
    /// `InvalidQubitCount`, any per-gate error from [`PlacedGate::validate`],
    /// or `DisjointColumnViolation`.
    pub fn validate(&self) -> IrResult<()> {
        if self.num_qubits < 1 {
            return Err(IrError::InvalidQubitCount(self.num_qubits));
        }
        for gate in &self.gates {
            gate.validate(self.num_qubits)?;
        }
        for (column, gates) in &self.occupied_columns() {
            check_disjoint(*column, gates)?;
        }
        Ok(())
    }
}

/// Reject a column in which two gates touch the same qubit.
pub fn check_disjoint(column: usize, gates: &[&PlacedGate]) -> IrResult<()> {
    let mut seen: Vec<QubitId> = Vec::new();
    for gate in gates {
        for &qubit in &gate.target_qubits {
            if seen.contains(&qubit) {
                return Err(IrError::DisjointColumnViolation { column, qubit });
            }
            seen.push(qubit);
        }
    }
    Ok(())
}
