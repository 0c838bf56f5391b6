//! The gate catalogue.
//!
//! Every supported operation is a [`GateId`] variant with a fixed
//! [`GateSpec`] entry. Unitary gates carry their matrix; measurement is the
//! one non-unitary entry and is modelled as [`GateOp::Measurement`] rather
//! than as a gate without a matrix.
//!
//! Matrices use big-endian qubit order: for a two-qubit gate acting on
//! `[a, b]`, row/column index `2·bit(a) + bit(b)`.

use ndarray::arr2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::complex::{Complex, ONE, ZERO, complex, from_polar};
use crate::error::{IrError, IrResult};
use crate::matrix::{self, Matrix};

/// Identifier of a catalogue gate.
///
/// Serialized with the identifiers callers use (`"H"`, `"CNOT"`, `"M"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateId {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// S (sqrt(Z)).
    S,
    /// T (fourth root of Z).
    T,
    /// Controlled-NOT; targets are `[control, target]`.
    #[serde(rename = "CNOT", alias = "CX")]
    Cnot,
    /// SWAP.
    #[serde(rename = "SWAP")]
    Swap,
    /// Projective measurement in the computational basis.
    #[serde(rename = "M")]
    Measure,
}

impl GateId {
    /// All catalogue gates, in catalogue order.
    pub const ALL: [GateId; 9] = [
        GateId::H,
        GateId::X,
        GateId::Y,
        GateId::Z,
        GateId::S,
        GateId::T,
        GateId::Cnot,
        GateId::Swap,
        GateId::Measure,
    ];

    /// The caller-facing identifier.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            GateId::H => "H",
            GateId::X => "X",
            GateId::Y => "Y",
            GateId::Z => "Z",
            GateId::S => "S",
            GateId::T => "T",
            GateId::Cnot => "CNOT",
            GateId::Swap => "SWAP",
            GateId::Measure => "M",
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            GateId::H
            | GateId::X
            | GateId::Y
            | GateId::Z
            | GateId::S
            | GateId::T
            | GateId::Measure => 1,
            GateId::Cnot | GateId::Swap => 2,
        }
    }

    /// The catalogue entry for this gate.
    #[inline]
    pub fn spec(self) -> &'static GateSpec {
        GateSpec::get(self)
    }
}

impl FromStr for GateId {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(GateId::H),
            "X" => Ok(GateId::X),
            "Y" => Ok(GateId::Y),
            "Z" => Ok(GateId::Z),
            "S" => Ok(GateId::S),
            "T" => Ok(GateId::T),
            "CNOT" | "CX" => Ok(GateId::Cnot),
            "SWAP" => Ok(GateId::Swap),
            "M" => Ok(GateId::Measure),
            other => Err(IrError::UnknownGate {
                gate_id: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GateId> for String {
    fn from(id: GateId) -> Self {
        id.as_str().to_string()
    }
}

/// What applying a catalogue entry does to a state.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOp {
    /// Left-multiply the addressed amplitudes by this unitary.
    Unitary(Matrix),
    /// Projective measurement with collapse.
    Measurement,
}

impl GateOp {
    /// The unitary matrix, if any.
    pub fn matrix(&self) -> Option<&Matrix> {
        match self {
            GateOp::Unitary(m) => Some(m),
            GateOp::Measurement => None,
        }
    }
}

/// A catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GateSpec {
    /// Identifier.
    pub id: GateId,
    /// Long name, e.g. `Hadamard`.
    pub name: &'static str,
    /// Short circuit-diagram symbol.
    pub symbol: &'static str,
    /// Arity (1 or 2).
    pub num_qubits: usize,
    /// The operation.
    pub op: GateOp,
    /// One-sentence summary.
    pub description: &'static str,
    /// Longer explanation for tooltips and listings.
    pub detailed_description: &'static str,
}

static CATALOGUE: LazyLock<Vec<GateSpec>> =
    LazyLock::new(|| GateId::ALL.iter().map(|&id| GateSpec::build(id)).collect());

/// All catalogue entries, in catalogue order.
pub fn catalogue() -> &'static [GateSpec] {
    &CATALOGUE
}

/// Resolve a caller-supplied identifier to its catalogue entry.
pub fn lookup(gate_id: &str) -> IrResult<&'static GateSpec> {
    gate_id.parse::<GateId>().map(GateSpec::get)
}

impl GateSpec {
    /// The entry for `id`.
    pub fn get(id: GateId) -> &'static GateSpec {
        // ALL is declared in discriminant order.
        &CATALOGUE[id as usize]
    }

    /// Whether this entry is a unitary with `U†U = I` within `tol`.
    pub fn is_unitary_within(&self, tol: f64) -> bool {
        self.op.matrix().is_some_and(|m| matrix::is_unitary(m, tol))
    }

    fn build(id: GateId) -> Self {
        let c = |re: f64, im: f64| -> Complex { complex(re, im) };
        let h = FRAC_1_SQRT_2;

        let (name, symbol, op, description, detailed_description) = match id {
            GateId::H => (
                "Hadamard",
                "H",
                GateOp::Unitary(arr2(&[[c(h, 0.0), c(h, 0.0)], [c(h, 0.0), c(-h, 0.0)]])),
                "Puts a qubit into an equal superposition of |0⟩ and |1⟩.",
                "Maps |0⟩ to (|0⟩+|1⟩)/√2 and |1⟩ to (|0⟩−|1⟩)/√2. \
                 It is its own inverse, so two Hadamards in a row cancel.",
            ),
            GateId::X => (
                "Pauli-X",
                "X",
                GateOp::Unitary(arr2(&[[ZERO, ONE], [ONE, ZERO]])),
                "Bit flip: exchanges |0⟩ and |1⟩.",
                "The quantum NOT gate, a half-turn about the X axis of the Bloch sphere.",
            ),
            GateId::Y => (
                "Pauli-Y",
                "Y",
                GateOp::Unitary(arr2(&[[ZERO, c(0.0, -1.0)], [c(0.0, 1.0), ZERO]])),
                "Bit flip combined with a phase.",
                "A half-turn about the Y axis: |0⟩ → i|1⟩ and |1⟩ → −i|0⟩.",
            ),
            GateId::Z => (
                "Pauli-Z",
                "Z",
                GateOp::Unitary(arr2(&[[ONE, ZERO], [ZERO, c(-1.0, 0.0)]])),
                "Phase flip: negates the |1⟩ amplitude.",
                "A half-turn about the Z axis. Leaves |0⟩ alone and multiplies |1⟩ by −1; Z = HXH.",
            ),
            GateId::S => (
                "S Gate",
                "S",
                GateOp::Unitary(arr2(&[[ONE, ZERO], [ZERO, c(0.0, 1.0)]])),
                "Quarter-turn phase: multiplies |1⟩ by i.",
                "The square root of Z (S² = Z). Used to move between the X and Y bases.",
            ),
            GateId::T => (
                "T Gate",
                "T",
                GateOp::Unitary(arr2(&[[ONE, ZERO], [ZERO, from_polar(1.0, PI / 4.0)]])),
                "Eighth-turn phase: multiplies |1⟩ by e^(iπ/4).",
                "The fourth root of Z (T² = S, T⁴ = Z). With H and CNOT it forms a universal set.",
            ),
            GateId::Cnot => (
                "CNOT",
                "⊕",
                GateOp::Unitary(arr2(&[
                    [ONE, ZERO, ZERO, ZERO],
                    [ZERO, ONE, ZERO, ZERO],
                    [ZERO, ZERO, ZERO, ONE],
                    [ZERO, ZERO, ONE, ZERO],
                ])),
                "Flips the target qubit when the control qubit is |1⟩.",
                "Controlled-NOT on [control, target]. Together with a Hadamard on the control \
                 it prepares Bell states.",
            ),
            GateId::Swap => (
                "SWAP",
                "×",
                GateOp::Unitary(arr2(&[
                    [ONE, ZERO, ZERO, ZERO],
                    [ZERO, ZERO, ONE, ZERO],
                    [ZERO, ONE, ZERO, ZERO],
                    [ZERO, ZERO, ZERO, ONE],
                ])),
                "Exchanges the states of two qubits.",
                "Equivalent to three alternating CNOTs; used to route states between qubits.",
            ),
            GateId::Measure => (
                "Measure",
                "M",
                GateOp::Measurement,
                "Collapses the qubit to |0⟩ or |1⟩ at random.",
                "Projects onto the computational basis with P(1) equal to the qubit's marginal \
                 probability, then renormalizes. Not unitary and not reversible.",
            ),
        };

        Self {
            id,
            name,
            symbol,
            num_qubits: id.num_qubits(),
            op,
            description,
            detailed_description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{approx_eq, identity, matmul};

    const TOL: f64 = 1e-9;

    fn unitary(id: GateId) -> &'static Matrix {
        id.spec().op.matrix().unwrap()
    }

    #[test]
    fn test_catalogue_order_matches_ids() {
        for (i, spec) in catalogue().iter().enumerate() {
            assert_eq!(spec.id, GateId::ALL[i]);
            assert_eq!(GateSpec::get(spec.id).id, spec.id);
        }
    }

    #[test]
    fn test_every_unitary_is_unitary() {
        for spec in catalogue() {
            match &spec.op {
                GateOp::Unitary(m) => {
                    let dim = 1 << spec.num_qubits;
                    assert_eq!(m.dim(), (dim, dim), "{} has wrong shape", spec.id);
                    assert!(spec.is_unitary_within(TOL), "{} is not unitary", spec.id);
                }
                GateOp::Measurement => assert_eq!(spec.id, GateId::Measure),
            }
        }
    }

    #[test]
    fn test_involutions() {
        let h = unitary(GateId::H);
        assert!(approx_eq(&matmul(h, h), &identity(2), TOL));

        let swap = unitary(GateId::Swap);
        assert!(approx_eq(&matmul(swap, swap), &identity(4), TOL));

        let s = unitary(GateId::S);
        assert!(approx_eq(&matmul(s, s), unitary(GateId::Z), TOL));

        let t = unitary(GateId::T);
        let t4 = matmul(&matmul(t, t), &matmul(t, t));
        assert!(approx_eq(&t4, unitary(GateId::Z), TOL));
    }

    #[test]
    fn test_parse_identifiers() {
        for id in GateId::ALL {
            assert_eq!(id.as_str().parse::<GateId>().unwrap(), id);
        }
        assert_eq!("CX".parse::<GateId>().unwrap(), GateId::Cnot);
        assert!(matches!(
            "h".parse::<GateId>(),
            Err(IrError::UnknownGate { gate_id }) if gate_id == "h"
        ));
        assert!(matches!(lookup("TOFFOLI"), Err(IrError::UnknownGate { .. })));
    }

    #[test]
    fn test_arity() {
        assert_eq!(lookup("H").unwrap().num_qubits, 1);
        assert_eq!(lookup("CNOT").unwrap().num_qubits, 2);
        assert_eq!(lookup("SWAP").unwrap().num_qubits, 2);
        assert_eq!(lookup("M").unwrap().num_qubits, 1);
    }

    #[test]
    fn test_measure_has_no_matrix() {
        let m = GateId::Measure.spec();
        assert!(m.op.matrix().is_none());
        assert!(!m.is_unitary_within(TOL));
    }

    #[test]
    fn test_serde_identifiers() {
        assert_eq!(serde_json::to_string(&GateId::Cnot).unwrap(), "\"CNOT\"");
        assert_eq!(serde_json::to_string(&GateId::Measure).unwrap(), "\"M\"");
        let cx: GateId = serde_json::from_str("\"CX\"").unwrap();
        assert_eq!(cx, GateId::Cnot);
    }
}
