//! Gate application by amplitude grouping.
//!
//! A k-qubit gate mixes amplitudes only within groups of `2^k` basis indices
//! that agree on every non-target bit. Each group is identified by its
//! representative (all target bits clear), gathered into a small vector,
//! multiplied by the gate matrix and scattered back.

use joko_ir::complex::{Complex, ZERO};
use joko_ir::{IrError, IrResult, Matrix, QubitId};

use crate::statevector::StateVector;

/// Apply a `2^k × 2^k` unitary to `targets` and return the new state.
///
/// `targets[0]` is the most-significant bit of the gate's local index, so a
/// CNOT matrix applied to `[c, t]` uses `c` as control.
///
/// # Errors
///
/// `ArityMismatch` if the matrix is not `2^k × 2^k`, `IndexOutOfRange` for a
/// target outside the register, `DuplicateQubit` if a target repeats.
pub fn apply_gate(
    state: &StateVector,
    matrix: &Matrix,
    targets: &[QubitId],
) -> IrResult<StateVector> {
    let k = targets.len();
    let dim = 1usize << k;
    let (rows, cols) = matrix.dim();
    if rows != dim || cols != dim {
        return Err(IrError::ArityMismatch {
            subject: format!("{k}-qubit gate matrix"),
            expected: dim,
            got: if rows == dim { cols } else { rows },
        });
    }

    let mut positions = Vec::with_capacity(k);
    for (j, &qubit) in targets.iter().enumerate() {
        if targets[..j].contains(&qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: None,
            });
        }
        positions.push(state.bit_position(qubit)?);
    }

    let target_mask = positions.iter().fold(0usize, |mask, &p| mask | (1 << p));

    // offsets[s]: global bits set by local sub-index s
    let offsets: Vec<usize> = (0..dim)
        .map(|s| {
            positions
                .iter()
                .enumerate()
                .filter(|&(j, _)| (s >> (k - 1 - j)) & 1 == 1)
                .fold(0usize, |acc, (_, &p)| acc | (1 << p))
        })
        .collect();

    let input = state.amplitudes();
    let mut output = vec![ZERO; input.len()];
    let mut group = vec![ZERO; dim];

    for base in (0..input.len()).filter(|i| i & target_mask == 0) {
        for (slot, &offset) in group.iter_mut().zip(&offsets) {
            *slot = input[base | offset];
        }
        for (row, &offset) in offsets.iter().enumerate() {
            output[base | offset] = group
                .iter()
                .enumerate()
                .fold(ZERO, |acc: Complex, (col, &a)| acc + matrix[[row, col]] * a);
        }
    }

    StateVector::from_amplitudes(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use joko_ir::complex::{ONE, complex};
    use joko_ir::{GateId, GateSpec};
    use std::f64::consts::FRAC_1_SQRT_2;

    fn matrix_of(id: GateId) -> &'static Matrix {
        GateSpec::get(id).op.matrix().unwrap()
    }

    fn basis(num_qubits: usize, index: usize) -> StateVector {
        let mut amps = vec![ZERO; 1 << num_qubits];
        amps[index] = ONE;
        StateVector::from_amplitudes(amps).unwrap()
    }

    #[test]
    fn test_hadamard() {
        let sv = StateVector::new(1).unwrap();
        let out = apply_gate(&sv, matrix_of(GateId::H), &[QubitId(0)]).unwrap();
        let h = complex(FRAC_1_SQRT_2, 0.0);
        assert!(out.approx_eq(&StateVector::from_amplitudes(vec![h, h]).unwrap(), 1e-12));
    }

    #[test]
    fn test_x_on_qubit_zero_flips_msb() {
        let sv = StateVector::new(2).unwrap();
        let out = apply_gate(&sv, matrix_of(GateId::X), &[QubitId(0)]).unwrap();
        assert_eq!(out, basis(2, 0b10));

        let out = apply_gate(&sv, matrix_of(GateId::X), &[QubitId(1)]).unwrap();
        assert_eq!(out, basis(2, 0b01));
    }

    #[test]
    fn test_cnot_control_order() {
        let cnot = matrix_of(GateId::Cnot);

        // control q0 set: |10⟩ → |11⟩
        let out = apply_gate(&basis(2, 0b10), cnot, &[QubitId(0), QubitId(1)]).unwrap();
        assert_eq!(out, basis(2, 0b11));

        // reversed targets: q1 controls q0, so |10⟩ is unchanged
        let out = apply_gate(&basis(2, 0b10), cnot, &[QubitId(1), QubitId(0)]).unwrap();
        assert_eq!(out, basis(2, 0b10));
    }

    #[test]
    fn test_non_adjacent_targets() {
        // CNOT(0, 2) on |100⟩ → |101⟩; q1 untouched
        let out = apply_gate(
            &basis(3, 0b100),
            matrix_of(GateId::Cnot),
            &[QubitId(0), QubitId(2)],
        )
        .unwrap();
        assert_eq!(out, basis(3, 0b101));

        let out = apply_gate(
            &basis(3, 0b110),
            matrix_of(GateId::Swap),
            &[QubitId(0), QubitId(2)],
        )
        .unwrap();
        assert_eq!(out, basis(3, 0b011));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let sv = StateVector::new(1).unwrap();
        let _ = apply_gate(&sv, matrix_of(GateId::X), &[QubitId(0)]).unwrap();
        assert_eq!(sv, StateVector::new(1).unwrap());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let sv = StateVector::new(2).unwrap();

        assert!(matches!(
            apply_gate(&sv, matrix_of(GateId::Cnot), &[QubitId(0)]),
            Err(IrError::ArityMismatch {
                expected: 2,
                got: 4,
                ..
            })
        ));
        assert!(matches!(
            apply_gate(&sv, matrix_of(GateId::H), &[QubitId(2)]),
            Err(IrError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            apply_gate(&sv, matrix_of(GateId::Swap), &[QubitId(1), QubitId(1)]),
            Err(IrError::DuplicateQubit { .. })
        ));
    }
}
