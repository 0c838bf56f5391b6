//! Property-based tests for execution invariants.
//!
//! Random circuits over the whole catalogue must keep every step normalized
//! and chain each step's output into the next step's input.

use joko_ir::{Circuit, GateId, GateSpec, QubitId, catalogue};
use joko_sim::statevector::NORM_TOLERANCE;
use joko_sim::{Simulator, SimulatorConfig, StateVector, apply_gate};
use proptest::prelude::*;

/// One gate draw: catalogue entry, two candidate qubits, gap before it.
fn arb_gate(num_qubits: u32) -> impl Strategy<Value = (GateId, u32, u32, usize)> {
    (
        prop::sample::select(GateId::ALL.to_vec()),
        0..num_qubits,
        0..num_qubits,
        0_usize..3,
    )
}

/// Circuits with 1-4 qubits and up to 12 gates, one gate per column.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate(num_qubits), 0..=12).prop_map(move |draws| {
            let mut circuit = Circuit::new(num_qubits as usize);
            let mut column = 0;
            for (id, a, b, gap) in draws {
                column += gap;
                if id.num_qubits() == 2 {
                    if num_qubits < 2 {
                        continue;
                    }
                    let b = if a == b { (a + 1) % num_qubits } else { b };
                    circuit.place(id, [a, b], column);
                } else {
                    circuit.place(id, [a], column);
                }
                column += 1;
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn steps_stay_normalized(circuit in arb_circuit(), seed in any::<u64>()) {
        let mut sim = Simulator::with_config(SimulatorConfig::default().with_seed(seed)).unwrap();
        let steps = sim.execute_circuit(&circuit).unwrap();

        for step in &steps {
            prop_assert!(step.state_after.is_normalized(NORM_TOLERANCE));
            prop_assert_eq!(step.state_after.len(), 1 << circuit.num_qubits());
        }
        for pair in steps.windows(2) {
            prop_assert_eq!(&pair[0].state_after, &pair[1].state_before);
        }
    }

    #[test]
    fn step_count_matches_occupied_columns(circuit in arb_circuit()) {
        let mut sim = Simulator::with_config(SimulatorConfig::default().with_seed(0)).unwrap();
        let steps = sim.execute_circuit(&circuit).unwrap();
        let occupied = circuit.columns().unwrap().iter().filter(|c| !c.is_empty()).count();
        prop_assert_eq!(steps.len(), occupied);
    }

    #[test]
    fn unitary_then_inverse_is_identity(
        idx in 0_usize..8,
        num_qubits in 2_usize..=4,
        q in 0_u32..4,
    ) {
        let spec: &GateSpec = &catalogue()[idx];
        let Some(matrix) = spec.op.matrix() else {
            return Ok(());
        };
        let q = q % num_qubits as u32;
        let targets: Vec<QubitId> = (0..spec.num_qubits as u32)
            .map(|i| QubitId((q + i) % num_qubits as u32))
            .collect();

        let h = GateSpec::get(GateId::H).op.matrix().unwrap();
        let start = apply_gate(&StateVector::new(num_qubits).unwrap(), h, &[QubitId(0)]).unwrap();

        let dagger = joko_ir::matrix::dagger(matrix);
        let there = apply_gate(&start, matrix, &targets).unwrap();
        let back = apply_gate(&there, &dagger, &targets).unwrap();
        prop_assert!(back.approx_eq(&start, 1e-12));
    }
}
