//! Column-by-column circuit execution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, instrument, trace};

use joko_ir::circuit::check_disjoint;
use joko_ir::{Circuit, GateOp, PlacedGate, QubitId};

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::kernel::apply_gate;
use crate::statevector::{Outcome, StateVector};

/// Measured bits of one column, ordered by qubit.
pub type MeasurementResults = BTreeMap<QubitId, Outcome>;

/// One executed, non-empty column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    /// Column index.
    pub column: usize,
    /// Gates of the column, in application order.
    pub gates_applied: Vec<PlacedGate>,
    /// State entering the column.
    pub state_before: StateVector,
    /// State leaving the column.
    pub state_after: StateVector,
    /// Present only if the column measured something.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_results: Option<MeasurementResults>,
}

/// Outcome of [`Simulator::execute_step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// The state after every gate of the column.
    pub state: StateVector,
    /// Bits measured in the column; empty if none.
    pub measurements: MeasurementResults,
}

/// Histogram of sampled bitstrings, qubit 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u32>);

impl Counts {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u32) {
        *self.0.entry(bitstring.into()).or_insert(0) += n;
    }

    /// Observations of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u32 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total observations.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Distinct bitstrings seen.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Most frequent bitstring; ties go to the lexicographically first.
    pub fn most_frequent(&self) -> Option<(&str, u32)> {
        self.iter()
            .fold(None, |best: Option<(&str, u32)>, (k, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k, v)),
            })
    }
}

/// Step-by-step state-vector simulator.
///
/// Owns the RNG used for measurement, so two simulators built from the same
/// seed produce the same runs.
pub struct Simulator<R = StdRng> {
    config: SimulatorConfig,
    rng: R,
}

impl Simulator<StdRng> {
    /// Default configuration, entropy-seeded.
    pub fn new() -> Self {
        Self {
            config: SimulatorConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Build from a configuration; `config.seed` fixes the RNG.
    pub fn with_config(config: SimulatorConfig) -> SimResult<Self> {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl Default for Simulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Simulator<R> {
    /// Build with a caller-supplied RNG. `config.seed` is ignored.
    pub fn with_rng(config: SimulatorConfig, rng: R) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Apply one column to `state`.
    ///
    /// Every gate is resolved and checked before any is applied. Gates then
    /// run in list order: unitaries through [`apply_gate`], measurements
    /// through [`StateVector::measure`].
    ///
    /// # Errors
    ///
    /// Any gate validation error, or `DisjointColumnViolation` when
    /// `strict_columns` is set.
    pub fn execute_step(
        &mut self,
        state: &StateVector,
        gates: &[&PlacedGate],
    ) -> SimResult<StepResult> {
        let specs = gates
            .iter()
            .map(|gate| gate.validate(state.num_qubits()))
            .collect::<Result<Vec<_>, _>>()?;

        if self.config.strict_columns {
            if let Some(first) = gates.first() {
                check_disjoint(first.column, gates)?;
            }
        }

        let mut current = state.clone();
        let mut measurements = MeasurementResults::new();

        for (gate, spec) in gates.iter().zip(specs) {
            match &spec.op {
                GateOp::Unitary(matrix) => {
                    trace!(gate = %spec.id, targets = ?gate.target_qubits, "apply");
                    current = apply_gate(&current, matrix, &gate.target_qubits)?;
                }
                GateOp::Measurement => {
                    let qubit = gate.target_qubits[0];
                    let (outcome, collapsed) = current.measure(qubit, &mut self.rng)?;
                    trace!(%qubit, %outcome, "measure");
                    measurements.insert(qubit, outcome);
                    current = collapsed;
                }
            }
        }

        Ok(StepResult {
            state: current,
            measurements,
        })
    }

    /// Run a whole circuit from `|0…0⟩`, one step per non-empty column.
    ///
    /// Either every step is returned or the first error is; no partial run
    /// escapes.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    pub fn execute_circuit(&mut self, circuit: &Circuit) -> SimResult<Vec<ExecutionStep>> {
        let start = Instant::now();
        self.check_width(circuit)?;

        let mut state = StateVector::new(circuit.num_qubits())?;
        let mut steps = Vec::new();

        for (column, gates) in circuit.occupied_columns() {
            let result = self.execute_step(&state, &gates)?;
            debug!(
                column,
                gates = gates.len(),
                measured = result.measurements.len(),
                "Executed column"
            );

            steps.push(ExecutionStep {
                column,
                gates_applied: gates.into_iter().cloned().collect(),
                state_before: state,
                state_after: result.state.clone(),
                measurement_results: (!result.measurements.is_empty())
                    .then_some(result.measurements),
            });
            state = result.state;
        }

        debug!(
            steps = steps.len(),
            gates = circuit.num_gates(),
            "Circuit completed in {:?}",
            start.elapsed()
        );
        Ok(steps)
    }

    /// Final state after running `circuit`.
    pub fn final_state(&mut self, circuit: &Circuit) -> SimResult<StateVector> {
        let steps = self.execute_circuit(circuit)?;
        match steps.into_iter().last() {
            Some(step) => Ok(step.state_after),
            None => Ok(StateVector::new(circuit.num_qubits())?),
        }
    }

    /// Run `circuit` `shots` times and sample the final state of each run.
    ///
    /// A circuit without mid-circuit measurement is executed once and its
    /// final state sampled `shots` times.
    #[instrument(skip(self, circuit))]
    pub fn sample_counts(&mut self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }
        let start = Instant::now();
        debug!(
            "Starting sampling: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let mut counts = Counts::new();
        let measures = circuit
            .gates()
            .iter()
            .any(|g| matches!(g.resolve().map(|s| &s.op), Ok(GateOp::Measurement)));

        if measures {
            for shot in 0..shots {
                let state = self.final_state(circuit)?;
                let outcome = state.sample(&mut self.rng);
                counts.insert(state.bitstring(outcome), 1);

                if shot > 0 && shot % 1000 == 0 {
                    debug!("Completed {} shots", shot);
                }
            }
        } else {
            let state = self.final_state(circuit)?;
            for _ in 0..shots {
                let outcome = state.sample(&mut self.rng);
                counts.insert(state.bitstring(outcome), 1);
            }
        }

        debug!("Sampling completed in {:?}", start.elapsed());
        Ok(counts)
    }

    fn check_width(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.config.max_qubits {
            return Err(SimError::TooManyQubits {
                requested: circuit.num_qubits(),
                max: self.config.max_qubits,
            });
        }
        Ok(())
    }
}
