//! Canned circuits from the lesson set.
//!
//! All presets use qubit 0 as the most-significant bit, so a bitstring reads
//! `q0 q1 ...` from left to right.

use std::fmt;
use std::str::FromStr;

use crate::circuit::Circuit;

/// The function hidden inside a Deutsch oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Oracle {
    /// f(x) = 0
    ConstantZero,
    /// f(x) = 1
    ConstantOne,
    /// f(x) = x
    Identity,
    /// f(x) = NOT x
    Negation,
}

impl Oracle {
    /// All oracles.
    pub const ALL: [Oracle; 4] = [
        Oracle::ConstantZero,
        Oracle::ConstantOne,
        Oracle::Identity,
        Oracle::Negation,
    ];

    /// `true` for the two balanced functions.
    pub fn is_balanced(self) -> bool {
        matches!(self, Oracle::Identity | Oracle::Negation)
    }

    fn as_str(self) -> &'static str {
        match self {
            Oracle::ConstantZero => "constant-0",
            Oracle::ConstantOne => "constant-1",
            Oracle::Identity => "identity",
            Oracle::Negation => "negation",
        }
    }
}

/// Bell pair `(|00⟩ + |11⟩)/√2`.
pub fn bell() -> Circuit {
    let mut circuit = Circuit::new(2);
    circuit.h(0, 0).cnot(0, 1, 1);
    circuit
}

/// `n`-qubit GHZ state: H on q0, then a CNOT fan-out one column per target.
pub fn ghz(n: usize) -> Circuit {
    let mut circuit = Circuit::new(n);
    circuit.h(0, 0);
    for target in 1..n {
        circuit.cnot(0, target as u32, target);
    }
    circuit
}

/// Measure a qubit in equal superposition.
pub fn superposition_measurement() -> Circuit {
    let mut circuit = Circuit::new(1);
    circuit.h(0, 0).measure(0, 1);
    circuit
}

/// H, measure, H again: the collapsed state does not return to `|0⟩`.
pub fn irreversible_measurement() -> Circuit {
    let mut circuit = Circuit::new(1);
    circuit.h(0, 0).measure(0, 1).h(0, 2);
    circuit
}

/// Bell pair with only q0 measured; q1 collapses with it.
pub fn partial_measurement() -> Circuit {
    let mut circuit = bell();
    circuit.measure(0, 2);
    circuit
}

/// Superdense coding of two classical bits `[b0, b1]` through one qubit.
///
/// Measuring q0 yields `b0`, q1 yields `b1`.
pub fn superdense(bits: [bool; 2]) -> Circuit {
    let [b0, b1] = bits;
    let mut circuit = bell();
    if b1 {
        circuit.x(0, 2);
    }
    if b0 {
        circuit.z(0, 3);
    }
    circuit.cnot(0, 1, 4).h(0, 5).measure(0, 6).measure(1, 6);
    circuit
}

/// Deutsch's algorithm; q0 measures 0 for a constant oracle, 1 for a
/// balanced one.
pub fn deutsch(oracle: Oracle) -> Circuit {
    let mut circuit = Circuit::new(2);
    circuit.x(1, 0).h(0, 1).h(1, 1);
    match oracle {
        Oracle::ConstantZero => {}
        Oracle::ConstantOne => {
            circuit.x(1, 2);
        }
        Oracle::Identity => {
            circuit.cnot(0, 1, 2);
        }
        Oracle::Negation => {
            circuit.cnot(0, 1, 2).x(1, 3);
        }
    }
    circuit.h(0, 4).measure(0, 5);
    circuit
}

/// Teleportation of q0 onto q2, up to the classically controlled fix-ups.
pub fn teleportation() -> Circuit {
    let mut circuit = Circuit::new(3);
    circuit
        .h(1, 0)
        .cnot(1, 2, 1)
        .cnot(0, 1, 2)
        .h(0, 3)
        .measure(0, 4)
        .measure(1, 4);
    circuit
}

/// A named canned circuit, selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// See [`bell`].
    Bell,
    /// See [`ghz`], three qubits.
    Ghz3,
    /// See [`superposition_measurement`].
    SuperpositionMeasurement,
    /// See [`irreversible_measurement`].
    IrreversibleMeasurement,
    /// See [`partial_measurement`].
    PartialMeasurement,
    /// See [`superdense`].
    Superdense([bool; 2]),
    /// See [`deutsch`].
    Deutsch(Oracle),
    /// See [`teleportation`].
    Teleportation,
}

impl Preset {
    /// Every preset, including each superdense message and Deutsch oracle.
    pub fn all() -> Vec<Preset> {
        let mut presets = vec![
            Preset::Bell,
            Preset::Ghz3,
            Preset::SuperpositionMeasurement,
            Preset::IrreversibleMeasurement,
            Preset::PartialMeasurement,
        ];
        for bits in [[false, false], [false, true], [true, false], [true, true]] {
            presets.push(Preset::Superdense(bits));
        }
        presets.extend(Oracle::ALL.into_iter().map(Preset::Deutsch));
        presets.push(Preset::Teleportation);
        presets
    }

    /// Command-line name, e.g. `superdense-10` or `deutsch-identity`.
    pub fn name(self) -> String {
        match self {
            Preset::Bell => "bell".into(),
            Preset::Ghz3 => "ghz".into(),
            Preset::SuperpositionMeasurement => "superposition".into(),
            Preset::IrreversibleMeasurement => "irreversible".into(),
            Preset::PartialMeasurement => "partial".into(),
            Preset::Superdense([b0, b1]) => {
                format!("superdense-{}{}", u8::from(b0), u8::from(b1))
            }
            Preset::Deutsch(oracle) => format!("deutsch-{}", oracle.as_str()),
            Preset::Teleportation => "teleportation".into(),
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Preset::Bell => "Entangled Bell pair (|00> + |11>)/sqrt(2)",
            Preset::Ghz3 => "Three-qubit GHZ state (|000> + |111>)/sqrt(2)",
            Preset::SuperpositionMeasurement => "Measure a qubit in equal superposition",
            Preset::IrreversibleMeasurement => "H, measure, H: measurement cannot be undone",
            Preset::PartialMeasurement => "Measure one half of a Bell pair",
            Preset::Superdense(_) => "Send two classical bits with one entangled qubit",
            Preset::Deutsch(_) => "Decide constant vs balanced with one oracle query",
            Preset::Teleportation => "Teleport q0 onto q2 (before classical corrections)",
        }
    }

    /// Build the circuit.
    pub fn circuit(self) -> Circuit {
        match self {
            Preset::Bell => bell(),
            Preset::Ghz3 => ghz(3),
            Preset::SuperpositionMeasurement => superposition_measurement(),
            Preset::IrreversibleMeasurement => irreversible_measurement(),
            Preset::PartialMeasurement => partial_measurement(),
            Preset::Superdense(bits) => superdense(bits),
            Preset::Deutsch(oracle) => deutsch(oracle),
            Preset::Teleportation => teleportation(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Error returned when a preset name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset: \"{0}\"")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Preset::all()
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
