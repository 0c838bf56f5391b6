//! Joko Circuit Representation
//!
//! This crate holds everything a Joko circuit is made of, independent of how
//! it is simulated.
//!
//! # Core Components
//!
//! - **Complex numbers**: [`Complex`] and the helpers in [`complex`]
//! - **Gates**: [`GateId`] for the fixed catalogue and [`GateSpec`] for each
//!   entry's matrix and metadata
//! - **Circuits**: [`PlacedGate`] puts a gate on qubits at a column;
//!   [`Circuit`] groups them into columns and validates them
//! - **Presets**: canned lesson circuits in [`presets`]
//!
//! Qubit 0 is the most-significant bit of every basis-state index.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use joko_ir::{Circuit, GateId};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(0, 0).cnot(0, 1, 1);
//!
//! assert!(circuit.validate().is_ok());
//! assert_eq!(circuit.columns().unwrap().len(), 2);
//! assert_eq!(circuit.gates()[1].gate_id, GateId::Cnot.as_str());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `T` | 1 | Phase gates |
//! | `CNOT` (`CX`) | 2 | Controlled-NOT, targets `[control, target]` |
//! | `SWAP` | 2 | Exchange two qubits |
//! | `M` | 1 | Computational-basis measurement |

pub mod circuit;
pub mod complex;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod presets;
pub mod qubit;

pub use circuit::{Circuit, MAX_COLUMN, PlacedGate};
pub use complex::Complex;
pub use error::{IrError, IrResult};
pub use gate::{GateId, GateOp, GateSpec, catalogue, lookup};
pub use matrix::Matrix;
pub use presets::{Oracle, Preset, UnknownPreset};
pub use qubit::{MAX_QUBITS, QubitId};
