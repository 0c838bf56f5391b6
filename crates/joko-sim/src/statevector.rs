//! State vectors and the operations that read or collapse them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use joko_ir::complex::{self, Complex, ONE, ZERO, format_complex, magnitude_squared};
use joko_ir::{IrError, IrResult, MAX_QUBITS, QubitId};

/// Squared magnitudes below this are treated as zero when rendering kets.
pub const KET_EPSILON: f64 = 1e-9;

/// Tolerance for the normalization invariant.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Collapsed norms at or below this are left unscaled.
const DEGENERATE_NORM: f64 = 1e-12;

/// Result of measuring one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    /// Measured `|0⟩`.
    Zero,
    /// Measured `|1⟩`.
    One,
}

impl Outcome {
    /// The outcome as a bit.
    #[inline]
    pub fn bit(self) -> usize {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        match bit {
            0 => Ok(Outcome::Zero),
            1 => Ok(Outcome::One),
            other => Err(format!("measurement outcome must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// A statevector representing a quantum state.
///
/// Holds `2^n` amplitudes; qubit 0 is the most-significant bit of each
/// index. Operations never mutate in place; each returns a new vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStateVector")]
pub struct StateVector {
    num_qubits: usize,
    /// Each amplitude serializes as `[re, im]`.
    amplitudes: Vec<Complex>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStateVector {
    num_qubits: Option<usize>,
    amplitudes: Vec<Complex>,
}

impl TryFrom<RawStateVector> for StateVector {
    type Error = IrError;

    fn try_from(raw: RawStateVector) -> Result<Self, Self::Error> {
        let state = StateVector::from_amplitudes(raw.amplitudes)?;
        match raw.num_qubits {
            Some(n) if n != state.num_qubits => Err(IrError::InvalidStateLength(state.len())),
            _ => Ok(state),
        }
    }
}

impl StateVector {
    /// `|0…0⟩` on `num_qubits` qubits.
    ///
    /// # Errors
    ///
    /// `InvalidQubitCount` if `num_qubits < 1`, `TooManyQubits` if it
    /// exceeds [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> IrResult<Self> {
        if num_qubits < 1 {
            return Err(IrError::InvalidQubitCount(num_qubits));
        }
        if num_qubits > MAX_QUBITS {
            return Err(IrError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Wrap raw amplitudes. The length must be `2^n` with `n >= 1`;
    /// normalization is not checked.
    pub fn from_amplitudes(amplitudes: Vec<Complex>) -> IrResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(IrError::InvalidStateLength(len));
        }
        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Register width.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always `false`; a state has at least two amplitudes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// All amplitudes in basis-index order.
    #[inline]
    pub fn amplitudes(&self) -> &[Complex] {
        &self.amplitudes
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Option<Complex> {
        self.amplitudes.get(index).copied()
    }

    /// Give up the amplitude buffer.
    pub fn into_amplitudes(self) -> Vec<Complex> {
        self.amplitudes
    }

    /// Bit position of `qubit` inside a basis index, or `IndexOutOfRange`.
    pub(crate) fn bit_position(&self, qubit: QubitId) -> IrResult<usize> {
        if qubit.index() >= self.num_qubits {
            return Err(IrError::IndexOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: None,
            });
        }
        Ok(qubit.bit_position(self.num_qubits))
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|&a| magnitude_squared(a)).collect()
    }

    /// Probability that `qubit` reads 1.
    pub fn qubit_probability(&self, qubit: QubitId) -> IrResult<f64> {
        let mask = 1 << self.bit_position(qubit)?;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, &a)| magnitude_squared(a))
            .sum())
    }

    /// `Σ|a|²`.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|&a| magnitude_squared(a)).sum()
    }

    /// `|Σ|a|² - 1| <= tol`.
    pub fn is_normalized(&self, tol: f64) -> bool {
        (self.total_probability() - 1.0).abs() <= tol
    }

    /// Same width and every amplitude within `tol`.
    pub fn approx_eq(&self, other: &StateVector, tol: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(&a, &b)| complex::approx_eq(a, b, tol))
    }

    /// Phase angle of each amplitude, in `(-π, π]`.
    pub fn phases(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.arg()).collect()
    }

    /// Bloch vector `[x, y, z]` of `qubit`'s reduced density matrix.
    ///
    /// Entangled qubits have length below one; half of a Bell pair sits at
    /// the origin.
    pub fn bloch_vector(&self, qubit: QubitId) -> IrResult<[f64; 3]> {
        let mask = 1 << self.bit_position(qubit)?;

        let mut rho00 = 0.0;
        let mut rho11 = 0.0;
        let mut rho10 = ZERO;
        for i in (0..self.len()).filter(|i| i & mask == 0) {
            let a0 = self.amplitudes[i];
            let a1 = self.amplitudes[i | mask];
            rho00 += magnitude_squared(a0);
            rho11 += magnitude_squared(a1);
            rho10 += a1 * a0.conj();
        }

        // ρ01 = conj(ρ10)
        Ok([2.0 * rho10.re, 2.0 * rho10.im, rho00 - rho11])
    }

    /// Bitstring label of a basis index, qubit 0 first.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{index:0width$b}", width = self.num_qubits)
    }

    /// Dirac-notation rendering, e.g. `(0.7071)|00⟩ + (0.7071)|11⟩`.
    ///
    /// Terms with `|a|² < 1e-9` are omitted; an all-zero vector renders as
    /// `0`.
    pub fn format_ket(&self) -> String {
        let terms: Vec<String> = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| magnitude_squared(**a) >= KET_EPSILON)
            .map(|(i, &a)| format!("({})|{}⟩", format_complex(a, 4), self.bitstring(i)))
            .collect();

        if terms.is_empty() {
            "0".to_string()
        } else {
            terms.join(" + ")
        }
    }

    // =========================================================================
    // Random operations
    // =========================================================================

    /// Measure `qubit` in the computational basis.
    ///
    /// Returns the outcome and the collapsed, renormalized state. If the
    /// surviving norm is at or below `1e-12` the collapsed state is returned
    /// unscaled.
    pub fn measure<R: Rng + ?Sized>(
        &self,
        qubit: QubitId,
        rng: &mut R,
    ) -> IrResult<(Outcome, StateVector)> {
        let bit_position = self.bit_position(qubit)?;
        let prob_one = self.qubit_probability(qubit)?;

        let outcome = if rng.r#gen::<f64>() < prob_one {
            Outcome::One
        } else {
            Outcome::Zero
        };

        let keep = outcome.bit();
        let mut amplitudes: Vec<Complex> = self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, &a)| if (i >> bit_position) & 1 == keep { a } else { ZERO })
            .collect();

        let prob_outcome = match outcome {
            Outcome::One => prob_one,
            Outcome::Zero => 1.0 - prob_one,
        };
        let norm = prob_outcome.max(0.0).sqrt();
        if norm > DEGENERATE_NORM {
            let inv = 1.0 / norm;
            for a in &mut amplitudes {
                *a *= inv;
            }
        } else {
            warn!(
                %qubit,
                %outcome,
                norm,
                "degenerate measurement: collapsed state left unnormalized"
            );
        }

        Ok((
            outcome,
            StateVector {
                num_qubits: self.num_qubits,
                amplitudes,
            },
        ))
    }

    /// Draw a basis index by the Born rule.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        let mut last_nonzero = 0;
        for (i, &amp) in self.amplitudes.iter().enumerate() {
            let p = magnitude_squared(amp);
            if p > 0.0 {
                last_nonzero = i;
            }
            cumulative += p;
            if r < cumulative {
                return i;
            }
        }

        // Rounding left the cumulative sum just below r.
        last_nonzero
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_ket())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joko_ir::complex::complex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn bell() -> StateVector {
        StateVector::from_amplitudes(vec![
            complex(FRAC_1_SQRT_2, 0.0),
            ZERO,
            ZERO,
            complex(FRAC_1_SQRT_2, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sv = StateVector::new(2).unwrap();
        assert_eq!(sv.len(), 4);
        assert_eq!(sv.amplitudes(), &[ONE, ZERO, ZERO, ZERO]);
        assert_eq!(sv.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
        assert!(sv.is_normalized(NORM_TOLERANCE));
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert_eq!(StateVector::new(0), Err(IrError::InvalidQubitCount(0)));
    }

    #[test]
    fn test_oversized_register_rejected() {
        for n in [MAX_QUBITS + 1, 40, 64, usize::MAX] {
            assert_eq!(
                StateVector::new(n),
                Err(IrError::TooManyQubits {
                    requested: n,
                    max: MAX_QUBITS,
                })
            );
        }
        assert_eq!(StateVector::new(MAX_QUBITS - 10).unwrap().num_qubits(), 10);
    }

    /// Always yields zero bits, so `r#gen::<f64>()` draws `0.0`.
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_degenerate_measurement_left_unscaled() {
        // P(1) = 1e-26: r = 0 still selects |1⟩, whose norm is 1e-13.
        let tiny = complex(1e-13, 0.0);
        let sv = StateVector::from_amplitudes(vec![ONE, tiny]).unwrap();

        let (outcome, collapsed) = sv.measure(QubitId(0), &mut ZeroRng).unwrap();
        assert_eq!(outcome, Outcome::One);
        assert_eq!(collapsed.amplitudes(), &[ZERO, tiny]);
        assert!(!collapsed.is_normalized(NORM_TOLERANCE));
    }

    #[test]
    fn test_measurement_renormalizes_above_threshold() {
        let small = complex(1e-6, 0.0);
        let sv = StateVector::from_amplitudes(vec![ONE, small]).unwrap();

        let (outcome, collapsed) = sv.measure(QubitId(0), &mut ZeroRng).unwrap();
        assert_eq!(outcome, Outcome::One);
        assert!(approx(collapsed.amplitude(1).unwrap().re, 1.0));
        assert_eq!(collapsed.amplitude(0), Some(ZERO));
    }

    #[test]
    fn test_from_amplitudes_length() {
        assert!(StateVector::from_amplitudes(vec![ONE]).is_err());
        assert!(StateVector::from_amplitudes(vec![ONE, ZERO, ZERO]).is_err());
        assert_eq!(
            StateVector::from_amplitudes(vec![ONE; 8]).unwrap().num_qubits(),
            3
        );
    }

    #[test]
    fn test_qubit_probability_is_big_endian() {
        // |01⟩: q0 = 0, q1 = 1
        let sv = StateVector::from_amplitudes(vec![ZERO, ONE, ZERO, ZERO]).unwrap();
        assert!(approx(sv.qubit_probability(QubitId(0)).unwrap(), 0.0));
        assert!(approx(sv.qubit_probability(QubitId(1)).unwrap(), 1.0));
        assert!(matches!(
            sv.qubit_probability(QubitId(2)),
            Err(IrError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_format_ket() {
        assert_eq!(StateVector::new(2).unwrap().format_ket(), "(1)|00⟩");
        assert_eq!(bell().format_ket(), "(0.7071)|00⟩ + (0.7071)|11⟩");

        let phased =
            StateVector::from_amplitudes(vec![complex(0.0, FRAC_1_SQRT_2), complex(-0.5, 0.5)])
                .unwrap();
        assert_eq!(phased.format_ket(), "(0.7071i)|0⟩ + (-0.5+0.5i)|1⟩");

        let tiny = StateVector::from_amplitudes(vec![complex(1e-6, 0.0), ZERO]).unwrap();
        assert_eq!(tiny.format_ket(), "0");
        assert_eq!(tiny.to_string(), "0");
    }

    #[test]
    fn test_measure_collapses_bell_pair() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (outcome, collapsed) = bell().measure(QubitId(0), &mut rng).unwrap();
            let expected = match outcome {
                Outcome::Zero => [ONE, ZERO, ZERO, ZERO],
                Outcome::One => [ZERO, ZERO, ZERO, ONE],
            };
            let expected = StateVector::from_amplitudes(expected.to_vec()).unwrap();
            assert!(collapsed.approx_eq(&expected, 1e-12));
            assert!(collapsed.is_normalized(NORM_TOLERANCE));
        }
    }

    #[test]
    fn test_measure_deterministic_state() {
        let one = StateVector::from_amplitudes(vec![ZERO, ONE]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            let (outcome, after) = one.measure(QubitId(0), &mut rng).unwrap();
            assert_eq!(outcome, Outcome::One);
            assert_eq!(after, one);
        }
    }

    #[test]
    fn test_measure_leaves_input_untouched() {
        let before = bell();
        let mut rng = StdRng::seed_from_u64(1);
        let _ = before.measure(QubitId(1), &mut rng).unwrap();
        assert_eq!(before, bell());
    }

    #[test]
    fn test_bloch_vectors() {
        let zero = StateVector::new(1).unwrap();
        assert_eq!(zero.bloch_vector(QubitId(0)).unwrap(), [0.0, 0.0, 1.0]);

        let plus = StateVector::from_amplitudes(vec![
            complex(FRAC_1_SQRT_2, 0.0),
            complex(FRAC_1_SQRT_2, 0.0),
        ])
        .unwrap();
        let [x, y, z] = plus.bloch_vector(QubitId(0)).unwrap();
        assert!(approx(x, 1.0) && approx(y, 0.0) && approx(z, 0.0));

        let plus_i = StateVector::from_amplitudes(vec![
            complex(FRAC_1_SQRT_2, 0.0),
            complex(0.0, FRAC_1_SQRT_2),
        ])
        .unwrap();
        let [x, y, z] = plus_i.bloch_vector(QubitId(0)).unwrap();
        assert!(approx(x, 0.0) && approx(y, 1.0) && approx(z, 0.0));

        for q in 0..2 {
            let [x, y, z] = bell().bloch_vector(QubitId(q)).unwrap();
            assert!(approx(x, 0.0) && approx(y, 0.0) && approx(z, 0.0));
        }
    }

    #[test]
    fn test_sample_deterministic() {
        // |10⟩ should always sample to index 2
        let sv = StateVector::from_amplitudes(vec![ZERO, ZERO, ONE, ZERO]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 2);
        }
        assert_eq!(sv.bitstring(2), "10");
    }

    #[test]
    fn test_phases() {
        let sv = StateVector::from_amplitudes(vec![ONE, complex(0.0, 1.0)]).unwrap();
        let phases = sv.phases();
        assert!(approx(phases[0], 0.0));
        assert!(approx(phases[1], std::f64::consts::FRAC_PI_2));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(bell()).unwrap();
        assert_eq!(json["numQubits"], 2);
        assert_eq!(json["amplitudes"][0][0], FRAC_1_SQRT_2);
        assert_eq!(json["amplitudes"][0][1], 0.0);

        let back: StateVector = serde_json::from_value(json).unwrap();
        assert_eq!(back, bell());

        let bad = serde_json::json!({ "amplitudes": [[1.0, 0.0]] });
        assert!(serde_json::from_value::<StateVector>(bad).is_err());

        assert_eq!(serde_json::to_string(&Outcome::One).unwrap(), "1");
    }
}
