// src/core/state.rs

use super::error::KetLabError;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes below this are omitted from the `Display` ket expansion.
const DISPLAY_CUTOFF: f64 = 1e-3;

/// The joint state of an n-qubit register: a complex vector of length 2^n.
///
/// # Index convention
///
/// Qubit `k` is bit `k` of the basis index: qubit 0 is the
/// **least-significant** bit. A ket label is read right to left, so
/// `|q2 q1 q0⟩` and basis index `i` satisfy `q_k = (i >> k) & 1`.
/// For example in a 2-qubit register, `|10⟩` (qubit 1 set) is index 2.
/// This convention is applied uniformly in state preparation, gate
/// application, and display.
///
/// Unitary evolution preserves the squared norm; every constructor yields a
/// unit vector and the simulation keeps it within ~1e-6 of 1.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    qubit_count: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates the all-zeros basis state `|0…0⟩` for an n-qubit register.
    ///
    /// Fails with [`KetLabError::InvalidQubitCount`] for an empty register or
    /// one whose 2^n dimension would overflow `usize`.
    pub fn zero(qubit_count: usize) -> Result<Self, KetLabError> {
        let dim = checked_dimension(qubit_count)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            qubit_count,
            amplitudes,
        })
    }

    /// Creates the basis state whose classical bit pattern is `bits`
    /// (qubit `k` = bit `k` of `bits`).
    pub fn from_bits(qubit_count: usize, bits: u64) -> Result<Self, KetLabError> {
        let dim = checked_dimension(qubit_count)?;
        if bits as u128 >= dim as u128 {
            return Err(KetLabError::QubitIndexOutOfRange {
                index: 63 - bits.leading_zeros() as usize,
                qubit_count,
            });
        }
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[bits as usize] = Complex::new(1.0, 0.0);
        Ok(Self {
            qubit_count,
            amplitudes,
        })
    }

    /// Wraps an explicit amplitude vector, checking it has length 2^n.
    ///
    /// The caller is responsible for normalization; the ket tables and the
    /// engine only ever hand in unit vectors.
    pub fn from_amplitudes(
        qubit_count: usize,
        amplitudes: Vec<Complex<f64>>,
    ) -> Result<Self, KetLabError> {
        let dim = checked_dimension(qubit_count)?;
        if amplitudes.len() != dim {
            return Err(KetLabError::DimensionMismatch {
                expected: dim,
                actual: amplitudes.len(),
            });
        }
        Ok(Self {
            qubit_count,
            amplitudes,
        })
    }

    /// Number of qubits represented by this state.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Length of the amplitude vector (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only access to the amplitude vector.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Sum of squared amplitude magnitudes. 1.0 for a valid state, up to
    /// floating-point drift.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Measurement probability of each basis outcome, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Formats a basis index as a ket label under the crate convention,
    /// e.g. index 2 in a 2-qubit register is `|10⟩`.
    pub fn basis_label(&self, index: usize) -> String {
        let mut bits = String::with_capacity(self.qubit_count);
        for k in (0..self.qubit_count).rev() {
            bits.push(if (index >> k) & 1 == 1 { '1' } else { '0' });
        }
        format!("|{bits}⟩")
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() <= DISPLAY_CUTOFF * DISPLAY_CUTOFF {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "({:.4}{:+.4}i){}", amp.re, amp.im, self.basis_label(i))?;
            first = false;
        }
        if first {
            write!(f, "(~0)")?;
        }
        Ok(())
    }
}

/// 2^n as usize, rejecting n = 0 and overflow.
pub(crate) fn checked_dimension(qubit_count: usize) -> Result<usize, KetLabError> {
    if qubit_count == 0 {
        return Err(KetLabError::InvalidQubitCount {
            message: "register must contain at least one qubit".to_string(),
        });
    }
    1usize
        .checked_shl(qubit_count as u32)
        .ok_or_else(|| KetLabError::InvalidQubitCount {
            message: format!("2^{qubit_count} state vector dimension overflows usize"),
        })
}
