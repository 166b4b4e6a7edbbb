// src/core/kets.rs

//! Symbolic ket labels and initial-state preparation.
//!
//! The puzzle catalog names its input and target states symbolically
//! (`"|0⟩"`, `"|Φ+⟩"`, `"|GHZ⟩"`, …). Two kinds of label are supported:
//!
//! * **Product labels** whose characters are all drawn from `{0, 1, +, -}`
//!   are parsed generically as a tensor product of single-qubit components,
//!   rightmost character = qubit 0. This covers every plain bit-pattern ket
//!   (`|0⟩`, `|10⟩`, `|110⟩`) as well as `|++⟩`, `|+0⟩` and friends without
//!   any table entries.
//! * **Named states** come from one closed lookup table below. The
//!   amplitudes are fixed data, expressed in the crate's
//!   qubit-0-is-least-significant convention.
//!
//! Any other label fails with [`KetLabError::UnknownStateLabel`]. There is
//! deliberately no fallback to `|0…0⟩`: a typo in a level file surfaces as
//! an error instead of a puzzle that silently checks against the wrong
//! target.

use super::error::KetLabError;
use super::state::{StateVector, checked_dimension};
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

/// How a caller names an initial state: symbolically, or as an explicit
/// classical bit pattern (qubit `k` = bit `k`).
#[derive(Debug, Clone, PartialEq)]
pub enum StateSpec {
    /// A symbolic ket label such as `"|+⟩"` or `"|Φ+⟩"`.
    Label(String),
    /// A classical bit pattern over the register.
    BitPattern(u64),
}

impl From<&str> for StateSpec {
    fn from(label: &str) -> Self {
        StateSpec::Label(label.to_string())
    }
}

/// Builds the initial state for a register of `qubit_count` qubits.
///
/// A symbolic label must describe exactly `qubit_count` qubits, otherwise
/// the call fails with [`KetLabError::DimensionMismatch`]; a bit pattern
/// must fit in `qubit_count` bits.
pub fn prepare_initial_state(
    qubit_count: usize,
    spec: &StateSpec,
) -> Result<StateVector, KetLabError> {
    match spec {
        StateSpec::Label(label) => {
            let expected = checked_dimension(qubit_count)?;
            let state = state_from_label(label)?;
            if state.qubit_count() != qubit_count {
                return Err(KetLabError::DimensionMismatch {
                    expected,
                    actual: state.dim(),
                });
            }
            Ok(state)
        }
        StateSpec::BitPattern(bits) => StateVector::from_bits(qubit_count, *bits),
    }
}

/// Resolves a symbolic ket label to its canonical state vector.
///
/// The register size is implied by the label itself.
pub fn state_from_label(label: &str) -> Result<StateVector, KetLabError> {
    let inner = strip_ket_delimiters(label);
    if inner.is_empty() {
        return Err(KetLabError::UnknownStateLabel {
            label: label.to_string(),
        });
    }

    if inner.chars().all(|c| matches!(c, '0' | '1' | '+' | '-')) {
        return product_state(inner);
    }

    match named_state(inner) {
        Some((qubit_count, amplitudes)) => StateVector::from_amplitudes(qubit_count, amplitudes),
        None => Err(KetLabError::UnknownStateLabel {
            label: label.to_string(),
        }),
    }
}

/// Removes the surrounding `|` and `⟩` if present; labels may be written
/// either way.
fn strip_ket_delimiters(label: &str) -> &str {
    let s = label.trim();
    let s = s.strip_prefix('|').unwrap_or(s);
    s.strip_suffix('⟩').unwrap_or(s)
}

/// Tensor product of per-character single-qubit states, leftmost character
/// at the most-significant position.
fn product_state(inner: &str) -> Result<StateVector, KetLabError> {
    let mut amplitudes = vec![Complex::new(1.0, 0.0)];
    for c in inner.chars() {
        let component = single_qubit_component(c);
        let mut next = Vec::with_capacity(amplitudes.len() * 2);
        for amp in &amplitudes {
            next.push(amp * component[0]);
            next.push(amp * component[1]);
        }
        amplitudes = next;
    }
    StateVector::from_amplitudes(inner.chars().count(), amplitudes)
}

fn single_qubit_component(c: char) -> [Complex<f64>; 2] {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    match c {
        '0' => [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
        '1' => [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
        '+' => [h, h],
        // callers guarantee c is one of {0,1,+,-}
        _ => [h, -h],
    }
}

/// The closed table of named states used by the level catalog.
///
/// This mapping is data, not behavior; the vectors are fixed constants,
/// expressed in the crate's bit ordering.
fn named_state(inner: &str) -> Option<(usize, Vec<Complex<f64>>)> {
    let rt2 = FRAC_1_SQRT_2;
    let i = Complex::i();
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::new(0.0, 0.0);
    let (qubit_count, amplitudes): (usize, Vec<Complex<f64>>) = match inner {
        // Y|0⟩ = i|1⟩
        "i·1" => (1, vec![zero, i]),
        // S|+⟩
        "+i" => (1, vec![one * rt2, i * rt2]),
        // T|+⟩
        "T+" => (1, vec![one * rt2, Complex::from_polar(rt2, std::f64::consts::FRAC_PI_4)]),
        "Φ+" => (2, scaled(&[1.0, 0.0, 0.0, 1.0], rt2)),
        "Φ-" => (2, scaled(&[1.0, 0.0, 0.0, -1.0], rt2)),
        "Ψ+" => (2, scaled(&[0.0, 1.0, 1.0, 0.0], rt2)),
        "Ψ-" => (2, scaled(&[0.0, 1.0, -1.0, 0.0], rt2)),
        // 2-qubit QFT of |00⟩
        "QFT" => (2, scaled(&[1.0, 1.0, 1.0, 1.0], 0.5)),
        // destructive interference pattern
        "Interference" => (2, scaled(&[1.0, 0.0, 0.0, -1.0], rt2)),
        "GHZ" => (3, scaled(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0], rt2)),
        // (|001⟩ + |010⟩ + |100⟩)/√3
        "W" => (
            3,
            scaled(&[0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0], 1.0 / 3f64.sqrt()),
        ),
        // |0⟩ on qubit 2, |Φ+⟩ on qubits 1 and 0
        "0Φ+" => (3, scaled(&[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], rt2)),
        // three-party secret sharing state
        "Secret" => (
            3,
            scaled(
                &[1.0, 1.0, 1.0, -1.0, 1.0, -1.0, -1.0, 1.0],
                0.5 * rt2,
            ),
        ),
        // 3-qubit bit-flip code word for logical |0⟩
        "ErrorCode" => (3, scaled(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1.0)),
        // error syndrome pattern
        "err" => (3, scaled(&[1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0], 0.5)),
        "MaxEnt" => (4, scaled(&[1.0; 16], 0.25)),
        "Ultimate" => (4, {
            [
                one, i, -one, -i, i, -one, -i, one, -one, -i, one, i, -i, one, i, -one,
            ]
            .iter()
            .map(|&c| c * 0.25)
            .collect()
        }),
        _ => return None,
    };
    Some((qubit_count, amplitudes))
}

fn scaled(values: &[f64], factor: f64) -> Vec<Complex<f64>> {
    values
        .iter()
        .map(|v| Complex::new(v * factor, 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_pattern_labels_follow_lsb_convention() {
        // |10⟩ sets qubit 1, which is bit 1 of the index: index 2.
        let state = state_from_label("|10⟩").unwrap();
        assert_eq!(state.qubit_count(), 2);
        assert!((state.amplitudes()[2].re - 1.0).abs() < 1e-12);
        assert!(state.amplitudes()[1].norm_sqr() < 1e-12);
    }

    #[test]
    fn product_labels_cover_plus_minus() {
        let state = state_from_label("|+0⟩").unwrap();
        // |+⟩ on qubit 1, |0⟩ on qubit 0: indices 0 and 2.
        assert!((state.amplitudes()[0].re - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((state.amplitudes()[2].re - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!(state.amplitudes()[1].norm_sqr() < 1e-12);
        assert!(state.amplitudes()[3].norm_sqr() < 1e-12);
    }

    #[test]
    fn named_states_are_normalized() {
        for label in [
            "|i·1⟩", "|+i⟩", "|T+⟩", "|Φ+⟩", "|Φ-⟩", "|Ψ+⟩", "|Ψ-⟩", "|QFT⟩",
            "|Interference⟩", "|GHZ⟩", "|W⟩", "|0Φ+⟩", "|Secret⟩", "|ErrorCode⟩",
            "|err⟩", "|MaxEnt⟩", "|Ultimate⟩",
        ] {
            let state = state_from_label(label).unwrap();
            assert!(
                (state.norm_sqr() - 1.0).abs() < 1e-9,
                "{label} has norm² {}",
                state.norm_sqr()
            );
        }
    }

    #[test]
    fn unknown_labels_fail_loudly() {
        let err = state_from_label("|nonsense⟩").unwrap_err();
        assert!(matches!(err, KetLabError::UnknownStateLabel { .. }));
    }

    #[test]
    fn initial_state_dimension_must_match_register() {
        let err = prepare_initial_state(2, &StateSpec::from("|0⟩")).unwrap_err();
        assert_eq!(
            err,
            KetLabError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn oversized_registers_error_instead_of_overflowing() {
        // 2^100 exceeds usize; the call must return the size error, not
        // overflow a shift while building the mismatch report.
        let err = prepare_initial_state(100, &StateSpec::from("|0⟩")).unwrap_err();
        assert!(matches!(err, KetLabError::InvalidQubitCount { .. }));
    }

    #[test]
    fn bit_pattern_spec_prepares_basis_state() {
        let state = prepare_initial_state(3, &StateSpec::BitPattern(0b110)).unwrap();
        assert!((state.amplitudes()[6].re - 1.0).abs() < 1e-12);
    }
}
