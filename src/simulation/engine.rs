// src/simulation/engine.rs

//! Low-level state-vector kernels.
//!
//! These operate on raw amplitude slices and assume the caller has already
//! validated gate arity and index bounds. All three use the crate's fixed
//! bit ordering: qubit `k` is bit `k` of the basis index.

use num_complex::Complex;
use num_traits::Zero;

/// Applies a 2x2 unitary to one qubit line of the register.
///
/// Iterates over pairs of basis states that differ only in the target bit
/// and mixes their amplitudes through the matrix.
pub(crate) fn apply_single_qubit(
    amplitudes: &[Complex<f64>],
    target: usize,
    matrix: &[[Complex<f64>; 2]; 2],
) -> Vec<Complex<f64>> {
    let dim = amplitudes.len();
    let mask = 1usize << target;
    let mut out = vec![Complex::zero(); dim];

    for i0 in 0..dim {
        if i0 & mask != 0 {
            continue;
        }
        let i1 = i0 | mask;
        let psi_0 = amplitudes[i0]; // amplitude for |…target=0…⟩
        let psi_1 = amplitudes[i1]; // amplitude for |…target=1…⟩
        out[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
        out[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
    }
    out
}

/// Flips the target bit of every basis state whose control bits are all 1.
///
/// With one control this is CNOT; with two it is Toffoli. The gate is a pure
/// permutation of amplitudes, so it is applied as one rather than as a full
/// 2^n x 2^n matrix.
pub(crate) fn apply_controlled_flip(
    amplitudes: &[Complex<f64>],
    controls: &[usize],
    target: usize,
) -> Vec<Complex<f64>> {
    let dim = amplitudes.len();
    let target_mask = 1usize << target;
    let control_mask = controls.iter().fold(0usize, |m, &c| m | (1usize << c));
    let mut out = vec![Complex::zero(); dim];

    for (i, &amp) in amplitudes.iter().enumerate() {
        let j = if i & control_mask == control_mask {
            i ^ target_mask
        } else {
            i
        };
        out[j] = amp;
    }
    out
}

/// Multiplies by `phase` the amplitude of every basis state in which both
/// qubits are 1. With phase −1 this is CZ.
pub(crate) fn apply_controlled_phase(
    amplitudes: &[Complex<f64>],
    control: usize,
    target: usize,
    phase: Complex<f64>,
) -> Vec<Complex<f64>> {
    let mask = (1usize << control) | (1usize << target);
    amplitudes
        .iter()
        .enumerate()
        .map(|(i, &amp)| if i & mask == mask { amp * phase } else { amp })
        .collect()
}
