// src/gates/mod.rs

//! The closed set of gates the game exposes, and their unitaries.
//!
//! Every consumer — gate application, circuit display, level files — works
//! from the single [`GateKind`] enumeration, so validating or rendering a
//! gate kind cannot drift out of sync between subsystems.

use crate::core::KetLabError;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// The gate vocabulary: six single-qubit gates and three controlled gates.
///
/// Serialized with the spellings the level files use (`"CNOT"`, `"CZ"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard: equal superposition of `|0⟩` and `|1⟩`.
    H,
    /// Pauli-X: bit flip.
    X,
    /// Pauli-Y: flip combined with a ±i phase.
    Y,
    /// Pauli-Z: phase flip on the `|1⟩` component.
    Z,
    /// Phase gate: multiplies the `|1⟩` component by i.
    S,
    /// π/8 gate: multiplies the `|1⟩` component by e^(iπ/4).
    T,
    /// Controlled-X: flips the target when the control is `|1⟩`.
    #[serde(rename = "CNOT")]
    Cnot,
    /// Controlled-Z: −1 phase when control and target are both `|1⟩`.
    #[serde(rename = "CZ")]
    Cz,
    /// Doubly-controlled X: flips the target when both controls are `|1⟩`.
    Toffoli,
}

impl GateKind {
    /// Number of qubit operands the gate requires.
    pub fn arity(&self) -> usize {
        match self {
            GateKind::H | GateKind::X | GateKind::Y | GateKind::Z | GateKind::S | GateKind::T => 1,
            GateKind::Cnot | GateKind::Cz => 2,
            GateKind::Toffoli => 3,
        }
    }

    /// Glyph drawn on the target wire in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Cnot => "X",
            GateKind::Cz => "●",
            GateKind::Toffoli => "X",
        }
    }

    /// All gate kinds, in catalog order.
    pub fn all() -> [GateKind; 9] {
        [
            GateKind::H,
            GateKind::X,
            GateKind::Y,
            GateKind::Z,
            GateKind::S,
            GateKind::T,
            GateKind::Cnot,
            GateKind::Cz,
            GateKind::Toffoli,
        ]
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateKind::Cnot => "CNOT",
            GateKind::Cz => "CZ",
            GateKind::Toffoli => "Toffoli",
            single => single.symbol(),
        };
        write!(f, "{name}")
    }
}

/// One placed gate: a kind plus its ordered qubit operands.
///
/// For controlled gates the controls come first and the target last, in the
/// order the player selected them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    /// Which gate to apply.
    pub kind: GateKind,
    /// Qubit operands; length must equal `kind.arity()`.
    pub qubits: Vec<usize>,
}

impl Gate {
    /// Creates a gate from a kind and operand list, without validating; call
    /// [`Gate::validate`] (or let the engine do it) before applying.
    pub fn new(kind: GateKind, qubits: Vec<usize>) -> Self {
        Self { kind, qubits }
    }

    /// Hadamard on one qubit.
    pub fn h(qubit: usize) -> Self {
        Self::new(GateKind::H, vec![qubit])
    }

    /// Pauli-X on one qubit.
    pub fn x(qubit: usize) -> Self {
        Self::new(GateKind::X, vec![qubit])
    }

    /// Pauli-Y on one qubit.
    pub fn y(qubit: usize) -> Self {
        Self::new(GateKind::Y, vec![qubit])
    }

    /// Pauli-Z on one qubit.
    pub fn z(qubit: usize) -> Self {
        Self::new(GateKind::Z, vec![qubit])
    }

    /// S phase gate on one qubit.
    pub fn s(qubit: usize) -> Self {
        Self::new(GateKind::S, vec![qubit])
    }

    /// T phase gate on one qubit.
    pub fn t(qubit: usize) -> Self {
        Self::new(GateKind::T, vec![qubit])
    }

    /// Controlled-X with the given control and target.
    pub fn cnot(control: usize, target: usize) -> Self {
        Self::new(GateKind::Cnot, vec![control, target])
    }

    /// Controlled-Z between two qubits.
    pub fn cz(control: usize, target: usize) -> Self {
        Self::new(GateKind::Cz, vec![control, target])
    }

    /// Toffoli with two controls and one target.
    pub fn toffoli(control1: usize, control2: usize, target: usize) -> Self {
        Self::new(GateKind::Toffoli, vec![control1, control2, target])
    }

    /// Checks arity, operand distinctness, and index bounds against a
    /// register of `qubit_count` qubits.
    pub fn validate(&self, qubit_count: usize) -> Result<(), KetLabError> {
        let expected = self.kind.arity();
        if self.qubits.len() != expected {
            return Err(KetLabError::InvalidGateArity {
                kind: self.kind,
                message: format!(
                    "expected {expected} qubit operand(s), got {}",
                    self.qubits.len()
                ),
            });
        }
        for (i, &q) in self.qubits.iter().enumerate() {
            if q >= qubit_count {
                return Err(KetLabError::QubitIndexOutOfRange {
                    index: q,
                    qubit_count,
                });
            }
            if self.qubits[..i].contains(&q) {
                return Err(KetLabError::InvalidGateArity {
                    kind: self.kind,
                    message: format!("duplicate qubit operand {q}"),
                });
            }
        }
        Ok(())
    }

    /// Highest qubit index referenced, if any operand is present.
    pub fn max_qubit(&self) -> Option<usize> {
        self.qubits.iter().copied().max()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "q{q}")?;
        }
        write!(f, ")")
    }
}

/// The 2x2 unitary for each single-qubit gate kind.
///
/// This is the single source of truth for gate semantics; controlled kinds
/// have no 2x2 form and are handled by the engine's permutation and phase
/// kernels.
pub(crate) fn single_qubit_matrix(kind: GateKind) -> [[Complex<f64>; 2]; 2] {
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::new(0.0, 0.0);
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    let i = Complex::i();
    match kind {
        GateKind::H => [[h, h], [h, -h]],
        GateKind::X => [[zero, one], [one, zero]],
        GateKind::Y => [[zero, -i], [i, zero]],
        GateKind::Z => [[one, zero], [zero, -one]],
        GateKind::S => [[one, zero], [zero, i]],
        GateKind::T => [
            [one, zero],
            // e^(iπ/4) = (1+i)/√2
            [zero, Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
        ],
        GateKind::Cnot | GateKind::Cz | GateKind::Toffoli => {
            unreachable!("controlled gates have no single-qubit unitary")
        }
    }
}
