//! Error handling logic

use crate::gates::GateKind;
use std::fmt;

/// Error types reported by the state-vector core.
///
/// Every fallible operation in the crate returns one of these synchronously
/// to its immediate caller; there is no silent recovery and no default
/// substitution. A failed circuit run is always recoverable by editing the
/// gate list and re-running from the initial state.
#[derive(Debug, Clone, PartialEq)]
pub enum KetLabError {
    /// A symbolic initial/target state string is not in the supported table
    /// and is not a plain bit-pattern ket.
    UnknownStateLabel {
        /// The unrecognised label, as supplied by the caller.
        label: String,
    },

    /// A gate's qubit-index list does not match its kind's required arity,
    /// or contains duplicate indices where distinctness is required.
    InvalidGateArity {
        /// The gate kind whose operand list was rejected.
        kind: GateKind,
        /// What was wrong with the operand list.
        message: String,
    },

    /// A gate references a qubit index at or beyond the declared qubit count.
    QubitIndexOutOfRange {
        /// The offending qubit index.
        index: usize,
        /// The register's declared qubit count.
        qubit_count: usize,
    },

    /// Two state vectors of different lengths were compared, or an amplitude
    /// vector's length does not match the declared qubit count.
    DimensionMismatch {
        /// The dimension required by the context (2^n).
        expected: usize,
        /// The dimension actually supplied.
        actual: usize,
    },

    /// The requested register size cannot be represented.
    InvalidQubitCount {
        /// InvalidQubitCount failure message.
        message: String,
    },

    /// A level record is internally inconsistent (empty gate palette, zero
    /// gate budget, and similar).
    InvalidLevel {
        /// InvalidLevel failure message.
        message: String,
    },

    /// A hand-built state vector's squared norm strayed too far from 1.
    StateNotNormalized {
        /// The measured squared norm.
        norm_sqr: f64,
    },

    /// A gate inside an ordered circuit failed validation; carries the
    /// zero-based position of that gate in the sequence.
    CircuitStep {
        /// Position of the failing gate in the circuit.
        position: usize,
        /// The underlying failure.
        source: Box<KetLabError>,
    },
}

impl KetLabError {
    /// Wraps an error with the position of the gate that produced it.
    pub(crate) fn at_position(self, position: usize) -> Self {
        KetLabError::CircuitStep {
            position,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for KetLabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KetLabError::UnknownStateLabel { label } => {
                write!(f, "Unknown state label: {label:?} is not a supported ket")
            }
            KetLabError::InvalidGateArity { kind, message } => {
                write!(f, "Invalid arity for {kind}: {message}")
            }
            KetLabError::QubitIndexOutOfRange { index, qubit_count } => {
                write!(
                    f,
                    "Qubit index {index} out of range for a {qubit_count}-qubit register"
                )
            }
            KetLabError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Dimension mismatch: expected a vector of length {expected}, got {actual}"
                )
            }
            KetLabError::InvalidQubitCount { message } => {
                write!(f, "Invalid qubit count: {message}")
            }
            KetLabError::InvalidLevel { message } => {
                write!(f, "Invalid level: {message}")
            }
            KetLabError::StateNotNormalized { norm_sqr } => {
                write!(
                    f,
                    "State vector normalization failed: Sum(|c_i|^2) = {norm_sqr}"
                )
            }
            KetLabError::CircuitStep { position, source } => {
                write!(f, "Gate at position {position} rejected: {source}")
            }
        }
    }
}

impl std::error::Error for KetLabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KetLabError::CircuitStep { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
