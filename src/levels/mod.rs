// src/levels/mod.rs

//! The puzzle catalog: declarative level records.
//!
//! A level is pure data — input and target state labels, the gate palette,
//! the qubit count, and a gate budget. Levels are serialized as JSON with
//! the same field names the game's `levels.json` uses, and the builtin
//! catalog below reproduces the shipped progression. The engine never sees
//! a `Level`; the session layer translates one into a qubit count, an
//! initial-state specifier, and a target label.

use crate::core::{KetLabError, checked_dimension, state_from_label};
use crate::gates::GateKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty tier, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Single-qubit basics.
    Beginner,
    /// Gate combinations and phase gates.
    Intermediate,
    /// Multi-qubit circuits and entanglement.
    Advanced,
    /// Complex multi-qubit states.
    Expert,
    /// The hardest shipped puzzles.
    Master,
}

impl Difficulty {
    /// Base score awarded for solving a level of this tier.
    pub fn score_bonus(&self) -> u32 {
        match self {
            Difficulty::Beginner => 50,
            Difficulty::Intermediate => 100,
            Difficulty::Advanced => 200,
            Difficulty::Expert => 400,
            Difficulty::Master => 800,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
            Difficulty::Master => "Master",
        };
        write!(f, "{name}")
    }
}

/// One puzzle: transform `input_state` into `target_state` using at most
/// `max_gates` gates drawn from `available_gates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Display name.
    pub name: String,
    /// One-line task description.
    pub description: String,
    /// Symbolic label of the state the register starts in.
    pub input_state: String,
    /// Symbolic label of the state the player must reach.
    pub target_state: String,
    /// The gate palette offered for this level.
    pub available_gates: Vec<GateKind>,
    /// Register width.
    #[serde(rename = "qubits")]
    pub qubit_count: usize,
    /// Shown on request; costs nothing.
    pub hint: String,
    /// Maximum number of gates the player may place.
    pub max_gates: usize,
    /// Difficulty tier, which also sets the base score.
    pub difficulty: Difficulty,
}

impl Level {
    /// Checks the level record is internally consistent: both state labels
    /// resolve, both match the declared register width, the palette is
    /// non-empty, and the budget is positive.
    pub fn validate(&self) -> Result<(), KetLabError> {
        // Rejects unrepresentable register sizes before any shift by them.
        let expected = checked_dimension(self.qubit_count)?;
        let input = state_from_label(&self.input_state)?;
        if input.qubit_count() != self.qubit_count {
            return Err(KetLabError::DimensionMismatch {
                expected,
                actual: input.dim(),
            });
        }
        let target = state_from_label(&self.target_state)?;
        if target.qubit_count() != self.qubit_count {
            return Err(KetLabError::DimensionMismatch {
                expected,
                actual: target.dim(),
            });
        }
        if self.available_gates.is_empty() || self.max_gates == 0 {
            return Err(KetLabError::InvalidLevel {
                message: format!(
                    "level {:?} offers no gates or a zero gate budget",
                    self.name
                ),
            });
        }
        Ok(())
    }
}

/// Parses a level catalog from JSON (the `levels.json` format).
pub fn parse_levels(json: &str) -> Result<Vec<Level>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serializes a level catalog to pretty-printed JSON.
pub fn levels_to_json(levels: &[Level]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(levels)
}

#[allow(clippy::too_many_arguments)]
fn level(
    name: &str,
    description: &str,
    input_state: &str,
    target_state: &str,
    available_gates: &[GateKind],
    qubit_count: usize,
    hint: &str,
    max_gates: usize,
    difficulty: Difficulty,
) -> Level {
    Level {
        name: name.to_string(),
        description: description.to_string(),
        input_state: input_state.to_string(),
        target_state: target_state.to_string(),
        available_gates: available_gates.to_vec(),
        qubit_count,
        hint: hint.to_string(),
        max_gates,
        difficulty,
    }
}

/// The shipped 30-level progression, from single-qubit flips to 4-qubit
/// entangled states.
pub fn builtin_levels() -> Vec<Level> {
    use Difficulty::{Advanced, Beginner, Expert, Intermediate, Master};
    use GateKind::{Cnot, Cz, H, S, T, Toffoli, X, Y, Z};

    vec![
        // Beginner (1-5): single-qubit basics
        level(
            "Quantum Flip",
            "Transform |0⟩ into |1⟩",
            "|0⟩",
            "|1⟩",
            &[H, X, Y, Z],
            1,
            "The X gate (Pauli-X) flips |0⟩ to |1⟩",
            1,
            Beginner,
        ),
        level(
            "First Superposition",
            "Create |+⟩ state from |0⟩",
            "|0⟩",
            "|+⟩",
            &[H, X, Y, Z],
            1,
            "The Hadamard gate creates equal superposition",
            1,
            Beginner,
        ),
        level(
            "Phase Flip Challenge",
            "Transform |+⟩ into |-⟩",
            "|+⟩",
            "|-⟩",
            &[H, X, Y, Z],
            1,
            "The Z gate adds a phase flip to |+⟩",
            1,
            Beginner,
        ),
        level(
            "Y-Gate Mystery",
            "Apply Y gate to |0⟩",
            "|0⟩",
            "|i·1⟩",
            &[H, X, Y, Z],
            1,
            "Y gate combines X and Z operations with a phase",
            1,
            Beginner,
        ),
        level(
            "Return to Zero",
            "Bring |1⟩ back to |0⟩",
            "|1⟩",
            "|0⟩",
            &[H, X, Y, Z],
            1,
            "X gate is its own inverse",
            1,
            Beginner,
        ),
        // Intermediate (6-15): combinations, phase gates, two qubits
        level(
            "Double Hadamard",
            "Apply H twice to |0⟩",
            "|0⟩",
            "|0⟩",
            &[H, X, Y, Z],
            1,
            "H·H = I (identity). Two Hadamards cancel out",
            2,
            Intermediate,
        ),
        level(
            "Phase Gate Introduction",
            "Transform |+⟩ using S gate",
            "|+⟩",
            "|+i⟩",
            &[H, X, Y, Z, S],
            1,
            "S gate adds π/2 phase to |1⟩ component",
            1,
            Intermediate,
        ),
        level(
            "T Gate Challenge",
            "Apply T gate to superposition",
            "|+⟩",
            "|T+⟩",
            &[H, X, Y, Z, S, T],
            1,
            "T gate adds π/4 phase to |1⟩ component",
            1,
            Intermediate,
        ),
        level(
            "Complex Sequence",
            "Transform |0⟩ to |-⟩ via |1⟩",
            "|0⟩",
            "|-⟩",
            &[H, X, Y, Z],
            1,
            "Think: |0⟩ → |1⟩ → |-⟩. What gates do this?",
            2,
            Intermediate,
        ),
        level(
            "Phase Correction",
            "Fix the phase of |i·1⟩ to get |1⟩",
            "|i·1⟩",
            "|1⟩",
            &[H, X, Y, Z, S],
            1,
            "You need to remove the i phase from |1⟩",
            2,
            Intermediate,
        ),
        level(
            "First Bell State",
            "Create |Φ+⟩ from |00⟩",
            "|00⟩",
            "|Φ+⟩",
            &[H, X, Cnot],
            2,
            "Apply H to first qubit, then CNOT(0,1)",
            2,
            Intermediate,
        ),
        level(
            "Bell State Φ-",
            "Create |Φ-⟩ Bell state",
            "|00⟩",
            "|Φ-⟩",
            &[H, X, Z, Cnot],
            2,
            "Similar to |Φ+⟩ but with a phase flip",
            3,
            Intermediate,
        ),
        level(
            "Bell State Ψ+",
            "Create |Ψ+⟩ Bell state",
            "|00⟩",
            "|Ψ+⟩",
            &[H, X, Cnot],
            2,
            "Flip one qubit before creating entanglement",
            3,
            Intermediate,
        ),
        level(
            "Bell State Ψ-",
            "Create |Ψ-⟩ Bell state",
            "|00⟩",
            "|Ψ-⟩",
            &[H, X, Z, Cnot],
            2,
            "Combine X flip and phase operations with entanglement",
            4,
            Intermediate,
        ),
        level(
            "Controlled Operations",
            "Use CNOT to flip second qubit when first is |1⟩",
            "|10⟩",
            "|11⟩",
            &[H, X, Cnot],
            2,
            "CNOT flips target when control is |1⟩",
            1,
            Intermediate,
        ),
        // Advanced (16-20)
        level(
            "Superposition Distribution",
            "Create |++⟩ from |00⟩",
            "|00⟩",
            "|++⟩",
            &[H, X, Y, Z],
            2,
            "Apply H to both qubits independently",
            2,
            Advanced,
        ),
        level(
            "Entanglement Destruction",
            "Disentangle |Φ+⟩ back to |00⟩",
            "|Φ+⟩",
            "|00⟩",
            &[H, X, Cnot],
            2,
            "Reverse the Bell state creation process",
            2,
            Advanced,
        ),
        level(
            "Quantum Teleportation Setup",
            "Prepare entangled resource |Φ+⟩ on qubits 0,1",
            "|000⟩",
            "|0Φ+⟩",
            &[H, X, Cnot],
            3,
            "Leave the top qubit alone, entangle qubits 0 and 1",
            2,
            Advanced,
        ),
        level(
            "GHZ State Creation",
            "Create 3-qubit GHZ state",
            "|000⟩",
            "|GHZ⟩",
            &[H, X, Cnot],
            3,
            "H on first qubit, then CNOT to others",
            3,
            Advanced,
        ),
        level(
            "Controlled-Z Operation",
            "Apply phase flip between entangled qubits",
            "|Φ+⟩",
            "|Φ-⟩",
            &[H, X, Z, Cz, Cnot],
            2,
            "CZ gate adds phase when both qubits are |1⟩",
            1,
            Advanced,
        ),
        // Expert (21-25)
        level(
            "W State Creation",
            "Create 3-qubit W state from |000⟩",
            "|000⟩",
            "|W⟩",
            &[H, X, Y, Cnot, Toffoli],
            3,
            "W state is symmetric superposition of all single-excitation states",
            6,
            Expert,
        ),
        level(
            "Quantum Error Syndrome",
            "Create error detection pattern",
            "|000⟩",
            "|err⟩",
            &[H, X, Cnot, Toffoli],
            3,
            "Use auxiliary qubits to detect bit flip errors",
            4,
            Expert,
        ),
        level(
            "Quantum Fourier Transform",
            "Apply 2-qubit QFT",
            "|00⟩",
            "|QFT⟩",
            &[H, S, T, Cnot],
            2,
            "H on first qubit, controlled phase operations",
            3,
            Expert,
        ),
        level(
            "Toffoli Gate Demo",
            "Flip third qubit only when first two are |11⟩",
            "|110⟩",
            "|111⟩",
            &[H, X, Cnot, Toffoli],
            3,
            "Toffoli gate performs controlled-controlled-X",
            1,
            Expert,
        ),
        level(
            "Quantum Supremacy Circuit",
            "Create maximally entangled 4-qubit state",
            "|0000⟩",
            "|MaxEnt⟩",
            &[H, X, Y, Z, Cnot, Cz, Toffoli],
            4,
            "Use multiple layers of Hadamard and entangling gates",
            8,
            Expert,
        ),
        // Master (26-30)
        level(
            "Quantum Secret Sharing",
            "Encode secret in 3-qubit state",
            "|000⟩",
            "|Secret⟩",
            &[H, X, Y, Z, S, T, Cnot, Cz, Toffoli],
            3,
            "Create state where no single qubit reveals the secret",
            10,
            Master,
        ),
        level(
            "Quantum Phase Kickback",
            "Demonstrate phase kickback with ancilla",
            "|+0⟩",
            "|-0⟩",
            &[H, X, Z, S, Cnot],
            2,
            "Use controlled operation to transfer phase",
            3,
            Master,
        ),
        level(
            "Quantum Interference",
            "Create destructive interference pattern",
            "|00⟩",
            "|Interference⟩",
            &[H, X, Y, Z, S, T, Cnot],
            2,
            "Use multiple paths that interfere destructively",
            6,
            Master,
        ),
        level(
            "Quantum Error Correction",
            "Implement 3-qubit bit flip code",
            "|000⟩",
            "|ErrorCode⟩",
            &[H, X, Cnot, Toffoli],
            3,
            "Encode logical |0⟩ in physical |000⟩",
            5,
            Master,
        ),
        level(
            "Ultimate Challenge",
            "Create the most complex quantum state",
            "|0000⟩",
            "|Ultimate⟩",
            &[H, X, Y, Z, S, T, Cnot, Cz, Toffoli],
            4,
            "Use every gate type in a meaningful sequence",
            15,
            Master,
        ),
    ]
}
