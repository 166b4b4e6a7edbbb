// src/session/mod.rs

//! Headless puzzle and sandbox orchestration.
//!
//! These types own the circuit-authoring state a front end used to keep in
//! widget callbacks: the current level, the placed gates, and the scoring
//! rules. They hold plain data and call the stateless simulation functions;
//! all rendering and messaging stays with the caller.

use crate::circuits::Circuit;
use crate::core::{
    KetLabError, StateSpec, StateVector, checked_dimension, prepare_initial_state,
    state_from_label,
};
use crate::gates::{Gate, GateKind};
use crate::levels::Level;
use crate::simulation::{RunResult, SOLUTION_TOLERANCE, apply_circuit, fidelity};
use std::fmt;

/// Widest register the sandbox offers.
pub const SANDBOX_MAX_QUBITS: usize = 4;

/// Score per unused gate under the level budget.
const EFFICIENCY_BONUS_PER_GATE: u32 = 10;

/// Failures specific to puzzle authoring, wrapping engine errors where the
/// gate itself was malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The gate kind is not in the level's palette.
    GateNotAvailable {
        /// The rejected gate kind.
        kind: GateKind,
    },
    /// The level's gate budget is already fully used.
    GateBudgetExhausted {
        /// The level's budget.
        max_gates: usize,
    },
    /// The gate or run failed engine validation.
    Engine(KetLabError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::GateNotAvailable { kind } => {
                write!(f, "Gate {kind} is not available in this level")
            }
            SessionError::GateBudgetExhausted { max_gates } => {
                write!(f, "Gate budget exhausted: this level allows {max_gates} gate(s)")
            }
            SessionError::Engine(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Engine(source) => Some(source),
            _ => None,
        }
    }
}

impl From<KetLabError> for SessionError {
    fn from(source: KetLabError) -> Self {
        SessionError::Engine(source)
    }
}

/// The outcome of running a puzzle attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleOutcome {
    /// State after the player's gate sequence.
    pub final_state: StateVector,
    /// Fidelity against the level's target state.
    pub fidelity: f64,
    /// Whether the fidelity cleared the solution tolerance.
    pub solved: bool,
    /// Points awarded; `None` unless solved. Difficulty bonus plus 10 per
    /// unused gate under the budget.
    pub score: Option<u32>,
}

/// One attempt at one puzzle level.
///
/// Owns the placed-gate list and enforces the level's palette and budget on
/// every placement; the engine re-validates indices on every run anyway, so
/// nothing here is trusted state.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    level: Level,
    circuit: Circuit,
    tolerance: f64,
}

impl PuzzleSession {
    /// Starts a session for a level, validating the level record first.
    pub fn new(level: Level) -> Result<Self, KetLabError> {
        level.validate()?;
        Ok(Self {
            level,
            circuit: Circuit::new(),
            tolerance: SOLUTION_TOLERANCE,
        })
    }

    /// Same as [`PuzzleSession::new`] with a non-default solution tolerance.
    pub fn with_tolerance(level: Level, tolerance: f64) -> Result<Self, KetLabError> {
        let mut session = Self::new(level)?;
        session.tolerance = tolerance;
        Ok(session)
    }

    /// The level being attempted.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The gates placed so far, in order.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Gates still allowed under the budget.
    pub fn remaining_budget(&self) -> usize {
        self.level.max_gates - self.circuit.len()
    }

    /// The level's hint text.
    pub fn hint(&self) -> &str {
        &self.level.hint
    }

    /// Appends a gate, enforcing the palette, the budget, and operand
    /// validity against the level's register.
    pub fn place_gate(&mut self, gate: Gate) -> Result<(), SessionError> {
        if !self.level.available_gates.contains(&gate.kind) {
            return Err(SessionError::GateNotAvailable { kind: gate.kind });
        }
        if self.circuit.len() >= self.level.max_gates {
            return Err(SessionError::GateBudgetExhausted {
                max_gates: self.level.max_gates,
            });
        }
        gate.validate(self.level.qubit_count)?;
        self.circuit.add_gate(gate);
        Ok(())
    }

    /// Removes and returns the most recently placed gate.
    pub fn undo(&mut self) -> Option<Gate> {
        self.circuit.undo()
    }

    /// Removes every placed gate.
    pub fn clear(&mut self) {
        self.circuit.clear();
    }

    /// Runs the placed gates from the level's input state and checks the
    /// result against the target.
    pub fn run(&self) -> Result<PuzzleOutcome, KetLabError> {
        let initial = prepare_initial_state(
            self.level.qubit_count,
            &StateSpec::Label(self.level.input_state.clone()),
        )?;
        let target = state_from_label(&self.level.target_state)?;
        let final_state = apply_circuit(&initial, self.circuit.gates())?;
        let measured = fidelity(&final_state, &target)?;
        let solved = measured > self.tolerance;
        let score = solved.then(|| {
            let unused = (self.level.max_gates - self.circuit.len()) as u32;
            self.level.difficulty.score_bonus() + EFFICIENCY_BONUS_PER_GATE * unused
        });
        Ok(PuzzleOutcome {
            final_state,
            fidelity: measured,
            solved,
            score,
        })
    }
}

/// Free-form circuit exploration: any gates, any initial basis or
/// superposition label, 1 to 4 qubits, no target and no budget.
#[derive(Debug, Clone)]
pub struct SandboxSession {
    qubit_count: usize,
    initial_state: String,
    circuit: Circuit,
}

impl SandboxSession {
    /// Opens a sandbox over the given register width, starting in `|0…0⟩`.
    pub fn new(qubit_count: usize) -> Result<Self, KetLabError> {
        check_sandbox_width(qubit_count)?;
        Ok(Self {
            qubit_count,
            initial_state: default_initial_state(qubit_count),
            circuit: Circuit::new(),
        })
    }

    /// Current register width.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Label of the selected initial state.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// The gates placed so far, in order.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Resizes the register. Placed gates are cleared (their indices may no
    /// longer exist) and the initial state resets to `|0…0⟩`.
    pub fn set_qubit_count(&mut self, qubit_count: usize) -> Result<(), KetLabError> {
        check_sandbox_width(qubit_count)?;
        self.qubit_count = qubit_count;
        self.initial_state = default_initial_state(qubit_count);
        self.circuit.clear();
        Ok(())
    }

    /// Selects the initial state; the label must resolve to a state of the
    /// current register width.
    pub fn set_initial_state(&mut self, label: &str) -> Result<(), KetLabError> {
        let state = state_from_label(label)?;
        if state.qubit_count() != self.qubit_count {
            return Err(KetLabError::DimensionMismatch {
                expected: checked_dimension(self.qubit_count)?,
                actual: state.dim(),
            });
        }
        self.initial_state = label.to_string();
        Ok(())
    }

    /// Appends a gate; only operand validity is checked.
    pub fn place_gate(&mut self, gate: Gate) -> Result<(), KetLabError> {
        gate.validate(self.qubit_count)?;
        self.circuit.add_gate(gate);
        Ok(())
    }

    /// Removes and returns the most recently placed gate.
    pub fn undo(&mut self) -> Option<Gate> {
        self.circuit.undo()
    }

    /// Removes every placed gate.
    pub fn clear(&mut self) {
        self.circuit.clear();
    }

    /// Runs the placed gates from the selected initial state.
    pub fn run(&self) -> Result<RunResult, KetLabError> {
        let initial = prepare_initial_state(
            self.qubit_count,
            &StateSpec::Label(self.initial_state.clone()),
        )?;
        let final_state = apply_circuit(&initial, self.circuit.gates())?;
        Ok(RunResult::new(final_state))
    }
}

/// The initial-state menu offered for a register width: named superposition
/// shortcuts for small registers, every basis ket otherwise.
pub fn initial_state_choices(qubit_count: usize) -> Vec<String> {
    match qubit_count {
        1 => ["|0⟩", "|1⟩", "|+⟩", "|-⟩"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        2 => ["|00⟩", "|01⟩", "|10⟩", "|11⟩", "|++⟩"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        n => (0..(1usize << n))
            .map(|bits| {
                let mut label = String::from("|");
                for k in (0..n).rev() {
                    label.push(if (bits >> k) & 1 == 1 { '1' } else { '0' });
                }
                label.push('⟩');
                label
            })
            .collect(),
    }
}

fn default_initial_state(qubit_count: usize) -> String {
    format!("|{}⟩", "0".repeat(qubit_count))
}

fn check_sandbox_width(qubit_count: usize) -> Result<(), KetLabError> {
    if qubit_count == 0 || qubit_count > SANDBOX_MAX_QUBITS {
        return Err(KetLabError::InvalidQubitCount {
            message: format!(
                "sandbox registers hold 1 to {SANDBOX_MAX_QUBITS} qubits, got {qubit_count}"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::builtin_levels;

    fn level_named(name: &str) -> Level {
        builtin_levels()
            .into_iter()
            .find(|l| l.name == name)
            .unwrap_or_else(|| panic!("no level named {name:?}"))
    }

    #[test]
    fn palette_and_budget_are_enforced() {
        // "Quantum Flip": 1 qubit, palette H/X/Y/Z, budget 1.
        let mut session = PuzzleSession::new(level_named("Quantum Flip")).unwrap();
        assert_eq!(
            session.place_gate(Gate::s(0)),
            Err(SessionError::GateNotAvailable { kind: GateKind::S })
        );
        session.place_gate(Gate::x(0)).unwrap();
        assert_eq!(
            session.place_gate(Gate::z(0)),
            Err(SessionError::GateBudgetExhausted { max_gates: 1 })
        );
        assert_eq!(session.remaining_budget(), 0);
    }

    #[test]
    fn solving_awards_difficulty_and_efficiency_bonus() {
        // "First Bell State": Intermediate (100), budget 2, solved in 2.
        let mut session = PuzzleSession::new(level_named("First Bell State")).unwrap();
        session.place_gate(Gate::h(0)).unwrap();
        session.place_gate(Gate::cnot(0, 1)).unwrap();
        let outcome = session.run().unwrap();
        assert!(outcome.solved);
        assert_eq!(outcome.score, Some(100));
    }

    #[test]
    fn failed_attempts_score_nothing() {
        let mut session = PuzzleSession::new(level_named("Quantum Flip")).unwrap();
        session.place_gate(Gate::z(0)).unwrap();
        let outcome = session.run().unwrap();
        assert!(!outcome.solved);
        assert_eq!(outcome.score, None);
        assert!(outcome.fidelity < 0.01);
    }

    #[test]
    fn undo_and_clear_restore_budget() {
        let mut session = PuzzleSession::new(level_named("First Bell State")).unwrap();
        session.place_gate(Gate::h(0)).unwrap();
        assert_eq!(session.undo(), Some(Gate::h(0)));
        assert_eq!(session.remaining_budget(), 2);
        session.place_gate(Gate::h(0)).unwrap();
        session.clear();
        assert!(session.circuit().is_empty());
    }

    #[test]
    fn resizing_the_sandbox_clears_gates() {
        let mut sandbox = SandboxSession::new(2).unwrap();
        sandbox.place_gate(Gate::h(1)).unwrap();
        sandbox.set_qubit_count(3).unwrap();
        assert!(sandbox.circuit().is_empty());
        assert_eq!(sandbox.initial_state(), "|000⟩");
    }

    #[test]
    fn sandbox_runs_free_form_circuits() {
        let mut sandbox = SandboxSession::new(2).unwrap();
        sandbox.set_initial_state("|++⟩").unwrap();
        sandbox.place_gate(Gate::cz(0, 1)).unwrap();
        let result = sandbox.run().unwrap();
        // CZ on |++⟩ flips the sign of the |11⟩ amplitude only.
        assert!(result.final_state().amplitudes()[3].re < 0.0);
    }

    #[test]
    fn sandbox_width_is_bounded() {
        assert!(SandboxSession::new(0).is_err());
        assert!(SandboxSession::new(5).is_err());
        assert_eq!(initial_state_choices(3).len(), 8);
        assert!(initial_state_choices(2).contains(&"|++⟩".to_string()));
    }
}
