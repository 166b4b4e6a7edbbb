// src/lib.rs

//! `ketlab` - the quantum state core of a circuit puzzle game
//!
//! This library simulates small qubit registers (1 to 4 qubits in the game,
//! with no hard bound in the math) as complex state vectors, applies the
//! game's closed gate set (H, X, Y, Z, S, T, CNOT, CZ, Toffoli), and checks
//! circuit solutions against target states by fidelity. It carries the
//! puzzle catalog and headless puzzle/sandbox sessions; windowing, drawing,
//! and sound belong to the embedding front end, which calls in with a qubit
//! count, an initial-state specifier, and an ordered gate list per run.
//!
//! Index convention used throughout: qubit `k` is bit `k` of the basis
//! index, so qubit 0 is the rightmost character of a ket label.

pub mod circuits;
pub mod core;
pub mod gates;
pub mod levels;
pub mod session;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use core::{KetLabError, StateSpec, StateVector, prepare_initial_state, state_from_label};
pub use gates::{Gate, GateKind};
pub use levels::{Difficulty, Level, builtin_levels, levels_to_json, parse_levels};
pub use session::{
    PuzzleOutcome, PuzzleSession, SandboxSession, SessionError, initial_state_choices,
};
pub use simulation::{
    RunResult, SOLUTION_TOLERANCE, Simulator, apply_circuit, apply_gate, fidelity, matches_target,
    sample_measurements,
};
pub use validation::{check_normalization, validate_state};

// Example 1: Bell-state construction and solution checking
// H on qubit 0 of |00⟩ followed by CNOT(0,1) reaches |Φ+⟩, the first
// entangling puzzle in the catalog.
/// ```
/// use ketlab::{CircuitBuilder, Gate, Simulator, StateSpec};
///
/// let circuit = CircuitBuilder::new()
///     .add_gate(Gate::h(0))
///     .add_gate(Gate::cnot(0, 1))
///     .build();
///
/// let simulator = Simulator::new();
/// match simulator.check(2, &StateSpec::from("|00⟩"), &circuit, "|Φ+⟩") {
///     Ok(result) => {
///         // Amplitudes are [1/√2, 0, 0, 1/√2]; fidelity against |Φ+⟩ is 1.
///         assert!(result.is_solved());
///         assert!(result.fidelity().unwrap() > 0.999);
///     }
///     Err(e) => panic!("Bell construction failed: {e}"),
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Playing a catalog level headlessly
// The session enforces the level's palette and gate budget and scores the
// solve; the engine below it stays stateless.
/// ```
/// use ketlab::{Gate, PuzzleSession, builtin_levels};
///
/// let level = builtin_levels().into_iter().next().expect("catalog is non-empty");
/// assert_eq!(level.name, "Quantum Flip"); // transform |0⟩ into |1⟩
///
/// let mut session = PuzzleSession::new(level).expect("level record is valid");
/// session.place_gate(Gate::x(0)).expect("X is in the palette");
///
/// let outcome = session.run().expect("run succeeds");
/// assert!(outcome.solved);
/// assert_eq!(outcome.score, Some(50)); // Beginner bonus, no unused budget
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
