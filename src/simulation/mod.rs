// src/simulation/mod.rs

//! State-vector evolution and solution checking.
//!
//! Everything here is a pure, deterministic function of its inputs: there is
//! no shared engine state, so concurrent callers and repeated runs are
//! always safe. The caller owns all circuit-authoring state and passes it in
//! explicitly on every run.

mod results;
pub(crate) mod engine;

pub use results::RunResult;

use crate::circuits::Circuit;
use crate::core::{KetLabError, StateSpec, StateVector, prepare_initial_state, state_from_label};
use crate::gates::{Gate, GateKind, single_qubit_matrix};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Default fidelity threshold a final state must exceed to count as a
/// solution.
pub const SOLUTION_TOLERANCE: f64 = 0.99;

/// Applies one gate to a state, returning the updated state.
///
/// Validates arity, operand distinctness, and index bounds against the
/// state's register before touching any amplitude.
pub fn apply_gate(state: &StateVector, gate: &Gate) -> Result<StateVector, KetLabError> {
    gate.validate(state.qubit_count())?;
    let amplitudes = state.amplitudes();
    let updated = match gate.kind {
        GateKind::H | GateKind::X | GateKind::Y | GateKind::Z | GateKind::S | GateKind::T => {
            engine::apply_single_qubit(amplitudes, gate.qubits[0], &single_qubit_matrix(gate.kind))
        }
        GateKind::Cnot => engine::apply_controlled_flip(amplitudes, &gate.qubits[..1], gate.qubits[1]),
        GateKind::Toffoli => {
            engine::apply_controlled_flip(amplitudes, &gate.qubits[..2], gate.qubits[2])
        }
        GateKind::Cz => engine::apply_controlled_phase(
            amplitudes,
            gate.qubits[0],
            gate.qubits[1],
            Complex::new(-1.0, 0.0),
        ),
    };
    StateVector::from_amplitudes(state.qubit_count(), updated)
}

/// Folds [`apply_gate`] over an ordered gate sequence, left to right.
///
/// The order is exactly the order placed by the player; nothing is reordered
/// or cancelled. The first gate to fail validation aborts the run with a
/// [`KetLabError::CircuitStep`] naming its position.
pub fn apply_circuit(initial: &StateVector, gates: &[Gate]) -> Result<StateVector, KetLabError> {
    let mut state = initial.clone();
    for (position, gate) in gates.iter().enumerate() {
        state = apply_gate(&state, gate).map_err(|e| e.at_position(position))?;
    }
    Ok(state)
}

/// Squared overlap `|⟨a|b⟩|²` of two equal-length states.
///
/// Symmetric in its arguments and bounded to `[0, 1]` for unit vectors.
pub fn fidelity(a: &StateVector, b: &StateVector) -> Result<f64, KetLabError> {
    if a.dim() != b.dim() {
        return Err(KetLabError::DimensionMismatch {
            expected: a.dim(),
            actual: b.dim(),
        });
    }
    let overlap: Complex<f64> = a
        .amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| x.conj() * y)
        .sum();
    Ok(overlap.norm_sqr())
}

/// The sole solution-acceptance criterion: fidelity strictly above
/// `tolerance` (use [`SOLUTION_TOLERANCE`] unless a level says otherwise).
pub fn matches_target(
    final_state: &StateVector,
    target_state: &StateVector,
    tolerance: f64,
) -> Result<bool, KetLabError> {
    Ok(fidelity(final_state, target_state)? > tolerance)
}

/// Draws `shots` measurement outcomes from the state's probability
/// distribution, returning counts per basis index.
///
/// When no seed is supplied, one is derived from the amplitudes themselves,
/// so repeated sampling of the same state reproduces the same counts.
pub fn sample_measurements(
    state: &StateVector,
    shots: usize,
    seed: Option<u64>,
) -> BTreeMap<usize, usize> {
    let seed = seed.unwrap_or_else(|| {
        let mut hasher = DefaultHasher::new();
        for amp in state.amplitudes() {
            amp.re.to_ne_bytes().hash(&mut hasher);
            amp.im.to_ne_bytes().hash(&mut hasher);
        }
        hasher.finish()
    });
    let mut rng = StdRng::seed_from_u64(seed);
    let probabilities = state.probabilities();
    let total: f64 = probabilities.iter().sum();

    let mut counts = BTreeMap::new();
    for _ in 0..shots {
        let p_sample: f64 = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut outcome = probabilities.len() - 1;
        for (index, p) in probabilities.iter().enumerate() {
            cumulative += p;
            if p_sample < cumulative {
                outcome = index;
                break;
            }
        }
        *counts.entry(outcome).or_insert(0) += 1;
    }
    counts
}

/// The entry point a UI layer calls once per "run" action.
///
/// Holds nothing but the solution tolerance; every run receives the qubit
/// count, initial-state specifier, and full gate list explicitly.
pub struct Simulator {
    tolerance: f64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            tolerance: SOLUTION_TOLERANCE,
        }
    }
}

impl Simulator {
    /// Creates a simulator with the default solution tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with a custom solution tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Runs a circuit from an initial state and reports the final state.
    pub fn run(
        &self,
        qubit_count: usize,
        initial: &StateSpec,
        circuit: &Circuit,
    ) -> Result<RunResult, KetLabError> {
        let initial_state = prepare_initial_state(qubit_count, initial)?;
        let final_state = apply_circuit(&initial_state, circuit.gates())?;
        Ok(RunResult::new(final_state))
    }

    /// Runs a circuit and checks the final state against a target label.
    pub fn check(
        &self,
        qubit_count: usize,
        initial: &StateSpec,
        circuit: &Circuit,
        target_label: &str,
    ) -> Result<RunResult, KetLabError> {
        let initial_state = prepare_initial_state(qubit_count, initial)?;
        let target = state_from_label(target_label)?;
        if target.dim() != initial_state.dim() {
            return Err(KetLabError::DimensionMismatch {
                expected: initial_state.dim(),
                actual: target.dim(),
            });
        }
        let final_state = apply_circuit(&initial_state, circuit.gates())?;
        let score = fidelity(&final_state, &target)?;
        Ok(RunResult::with_verdict(
            final_state,
            score,
            score > self.tolerance,
        ))
    }
}
