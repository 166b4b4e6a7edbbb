// tests/puzzle_tests.rs

// End-to-end checks that the shipped catalog is playable: level records are
// consistent, intended solutions pass, and near-misses fail.

use ketlab::{Gate, KetLabError, Level, PuzzleSession, builtin_levels};

fn level_named(name: &str) -> Level {
    builtin_levels()
        .into_iter()
        .find(|l| l.name == name)
        .unwrap_or_else(|| panic!("no level named {name:?}"))
}

/// Plays `gates` against the named level and returns whether it solved.
fn play(name: &str, gates: &[Gate]) -> Result<bool, KetLabError> {
    let mut session = PuzzleSession::new(level_named(name))?;
    for gate in gates {
        session
            .place_gate(gate.clone())
            .unwrap_or_else(|e| panic!("placing {gate} in {name:?}: {e}"));
    }
    Ok(session.run()?.solved)
}

#[test]
fn catalog_is_internally_consistent() {
    for level in builtin_levels() {
        level
            .validate()
            .unwrap_or_else(|e| panic!("level {:?}: {e}", level.name));
        // Budgets fit the palette arities: the widest gate must be placeable.
        for kind in &level.available_gates {
            assert!(
                kind.arity() <= level.qubit_count,
                "level {:?} offers {kind} on a {}-qubit register",
                level.name,
                level.qubit_count
            );
        }
    }
}

#[test]
fn single_qubit_levels_solve_with_intended_gates() -> Result<(), KetLabError> {
    assert!(play("Quantum Flip", &[Gate::x(0)])?);
    assert!(play("First Superposition", &[Gate::h(0)])?);
    assert!(play("Phase Flip Challenge", &[Gate::z(0)])?);
    assert!(play("Y-Gate Mystery", &[Gate::y(0)])?);
    assert!(play("Return to Zero", &[Gate::x(0)])?);
    assert!(play("Double Hadamard", &[Gate::h(0), Gate::h(0)])?);
    assert!(play("Phase Gate Introduction", &[Gate::s(0)])?);
    assert!(play("T Gate Challenge", &[Gate::t(0)])?);
    assert!(play("Complex Sequence", &[Gate::x(0), Gate::h(0)])?);
    Ok(())
}

#[test]
fn entangling_levels_solve_with_intended_gates() -> Result<(), KetLabError> {
    assert!(play("First Bell State", &[Gate::h(0), Gate::cnot(0, 1)])?);
    assert!(play(
        "Bell State Ψ+",
        &[Gate::x(1), Gate::h(0), Gate::cnot(0, 1)]
    )?);
    assert!(play("Controlled Operations", &[Gate::cnot(1, 0)])?);
    assert!(play(
        "Entanglement Destruction",
        &[Gate::cnot(0, 1), Gate::h(0)]
    )?);
    assert!(play(
        "GHZ State Creation",
        &[Gate::h(0), Gate::cnot(0, 1), Gate::cnot(0, 2)]
    )?);
    assert!(play(
        "Quantum Teleportation Setup",
        &[Gate::h(0), Gate::cnot(0, 1)]
    )?);
    assert!(play("Controlled-Z Operation", &[Gate::cz(0, 1)])?);
    assert!(play("Toffoli Gate Demo", &[Gate::toffoli(2, 1, 0)])?);
    assert!(play(
        "Quantum Fourier Transform",
        &[Gate::h(0), Gate::h(1)]
    )?);
    assert!(play("Quantum Phase Kickback", &[Gate::z(1)])?);
    assert!(play(
        "Quantum Interference",
        &[Gate::h(0), Gate::cnot(0, 1), Gate::z(1)]
    )?);
    assert!(play("Superposition Distribution", &[Gate::h(0), Gate::h(1)])?);
    assert!(play("Quantum Error Correction", &[])?);
    Ok(())
}

#[test]
fn near_misses_do_not_pass() -> Result<(), KetLabError> {
    // Wrong gate entirely.
    assert!(!play("Quantum Flip", &[Gate::h(0)])?);
    // Entanglement without the Hadamard first.
    assert!(!play("First Bell State", &[Gate::cnot(0, 1)])?);
    // Right Bell pair, wrong phase.
    assert!(!play("Bell State Ψ-", &[Gate::x(1), Gate::h(0), Gate::cnot(0, 1)])?);
    // An empty circuit only solves identity puzzles.
    assert!(!play("GHZ State Creation", &[])?);
    Ok(())
}

#[test]
fn phase_only_differences_are_detected() -> Result<(), KetLabError> {
    // |Φ+⟩ and |Φ-⟩ differ only in the sign of one amplitude; the fidelity
    // check must tell them apart.
    assert!(play(
        "Bell State Φ-",
        &[Gate::h(0), Gate::cnot(0, 1), Gate::z(1)]
    )?);
    assert!(!play("Bell State Φ-", &[Gate::h(0), Gate::cnot(0, 1)])?);
    Ok(())
}
