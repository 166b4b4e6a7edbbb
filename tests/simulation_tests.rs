// tests/simulation_tests.rs

// Import necessary types from the ketlab crate
use ketlab::{
    Gate, GateKind, KetLabError, StateVector, apply_circuit, apply_gate, fidelity, matches_target,
    state_from_label,
};

use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

const TEST_TOLERANCE: f64 = 1e-9;

// Helper to assert two states are the same vector (not merely the same ray).
fn assert_states_approx_equal(actual: &StateVector, expected: &StateVector, context: &str) {
    assert_eq!(actual.dim(), expected.dim(), "Dimension mismatch - {context}");
    for (i, (a, e)) in actual
        .amplitudes()
        .iter()
        .zip(expected.amplitudes())
        .enumerate()
    {
        let dist_sq = (a - e).norm_sqr();
        assert!(
            dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
            "Mismatch at index {i} - Actual: {a}, Expected: {e}, Context: {context}"
        );
    }
}

#[test]
fn norm_is_preserved_by_every_circuit() -> Result<(), KetLabError> {
    let gates = [
        Gate::h(0),
        Gate::cnot(0, 1),
        Gate::t(1),
        Gate::cz(0, 2),
        Gate::toffoli(0, 1, 2),
        Gate::y(2),
        Gate::s(0),
    ];
    let final_state = apply_circuit(&StateVector::zero(3)?, &gates)?;
    assert!(
        (final_state.norm_sqr() - 1.0).abs() < 1e-6,
        "norm² drifted to {}",
        final_state.norm_sqr()
    );
    Ok(())
}

#[test]
fn h_x_y_z_are_involutions() -> Result<(), KetLabError> {
    // A state with non-trivial phases so the test is not fooled by symmetry.
    let initial = state_from_label("|T+⟩")?;
    for kind in [GateKind::H, GateKind::X, GateKind::Y, GateKind::Z] {
        let gate = Gate::new(kind, vec![0]);
        let twice = apply_gate(&apply_gate(&initial, &gate)?, &gate)?;
        assert_states_approx_equal(&twice, &initial, &format!("{kind}·{kind} = I"));
    }
    Ok(())
}

#[test]
fn cnot_truth_table() -> Result<(), KetLabError> {
    // CNOT(0,1): flip qubit 1 exactly when qubit 0 is set.
    // |00⟩→|00⟩, |01⟩→|11⟩, |10⟩→|10⟩, |11⟩→|01⟩ (bit 0 = qubit 0).
    let expectations = [(0b00, 0b00), (0b01, 0b11), (0b10, 0b10), (0b11, 0b01)];
    for (input, expected) in expectations {
        let state = apply_gate(&StateVector::from_bits(2, input)?, &Gate::cnot(0, 1))?;
        let expected_state = StateVector::from_bits(2, expected)?;
        assert_states_approx_equal(
            &state,
            &expected_state,
            &format!("CNOT(0,1) on basis {input:#04b}"),
        );
    }
    Ok(())
}

#[test]
fn bell_state_construction() -> Result<(), KetLabError> {
    let final_state = apply_circuit(
        &StateVector::zero(2)?,
        &[Gate::h(0), Gate::cnot(0, 1)],
    )?;
    let rt2 = Complex::new(FRAC_1_SQRT_2, 0.0);
    let zero = Complex::new(0.0, 0.0);
    let expected = StateVector::from_amplitudes(2, vec![rt2, zero, zero, rt2])?;
    assert_states_approx_equal(&final_state, &expected, "H(0); CNOT(0,1) from |00⟩");
    assert!(matches_target(&final_state, &state_from_label("|Φ+⟩")?, 0.99)?);
    Ok(())
}

#[test]
fn fidelity_is_symmetric_and_bounded() -> Result<(), KetLabError> {
    let labels = ["|0⟩", "|1⟩", "|+⟩", "|-⟩", "|i·1⟩", "|T+⟩"];
    for a in labels {
        for b in labels {
            let sa = state_from_label(a)?;
            let sb = state_from_label(b)?;
            let fab = fidelity(&sa, &sb)?;
            let fba = fidelity(&sb, &sa)?;
            assert!(
                (fab - fba).abs() < TEST_TOLERANCE,
                "fidelity({a},{b}) != fidelity({b},{a})"
            );
            assert!((-TEST_TOLERANCE..=1.0 + TEST_TOLERANCE).contains(&fab));
        }
    }
    Ok(())
}

#[test]
fn s_squared_equals_z() -> Result<(), KetLabError> {
    for label in ["|0⟩", "|1⟩", "|+⟩", "|i·1⟩", "|T+⟩"] {
        let initial = state_from_label(label)?;
        let via_s = apply_circuit(&initial, &[Gate::s(0), Gate::s(0)])?;
        let via_z = apply_gate(&initial, &Gate::z(0))?;
        assert_states_approx_equal(&via_s, &via_z, &format!("S² = Z on {label}"));
    }
    Ok(())
}

#[test]
fn toffoli_requires_both_controls() -> Result<(), KetLabError> {
    // |110⟩: qubits 2 and 1 set. Toffoli(2,1,0) fires and sets qubit 0.
    let fired = apply_gate(&StateVector::from_bits(3, 0b110)?, &Gate::toffoli(2, 1, 0))?;
    assert_states_approx_equal(
        &fired,
        &StateVector::from_bits(3, 0b111)?,
        "Toffoli on |110⟩",
    );

    // |100⟩: only qubit 2 set; the gate must do nothing.
    let held = apply_gate(&StateVector::from_bits(3, 0b100)?, &Gate::toffoli(2, 1, 0))?;
    assert_states_approx_equal(
        &held,
        &StateVector::from_bits(3, 0b100)?,
        "Toffoli on |100⟩",
    );
    Ok(())
}

#[test]
fn gate_order_is_significant() -> Result<(), KetLabError> {
    let initial = StateVector::zero(1)?;
    let h_then_x = apply_circuit(&initial, &[Gate::h(0), Gate::x(0)])?;
    let x_then_h = apply_circuit(&initial, &[Gate::x(0), Gate::h(0)])?;
    // H;X ends in |+⟩ while X;H ends in |-⟩: orthogonal states.
    let overlap = fidelity(&h_then_x, &x_then_h)?;
    assert!(
        overlap < 1.0 - 1e-6,
        "H;X and X;H should differ, fidelity {overlap}"
    );
    Ok(())
}

#[test]
fn malformed_gates_are_rejected() -> Result<(), KetLabError> {
    let two_qubits = StateVector::zero(2)?;

    let one_operand_cnot = Gate::new(GateKind::Cnot, vec![0]);
    match apply_gate(&two_qubits, &one_operand_cnot) {
        Err(KetLabError::InvalidGateArity { kind, .. }) => assert_eq!(kind, GateKind::Cnot),
        other => panic!("expected InvalidGateArity, got {other:?}"),
    }

    match apply_gate(&two_qubits, &Gate::x(5)) {
        Err(KetLabError::QubitIndexOutOfRange { index, qubit_count }) => {
            assert_eq!((index, qubit_count), (5, 2));
        }
        other => panic!("expected QubitIndexOutOfRange, got {other:?}"),
    }

    match apply_gate(&two_qubits, &Gate::toffoli(0, 0, 1)) {
        Err(KetLabError::InvalidGateArity { kind, .. }) => assert_eq!(kind, GateKind::Toffoli),
        other => panic!("expected InvalidGateArity for duplicate operand, got {other:?}"),
    }
    Ok(())
}

#[test]
fn fidelity_rejects_mismatched_dimensions() -> Result<(), KetLabError> {
    let one = StateVector::zero(1)?;
    let two = StateVector::zero(2)?;
    match fidelity(&one, &two) {
        Err(KetLabError::DimensionMismatch { expected, actual }) => {
            assert_eq!((expected, actual), (2, 4));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
    Ok(())
}

#[test]
fn unknown_labels_never_fall_back() {
    for label in ["|nope⟩", "|Φ?⟩", "", "|⟩"] {
        match state_from_label(label) {
            Err(KetLabError::UnknownStateLabel { .. }) => {}
            other => panic!("label {label:?} should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn matches_target_uses_strict_threshold() -> Result<(), KetLabError> {
    let plus = state_from_label("|+⟩")?;
    let zero = StateVector::zero(1)?;
    // |⟨0|+⟩|² = 0.5: well under any sensible tolerance.
    assert!(!matches_target(&zero, &plus, 0.99)?);
    assert!(matches_target(&plus, &plus, 0.99)?);
    // Equal states still fail an impossible tolerance of 1.0 (strict >).
    assert!(!matches_target(&plus, &plus, 1.0)?);
    Ok(())
}
