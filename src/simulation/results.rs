// src/simulation/results.rs
use crate::core::StateVector;
use std::fmt;

/// Amplitudes/probabilities below this are omitted from the report.
const REPORT_CUTOFF: f64 = 1e-3;

/// The outcome of one circuit run.
///
/// Always carries the final state; when the run was checked against a
/// puzzle target it also carries the measured fidelity and the pass/fail
/// verdict. Treat the state as read-only display data — re-run the circuit
/// from the initial state rather than feeding a result back in.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    final_state: StateVector,
    fidelity: Option<f64>,
    solved: Option<bool>,
}

impl RunResult {
    pub(crate) fn new(final_state: StateVector) -> Self {
        Self {
            final_state,
            fidelity: None,
            solved: None,
        }
    }

    pub(crate) fn with_verdict(final_state: StateVector, fidelity: f64, solved: bool) -> Self {
        Self {
            final_state,
            fidelity: Some(fidelity),
            solved: Some(solved),
        }
    }

    /// The state vector after the full gate sequence.
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }

    /// Fidelity against the target, when a target was checked.
    pub fn fidelity(&self) -> Option<f64> {
        self.fidelity
    }

    /// Pass/fail verdict, when a target was checked.
    pub fn solved(&self) -> Option<bool> {
        self.solved
    }

    /// `true` only for a checked run that passed.
    pub fn is_solved(&self) -> bool {
        self.solved == Some(true)
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final State Vector:")?;
        for (i, amp) in self.final_state.amplitudes().iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > REPORT_CUTOFF {
                writeln!(
                    f,
                    "  {}: {:.4}{:+.4}i (probability: {:.4})",
                    self.final_state.basis_label(i),
                    amp.re,
                    amp.im,
                    prob
                )?;
            }
        }
        writeln!(f, "Measurement Probabilities:")?;
        for (i, prob) in self.final_state.probabilities().iter().enumerate() {
            if *prob > REPORT_CUTOFF {
                writeln!(
                    f,
                    "  {}: {:.1}%",
                    self.final_state.basis_label(i),
                    prob * 100.0
                )?;
            }
        }
        if let (Some(fidelity), Some(solved)) = (self.fidelity, self.solved) {
            writeln!(
                f,
                "Target fidelity: {:.4} ({})",
                fidelity,
                if solved { "solved" } else { "not solved" }
            )?;
        }
        Ok(())
    }
}
