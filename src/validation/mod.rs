// src/validation/mod.rs

//! State-vector sanity checks.
//!
//! Unitary evolution preserves the norm, so these checks exist to catch
//! malformed hand-built vectors and accumulated floating-point drift, not
//! to repair anything.

use crate::core::{KetLabError, StateVector};

/// Allowed drift of the squared norm from 1.0.
const DEFAULT_NORM_TOLERANCE: f64 = 1e-6;

/// Checks that the state vector is normalized (sum of squared amplitudes
/// ≈ 1.0).
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to 1e-6.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(KetLabError::StateNotNormalized)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), KetLabError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sqr = state.norm_sqr();
    if (norm_sqr - 1.0).abs() > effective_tolerance {
        Err(KetLabError::StateNotNormalized { norm_sqr })
    } else {
        Ok(())
    }
}

/// Performs the full set of validity checks on a state.
/// Currently normalization only.
pub fn validate_state(state: &StateVector, norm_tolerance: Option<f64>) -> Result<(), KetLabError> {
    check_normalization(state, norm_tolerance)?;
    Ok(())
}
