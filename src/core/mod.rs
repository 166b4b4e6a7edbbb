// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod kets;
pub mod state;

// Re-export public types for convenient access via `ketlab::core::TypeName`
pub use error::KetLabError;
pub use kets::{StateSpec, prepare_initial_state, state_from_label};
pub use state::StateVector;

pub(crate) use state::checked_dimension;
