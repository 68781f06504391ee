//! Error types for flash calculations.

use crate::rachford_rice::PhaseState;
use pf_core::PfError;
use thiserror::Error;

/// Errors that can occur while splitting a feed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlashError {
    #[error("Invalid composition: {what}")]
    InvalidComposition { what: String },

    #[error("Flash diverged at iteration {iteration}: zero derivative at v = {vapor_fraction}")]
    Diverged {
        iteration: usize,
        vapor_fraction: f64,
    },

    #[error(
        "Flash did not converge in {iterations} iterations (v = {vapor_fraction}, f(v) = {residual})"
    )]
    NonConvergence {
        iterations: usize,
        vapor_fraction: f64,
        residual: f64,
    },

    #[error("No phase split: feed is single-phase {phase:?} (f(0) = {f_at_zero}, f(1) = {f_at_one})")]
    SinglePhase {
        phase: PhaseState,
        f_at_zero: f64,
        f_at_one: f64,
    },
}

pub type FlashResult<T> = Result<T, FlashError>;

impl From<FlashError> for PfError {
    fn from(e: FlashError) -> Self {
        match e {
            FlashError::InvalidComposition { what } => PfError::InvalidArg { what },
            FlashError::SinglePhase { .. } => PfError::Domain {
                what: e.to_string(),
            },
            FlashError::Diverged { .. } | FlashError::NonConvergence { .. } => {
                PfError::Convergence {
                    what: e.to_string(),
                }
            }
        }
    }
}
