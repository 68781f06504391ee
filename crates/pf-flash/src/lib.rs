//! Two-phase vapor-liquid flash for petroflow.
//!
//! This crate solves the Rachford-Rice equation for the vapor fraction of a
//! multi-component feed with known equilibrium ratios (K-values), using a
//! bracketed Newton-Raphson iteration, and derives the liquid and vapor phase
//! compositions from the converged root.

pub mod error;
pub mod feed;
pub mod rachford_rice;

pub use error::{FlashError, FlashResult};
pub use feed::Feed;
pub use rachford_rice::{
    FlashStage, IterationEvent, PhaseSplit, PhaseState, RachfordRiceConfig, RachfordRiceSolver,
    solve, solve_with_progress,
};
