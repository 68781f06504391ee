//! Rock-fluid property errors.

use pf_core::PfError;
use thiserror::Error;

/// Result type for rock-fluid operations.
pub type RockResult<T> = Result<T, RockError>;

/// Errors raised by saturation normalisation, curve evaluation and model lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RockError {
    /// Bad configuration value.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: &'static str,
    },

    /// Required configuration key absent.
    #[error("Missing parameter {name} for model {model}")]
    MissingParameter { model: &'static str, name: String },

    /// Configuration key the model does not accept.
    #[error("Unexpected parameter {name} for model {model} (accepted: {})", accepted.join(", "))]
    UnexpectedParameter {
        model: &'static str,
        name: String,
        accepted: Vec<&'static str>,
    },

    /// Endpoint saturations leave no mobile range.
    #[error(
        "Invalid saturation bounds: irreducible={irreducible}, residual={residual} (1 - irreducible - residual must be > 0)"
    )]
    InvalidBounds { irreducible: f64, residual: f64 },

    /// Evaluation outside the mathematically valid range.
    #[error("Out of domain for {what}: {value}")]
    Domain { what: &'static str, value: f64 },

    /// Three-phase saturations do not sum to one.
    #[error("Saturations sum to {sum} (Sw={sw}, So={so}, Sg={sg}), tolerance {tolerance}")]
    SaturationSum {
        sw: f64,
        so: f64,
        sg: f64,
        sum: f64,
        tolerance: f64,
    },

    /// Dispatcher lookup miss.
    #[error("Unknown model '{name}' (valid: {})", valid.join(", "))]
    UnknownModel {
        name: String,
        valid: Vec<&'static str>,
    },

    /// A derived parameter cannot be estimated from what was supplied.
    #[error("Unresolved parameter: {what}")]
    UnresolvedParameter { what: &'static str },
}

impl RockError {
    pub(crate) fn invalid(name: impl Into<String>, value: f64, reason: &'static str) -> Self {
        RockError::InvalidParameter {
            name: name.into(),
            value,
            reason,
        }
    }

    /// True for every variant that signals bad configuration rather than bad input state.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            RockError::InvalidParameter { .. }
                | RockError::MissingParameter { .. }
                | RockError::UnexpectedParameter { .. }
        )
    }
}

impl From<RockError> for PfError {
    fn from(err: RockError) -> Self {
        match err {
            RockError::Domain { .. } | RockError::SaturationSum { .. } => PfError::Domain {
                what: err.to_string(),
            },
            other => PfError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
