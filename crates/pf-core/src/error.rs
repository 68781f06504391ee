use thiserror::Error;

pub type PfResult<T> = Result<T, PfError>;

/// Umbrella error that every petroflow crate converts into.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PfError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Out of domain: {what}")]
    Domain { what: String },

    #[error("Convergence failed: {what}")]
    Convergence { what: String },
}
