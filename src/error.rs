use thiserror::Error;

/// Result type for division operations
pub type Result<T> = std::result::Result<T, DivisionError>;

/// Errors that can occur while computing an egalitarian division
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DivisionError {
    /// The valuation matrix is malformed (empty, ragged, negative or non-finite entries)
    #[error("Invalid valuations: {0}")]
    Input(String),

    /// The solver found the constraint set to be empty
    #[error("Fair division impossible with given valuations: program is infeasible")]
    Infeasible,

    /// The solver found the objective to be unbounded
    #[error("Fair division impossible with given valuations: objective is unbounded")]
    Unbounded,

    /// Numerical breakdown, timeout, backend setup failure or malformed solver output
    #[error("Solver failed: {0}")]
    Solver(String),

    /// The solver only reached an inexact optimum and the caller asked for a strict one
    #[error("Solver reached only an inexact optimum and strict mode is enabled")]
    InexactRejected,
}

impl DivisionError {
    /// Short machine-readable tag, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            DivisionError::Input(_) => "input",
            DivisionError::Infeasible => "infeasible",
            DivisionError::Unbounded => "unbounded",
            DivisionError::Solver(_) => "solver",
            DivisionError::InexactRejected => "inexact_rejected",
        }
    }
}
