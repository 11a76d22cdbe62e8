use std::time::Duration;

use thiserror::Error;

use crate::domain::program::LinearProgram;

/// Terminal status reported by a solver backend
#[derive(Debug, Clone, PartialEq)]
pub enum SolverStatus {
    Optimal,
    /// Optimum reached within relaxed tolerances
    OptimalInexact,
    Infeasible,
    Unbounded,
    /// Numerical breakdown, time or iteration limit, or any other non-terminal stop
    Failed(String),
}

impl SolverStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::OptimalInexact)
    }
}

/// What a backend hands back: a status and, when optimal, one value per
/// declared variable in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    pub status: SolverStatus,
    pub values: Vec<f64>,
}

impl SolverOutput {
    pub fn new(status: SolverStatus, values: Vec<f64>) -> Self {
        SolverOutput { status, values }
    }

    pub fn without_values(status: SolverStatus) -> Self {
        SolverOutput {
            status,
            values: Vec::new(),
        }
    }
}

/// Backend could not be set up or driven at all
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{details}")]
pub struct SolverError {
    pub details: String,
}

impl SolverError {
    pub fn new(details: impl Into<String>) -> Self {
        SolverError {
            details: details.into(),
        }
    }
}

/// Knobs shared by all backends; each backend honours what it supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub time_limit: Option<Duration>,
    pub presolve: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            time_limit: None,
            presolve: true,
        }
    }
}

/// Common interface for continuous LP solvers
pub trait Solver: Send + Sync {
    /// Solve a linear program with continuous variables
    ///
    /// # Arguments
    /// * `program` - Variables with bounds, linear constraints and a linear objective
    ///
    /// # Returns
    /// The terminal status and, for optimal statuses, a value for every variable
    fn solve(&self, program: &LinearProgram) -> Result<SolverOutput, SolverError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
