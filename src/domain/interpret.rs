use crate::domain::matrix::{AllocationMatrix, Matrix, ValuationMatrix};
use crate::domain::program::ProgramLayout;
use crate::domain::solver::{SolverOutput, SolverStatus};
use crate::error::{DivisionError, Result};

/// Tolerance callers should use when checking column sums and utility comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Largest gap allowed between the solver's floor and the smallest recomputed
/// utility. Grows with the largest utility any agent could reach.
pub fn floor_tolerance(valuations: &ValuationMatrix) -> f64 {
    DEFAULT_TOLERANCE * (1.0 + valuations.max_value() * valuations.resources() as f64)
}

/// How a successful solve was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivisionStatus {
    Optimal,
    /// Optimum within relaxed solver tolerances
    OptimalInaccurate,
}

impl DivisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DivisionStatus::Optimal => "optimal",
            DivisionStatus::OptimalInaccurate => "optimal_inaccurate",
        }
    }
}

/// What to do when the backend reports an inexact optimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InexactPolicy {
    /// Return the division, flagged `OptimalInaccurate`
    #[default]
    Accept,
    /// Fail with [`DivisionError::InexactRejected`]
    Reject,
}

/// An egalitarian division produced by a successful solve.
///
/// `utilities` are recomputed from the valuations and `allocations`;
/// only `min_utility` is taken from the solver's floor variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Division {
    pub status: DivisionStatus,
    pub min_utility: f64,
    pub allocations: AllocationMatrix,
    pub utilities: Vec<f64>,
    pub solver: String,
}

impl Division {
    /// Smallest recomputed utility. Matches `min_utility` up to solver round-off.
    pub fn realized_floor(&self) -> f64 {
        self.utilities.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest distance of any resource's total share from exactly one unit.
    pub fn max_column_deviation(&self) -> f64 {
        self.allocations
            .column_sums()
            .into_iter()
            .map(|sum| (sum - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

/// Turn a backend's terminal output into a [`Division`] or an error.
///
/// Any status other than an (accepted) optimum is a hard failure; no partial
/// allocation is ever returned. An optimum whose floor disagrees with the
/// utilities its allocation realizes is reported as a solver failure.
pub fn interpret(
    valuations: &ValuationMatrix,
    layout: &ProgramLayout,
    output: SolverOutput,
    policy: InexactPolicy,
    solver_name: &str,
) -> Result<Division> {
    let status = match output.status {
        SolverStatus::Optimal => DivisionStatus::Optimal,
        SolverStatus::OptimalInexact => match policy {
            InexactPolicy::Accept => DivisionStatus::OptimalInaccurate,
            InexactPolicy::Reject => {
                log::warn!("{} reached only an inexact optimum; rejecting", solver_name);
                return Err(DivisionError::InexactRejected);
            }
        },
        SolverStatus::Infeasible => {
            log::warn!("{} reported the division program as infeasible", solver_name);
            return Err(DivisionError::Infeasible);
        }
        SolverStatus::Unbounded => {
            log::warn!("{} reported the division program as unbounded", solver_name);
            return Err(DivisionError::Unbounded);
        }
        SolverStatus::Failed(reason) => {
            log::warn!("{} failed: {}", solver_name, reason);
            return Err(DivisionError::Solver(reason));
        }
    };

    if output.values.len() != layout.num_variables() {
        return Err(DivisionError::Solver(format!(
            "{} returned {} values for {} variables",
            solver_name,
            output.values.len(),
            layout.num_variables(),
        )));
    }
    if let Some(idx) = output.values.iter().position(|v| !v.is_finite()) {
        return Err(DivisionError::Solver(format!(
            "{} returned a non-finite value for variable {}",
            solver_name, idx
        )));
    }

    let mut values = output.values;
    let min_utility = values[layout.floor_index()] * layout.scale;
    values.truncate(layout.floor_index());

    let allocations = Matrix::from_flat(layout.agents, layout.resources, values)
        .map_err(|e| DivisionError::Solver(e.to_string()))?;
    let utilities = valuations.utilities(&allocations);

    let division = Division {
        status,
        min_utility,
        allocations,
        utilities,
        solver: solver_name.to_string(),
    };

    let gap = (division.min_utility - division.realized_floor()).abs();
    if gap > floor_tolerance(valuations) {
        log::warn!(
            "{} reported floor {:e} but its allocation realizes {:e}",
            solver_name,
            division.min_utility,
            division.realized_floor(),
        );
        return Err(DivisionError::Solver(format!(
            "{} reported floor {:e} inconsistent with realized minimum utility {:e}",
            solver_name,
            division.min_utility,
            division.realized_floor(),
        )));
    }

    Ok(division)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::program::build_program;

    fn farm() -> (ValuationMatrix, ProgramLayout) {
        let valuations =
            ValuationMatrix::new(vec![vec![80.0, 19.0, 1.0], vec![70.0, 1.0, 29.0]]).unwrap();
        let (_, layout) = build_program(&valuations);
        (valuations, layout)
    }

    /// Optimal values in program units: the floor is divided by the largest valuation.
    fn farm_optimum() -> Vec<f64> {
        let wood = 8.0 / 15.0;
        let floor = (80.0 * wood + 19.0) / 80.0;
        vec![wood, 1.0, 0.0, 1.0 - wood, 0.0, 1.0, floor]
    }

    #[test]
    fn test_interpret_optimal_output_recomputes_utilities() {
        let (valuations, layout) = farm();
        let output = SolverOutput::new(SolverStatus::Optimal, farm_optimum());

        let division =
            interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock").unwrap();

        assert_eq!(division.status, DivisionStatus::Optimal);
        assert_eq!(division.solver, "mock");
        assert_eq!(division.allocations.rows(), 2);
        assert_eq!(division.allocations.cols(), 3);
        assert!((division.min_utility - 61.6667).abs() < 1e-3);
        for utility in &division.utilities {
            assert!((utility - division.min_utility).abs() < DEFAULT_TOLERANCE);
        }
        assert!(division.max_column_deviation() < DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_interpret_given_floor_inconsistent_with_allocation_should_fail() {
        let (valuations, layout) = farm();
        let mut values = farm_optimum();
        values[6] = 1000.0;
        let output = SolverOutput::new(SolverStatus::Optimal, values);

        let result = interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock");
        assert!(matches!(result, Err(DivisionError::Solver(_))));
    }

    #[test]
    fn test_interpret_given_zero_floor_for_large_valuations_should_fail() {
        let valuations =
            ValuationMatrix::new(vec![vec![1e20, 1e20, 1e20], vec![1.0, 1.0, 1.0]]).unwrap();
        let (_, layout) = build_program(&valuations);
        // Everything to the second agent: the first realizes nothing while
        // the floor claims half of the first agent's best outcome.
        let values = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.5];
        let output = SolverOutput::new(SolverStatus::Optimal, values);

        let result = interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock");
        assert!(matches!(result, Err(DivisionError::Solver(_))));
    }

    #[test]
    fn test_interpret_multiplies_floor_back_by_program_scale() {
        let valuations =
            ValuationMatrix::new(vec![vec![8e10, 1.9e10, 1e9], vec![7e10, 1e9, 2.9e10]]).unwrap();
        let (_, layout) = build_program(&valuations);
        let output = SolverOutput::new(SolverStatus::Optimal, farm_optimum());

        let division =
            interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock").unwrap();
        assert!((division.min_utility / 1e9 - 61.6667).abs() < 1e-3);
        let gap = (division.realized_floor() - division.min_utility).abs();
        assert!(gap < floor_tolerance(&valuations));
    }

    #[test]
    fn test_interpret_inexact_output_depends_on_policy() {
        let (valuations, layout) = farm();
        let output = SolverOutput::new(SolverStatus::OptimalInexact, farm_optimum());

        let accepted = interpret(
            &valuations,
            &layout,
            output.clone(),
            InexactPolicy::Accept,
            "mock",
        )
        .unwrap();
        assert_eq!(accepted.status, DivisionStatus::OptimalInaccurate);
        assert_eq!(accepted.status.as_str(), "optimal_inaccurate");

        let rejected = interpret(&valuations, &layout, output, InexactPolicy::Reject, "mock");
        assert_eq!(rejected, Err(DivisionError::InexactRejected));
    }

    #[test]
    fn test_interpret_maps_failure_statuses_to_errors() {
        let (valuations, layout) = farm();
        let cases = vec![
            (SolverStatus::Infeasible, DivisionError::Infeasible),
            (SolverStatus::Unbounded, DivisionError::Unbounded),
            (
                SolverStatus::Failed("iteration limit".to_string()),
                DivisionError::Solver("iteration limit".to_string()),
            ),
        ];

        for (status, expected) in cases {
            let output = SolverOutput::without_values(status);
            let result = interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock");
            assert_eq!(result, Err(expected));
        }
    }

    #[test]
    fn test_interpret_rejects_wrong_value_count() {
        let (valuations, layout) = farm();
        let output = SolverOutput::new(SolverStatus::Optimal, vec![0.5; 4]);
        let result = interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock");
        assert!(matches!(result, Err(DivisionError::Solver(_))));
    }

    #[test]
    fn test_interpret_rejects_non_finite_values() {
        let (valuations, layout) = farm();
        let mut values = farm_optimum();
        values[2] = f64::NAN;
        let output = SolverOutput::new(SolverStatus::Optimal, values);
        let result = interpret(&valuations, &layout, output, InexactPolicy::Accept, "mock");
        assert!(matches!(result, Err(DivisionError::Solver(_))));
    }
}
