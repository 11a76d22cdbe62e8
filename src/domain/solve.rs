use crate::domain::interpret::{interpret, Division, InexactPolicy};
use crate::domain::matrix::ValuationMatrix;
use crate::domain::program::build_program;
use crate::domain::solver::{Solver, SolverOptions};
use crate::domain::solver_factory::{create_solver, SolverType};
use crate::error::{DivisionError, Result};

/// Compute the max-min fair division of `valuations` with the given backend.
///
/// Stateless: the program is built fresh for every call and dropped once the
/// result has been extracted, so independent calls may run concurrently.
pub fn divide(
    valuations: &ValuationMatrix,
    solver: &dyn Solver,
    policy: InexactPolicy,
) -> Result<Division> {
    let (program, layout) = build_program(valuations);

    let output = solver
        .solve(&program)
        .map_err(|e| DivisionError::Solver(e.details))?;
    log::debug!("{} finished with status {:?}", solver.name(), output.status);

    interpret(valuations, &layout, output, policy, solver.name())
}

/// Validate raw rows and divide them with the default backend.
pub fn divide_rows(rows: Vec<Vec<f64>>) -> Result<Division> {
    let valuations = ValuationMatrix::new(rows)?;
    let solver = create_solver(SolverType::default(), SolverOptions::default());
    divide(&valuations, solver.as_ref(), InexactPolicy::default())
}
