use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable as LpVariable,
};

use crate::domain::program::{ConstraintKind, Direction, LinearProgram};
use crate::domain::solver::{Solver, SolverError, SolverOutput, SolverStatus};

/// Pure Rust simplex backend (`good_lp` over `microlp`).
///
/// Has no time limit of its own; callers bound it from the outside.
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        MicrolpSolver
    }
}

impl Default for MicrolpSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn linear_expression(terms: &[(usize, f64)], handles: &[LpVariable]) -> Expression {
    terms.iter().map(|&(idx, coeff)| coeff * handles[idx]).sum()
}

impl Solver for MicrolpSolver {
    fn solve(&self, program: &LinearProgram) -> Result<SolverOutput, SolverError> {
        let mut vars = variables!();
        let handles: Vec<LpVariable> = program
            .variables
            .iter()
            .map(|v| {
                let mut definition = variable().name(v.name.clone());
                if v.lower.is_finite() {
                    definition = definition.min(v.lower);
                }
                if v.upper.is_finite() {
                    definition = definition.max(v.upper);
                }
                vars.add(definition)
            })
            .collect();

        if let Some(&(idx, _)) = program
            .objective
            .terms
            .iter()
            .chain(program.constraints.iter().flat_map(|c| c.terms.iter()))
            .find(|(idx, _)| *idx >= handles.len())
        {
            return Err(SolverError::new(format!(
                "program references undeclared variable {}",
                idx
            )));
        }

        let objective = linear_expression(&program.objective.terms, &handles);
        let unsolved = match program.objective.direction {
            Direction::Maximize => vars.maximise(objective),
            Direction::Minimize => vars.minimise(objective),
        };

        let mut model = unsolved.using(default_solver);
        for c in &program.constraints {
            let lhs = linear_expression(&c.terms, &handles);
            let rhs = c.rhs;
            model = match c.kind {
                ConstraintKind::Equal => model.with(constraint!(lhs == rhs)),
                ConstraintKind::LessOrEqual => model.with(constraint!(lhs <= rhs)),
            };
        }

        let output = match model.solve() {
            Ok(solution) => SolverOutput::new(
                SolverStatus::Optimal,
                handles.iter().map(|&h| solution.value(h)).collect(),
            ),
            Err(ResolutionError::Infeasible) => SolverOutput::without_values(SolverStatus::Infeasible),
            Err(ResolutionError::Unbounded) => SolverOutput::without_values(SolverStatus::Unbounded),
            Err(other) => SolverOutput::without_values(SolverStatus::Failed(other.to_string())),
        };

        Ok(output)
    }

    fn name(&self) -> &str {
        "microlp"
    }
}
