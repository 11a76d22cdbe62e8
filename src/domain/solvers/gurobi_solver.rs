use crate::domain::program::{ConstraintKind, Direction, LinearProgram};
use crate::domain::solver::{Solver, SolverError, SolverOptions, SolverOutput, SolverStatus};

use grb::prelude::*;

/// Gurobi solver implementation
pub struct GurobiSolver {
    options: SolverOptions,
}

impl GurobiSolver {
    pub fn new(options: SolverOptions) -> Self {
        GurobiSolver { options }
    }

    /// Convert Gurobi status to our status
    fn convert_status(status: grb::Status) -> SolverStatus {
        match status {
            grb::Status::Optimal => SolverStatus::Optimal,
            grb::Status::SubOptimal => SolverStatus::OptimalInexact,
            grb::Status::Infeasible => SolverStatus::Infeasible,
            grb::Status::Unbounded => SolverStatus::Unbounded,
            grb::Status::InfOrUnbd => SolverStatus::Failed("infeasible or unbounded".to_string()),
            grb::Status::TimeLimit => SolverStatus::Failed("time limit reached".to_string()),
            other => SolverStatus::Failed(format!("Gurobi stopped with status {:?}", other)),
        }
    }
}

fn gurobi_bound(value: f64) -> f64 {
    value.clamp(-grb::INFINITY, grb::INFINITY)
}

fn gurobi_error(context: &str) -> impl Fn(grb::Error) -> SolverError + '_ {
    move |e| SolverError::new(format!("{}: {}", context, e))
}

impl Solver for GurobiSolver {
    fn solve(&self, program: &LinearProgram) -> Result<SolverOutput, SolverError> {
        let mut env = Env::new("").map_err(gurobi_error("Failed to create Gurobi environment"))?;

        // Disable Gurobi console output for production use
        env.set(param::OutputFlag, 0)
            .map_err(gurobi_error("Failed to set Gurobi output flag"))?;

        // Configure presolve: -1 = auto, 0 = off
        env.set(param::Presolve, if self.options.presolve { -1 } else { 0 })
            .map_err(gurobi_error("Failed to set Gurobi presolve"))?;

        if let Some(limit) = self.options.time_limit {
            env.set(param::TimeLimit, limit.as_secs_f64())
                .map_err(gurobi_error("Failed to set Gurobi time limit"))?;
        }

        let mut model = Model::with_env("egalitarian_division", &env)
            .map_err(gurobi_error("Failed to create Gurobi model"))?;

        let mut vars: Vec<Var> = Vec::with_capacity(program.num_variables());
        for var in &program.variables {
            let lower = gurobi_bound(var.lower);
            let upper = gurobi_bound(var.upper);
            let gurobi_var = add_ctsvar!(
                model,
                name: &var.name,
                bounds: lower..upper
            )
            .map_err(gurobi_error("Failed to add continuous variable"))?;
            vars.push(gurobi_var);
        }

        model
            .update()
            .map_err(gurobi_error("Failed to update model after adding variables"))?;

        let expression = |terms: &[(usize, f64)]| -> Result<Expr, SolverError> {
            terms.iter().try_fold(Expr::Constant(0.0), |acc, &(idx, coeff)| {
                let var = vars.get(idx).ok_or_else(|| {
                    SolverError::new(format!("program references undeclared variable {}", idx))
                })?;
                Ok(acc + coeff * *var)
            })
        };

        for c in &program.constraints {
            let lhs = expression(&c.terms)?;
            let rhs = c.rhs;
            let constr = match c.kind {
                ConstraintKind::Equal => c!(lhs == rhs),
                ConstraintKind::LessOrEqual => c!(lhs <= rhs),
            };
            model
                .add_constr(&c.name, constr)
                .map_err(gurobi_error("Failed to add constraint"))?;
        }

        let sense = match program.objective.direction {
            Direction::Maximize => ModelSense::Maximize,
            Direction::Minimize => ModelSense::Minimize,
        };
        let objective = expression(&program.objective.terms)?;
        model
            .set_objective(objective, sense)
            .map_err(gurobi_error("Failed to set objective"))?;

        model
            .optimize()
            .map_err(gurobi_error("Failed to optimize"))?;

        let status = Self::convert_status(
            model
                .status()
                .map_err(gurobi_error("Failed to get model status"))?,
        );
        if !status.is_optimal() {
            return Ok(SolverOutput::without_values(status));
        }

        let values = vars
            .iter()
            .map(|var| model.get_obj_attr(attr::X, var))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(gurobi_error("Failed to read solution values"))?;

        Ok(SolverOutput::new(status, values))
    }

    fn name(&self) -> &str {
        "gurobi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_status_keeps_ambiguous_outcome_a_failure() {
        assert_eq!(
            GurobiSolver::convert_status(grb::Status::InfOrUnbd),
            SolverStatus::Failed("infeasible or unbounded".to_string())
        );
        assert_eq!(
            GurobiSolver::convert_status(grb::Status::Unbounded),
            SolverStatus::Unbounded
        );
        assert_eq!(
            GurobiSolver::convert_status(grb::Status::SubOptimal),
            SolverStatus::OptimalInexact
        );
    }
}
