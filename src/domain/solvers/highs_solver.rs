use crate::domain::program::{ConstraintKind, Direction, LinearProgram};
use crate::domain::solver::{Solver, SolverError, SolverOptions, SolverOutput, SolverStatus};

use ::highs::{ColProblem, HighsModelStatus, Row, Sense};

/// HiGHS solver implementation
pub struct HighsSolver {
    options: SolverOptions,
}

impl HighsSolver {
    pub fn new(options: SolverOptions) -> Self {
        HighsSolver { options }
    }

    /// Convert HiGHS status to our status
    fn convert_status(model_status: HighsModelStatus) -> SolverStatus {
        match model_status {
            HighsModelStatus::Optimal => SolverStatus::Optimal,
            HighsModelStatus::Infeasible => SolverStatus::Infeasible,
            HighsModelStatus::UnboundedOrInfeasible => SolverStatus::Unbounded,
            HighsModelStatus::Unbounded => SolverStatus::Unbounded,
            HighsModelStatus::ReachedTimeLimit => {
                SolverStatus::Failed("time limit reached".to_string())
            }
            other => SolverStatus::Failed(format!("HiGHS stopped with status {:?}", other)),
        }
    }
}

impl Solver for HighsSolver {
    fn solve(&self, program: &LinearProgram) -> Result<SolverOutput, SolverError> {
        let mut problem = ColProblem::new();

        // First, add all constraint rows
        let rows: Vec<Row> = program
            .constraints
            .iter()
            .map(|c| match c.kind {
                ConstraintKind::Equal => problem.add_row(c.rhs..=c.rhs),
                ConstraintKind::LessOrEqual => problem.add_row(..=c.rhs),
            })
            .collect();

        // For each column, collect its row entries
        let n_cols = program.num_variables();
        let mut col_data: Vec<Vec<(Row, f64)>> = vec![Vec::new(); n_cols];
        for (row_idx, c) in program.constraints.iter().enumerate() {
            for &(col, coeff) in &c.terms {
                let entries = col_data.get_mut(col).ok_or_else(|| {
                    SolverError::new(format!(
                        "constraint {} references undeclared variable {}",
                        c.name, col
                    ))
                })?;
                entries.push((rows[row_idx], coeff));
            }
        }

        let mut obj_coeffs = vec![0.0; n_cols];
        for &(col, coeff) in &program.objective.terms {
            let slot = obj_coeffs.get_mut(col).ok_or_else(|| {
                SolverError::new(format!("objective references undeclared variable {}", col))
            })?;
            *slot += coeff;
        }

        for ((var, row_factors), obj_coeff) in program
            .variables
            .iter()
            .zip(&col_data)
            .zip(obj_coeffs)
        {
            problem.add_column(obj_coeff, var.lower..=var.upper, row_factors);
        }

        let sense = match program.objective.direction {
            Direction::Maximize => Sense::Maximise,
            Direction::Minimize => Sense::Minimise,
        };

        let mut model = problem.optimise(sense);
        model.set_option("output_flag", false);
        if !self.options.presolve {
            model.set_option("presolve", "off");
        }
        if let Some(limit) = self.options.time_limit {
            model.set_option("time_limit", limit.as_secs_f64());
        }
        let solved = model.solve();

        let status = Self::convert_status(solved.status());
        if !status.is_optimal() {
            return Ok(SolverOutput::without_values(status));
        }

        let values = solved.get_solution().columns().to_vec();
        Ok(SolverOutput::new(status, values))
    }

    fn name(&self) -> &str {
        "highs"
    }
}
