use crate::domain::solver::{Solver, SolverOptions};
use crate::domain::solvers::MicrolpSolver;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

#[cfg(feature = "gurobi-solver")]
use crate::domain::solvers::GurobiSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverType {
    #[default]
    Microlp,
    #[cfg(feature = "highs-solver")]
    Highs,
    #[cfg(feature = "gurobi-solver")]
    Gurobi,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "microlp" => Some(SolverType::Microlp),
            #[cfg(feature = "highs-solver")]
            "highs" => Some(SolverType::Highs),
            #[cfg(feature = "gurobi-solver")]
            "gurobi" => Some(SolverType::Gurobi),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SolverType::Microlp => "microlp",
            #[cfg(feature = "highs-solver")]
            SolverType::Highs => "highs",
            #[cfg(feature = "gurobi-solver")]
            SolverType::Gurobi => "gurobi",
        }
    }
}

/// Every backend compiled into this build
pub fn available_solvers() -> Vec<SolverType> {
    #[allow(unused_mut)]
    let mut solvers = vec![SolverType::Microlp];
    #[cfg(feature = "highs-solver")]
    solvers.push(SolverType::Highs);
    #[cfg(feature = "gurobi-solver")]
    solvers.push(SolverType::Gurobi);
    solvers
}

/// Create a solver instance based on the specified type
pub fn create_solver(solver_type: SolverType, options: SolverOptions) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Microlp => {
            // microlp has no internal limits; the time limit is enforced by the caller
            let _ = options;
            Box::new(MicrolpSolver::new())
        }
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => Box::new(HighsSolver::new(options)),
        #[cfg(feature = "gurobi-solver")]
        SolverType::Gurobi => Box::new(GurobiSolver::new(options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_type_from_str() {
        assert_eq!(SolverType::from_str("microlp"), Some(SolverType::Microlp));
        assert_eq!(SolverType::from_str("MicroLP"), Some(SolverType::Microlp));
        assert_eq!(SolverType::from_str(" microlp "), Some(SolverType::Microlp));
        #[cfg(feature = "highs-solver")]
        assert_eq!(SolverType::from_str("HiGHS"), Some(SolverType::Highs));
        #[cfg(feature = "gurobi-solver")]
        assert_eq!(SolverType::from_str("Gurobi"), Some(SolverType::Gurobi));
        assert_eq!(SolverType::from_str("unknown"), None);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for solver_type in available_solvers() {
            assert_eq!(SolverType::from_str(solver_type.name()), Some(solver_type));
        }
    }

    #[test]
    fn test_create_microlp_solver() {
        let solver = create_solver(SolverType::Microlp, SolverOptions::default());
        assert_eq!(solver.name(), "microlp");
    }

    #[cfg(feature = "highs-solver")]
    #[test]
    fn test_create_highs_solver() {
        let solver = create_solver(SolverType::Highs, SolverOptions::default());
        assert_eq!(solver.name(), "highs");
    }

    #[cfg(feature = "gurobi-solver")]
    #[test]
    fn test_create_gurobi_solver() {
        let solver = create_solver(SolverType::Gurobi, SolverOptions::default());
        assert_eq!(solver.name(), "gurobi");
    }
}
