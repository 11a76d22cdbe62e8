pub mod microlp_solver;

#[cfg(feature = "highs-solver")]
pub mod highs_solver;

#[cfg(feature = "gurobi-solver")]
pub mod gurobi_solver;

pub use microlp_solver::MicrolpSolver;

#[cfg(feature = "highs-solver")]
pub use highs_solver::HighsSolver;

#[cfg(feature = "gurobi-solver")]
pub use gurobi_solver::GurobiSolver;
