//! # Egalitarian Division
//!
//! Max-min fair, fractional division of divisible resources among agents with
//! heterogeneous valuations. Every resource has one unit of supply and is split
//! completely; the smallest utility any agent receives is maximized.
//!
//! The program is built solver-agnostically and handed to a pluggable [`Solver`]
//! backend; the result is interpreted into an immutable [`Division`].
//!
//! ## Example
//!
//! ```no_run
//! use egalitarian_division::{create_solver, divide, InexactPolicy, SolverOptions, SolverType, ValuationMatrix};
//!
//! fn main() -> Result<(), egalitarian_division::DivisionError> {
//!     let valuations = ValuationMatrix::new(vec![
//!         vec![80.0, 19.0, 1.0],
//!         vec![70.0, 1.0, 29.0],
//!     ])?;
//!     let solver = create_solver(SolverType::Microlp, SolverOptions::default());
//!
//!     let division = divide(&valuations, solver.as_ref(), InexactPolicy::Accept)?;
//!     println!("min utility: {:.2}", division.min_utility);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod models;
pub mod routes;

pub use domain::interpret::{
    floor_tolerance, Division, DivisionStatus, InexactPolicy, DEFAULT_TOLERANCE,
};
pub use domain::matrix::{AllocationMatrix, Matrix, ValuationMatrix};
pub use domain::program::{build_program, LinearProgram, ProgramLayout};
pub use domain::solve::{divide, divide_rows};
pub use domain::solver::{Solver, SolverError, SolverOptions, SolverOutput, SolverStatus};
pub use domain::solver_factory::{available_solvers, create_solver, SolverType};
pub use error::{DivisionError, Result};
