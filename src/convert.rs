use crate::domain::interpret::{Division, DivisionStatus};
use crate::error::DivisionError;
use crate::models::{ApiError, ApiStatus, DivideResponse};

impl From<DivisionStatus> for ApiStatus {
    fn from(s: DivisionStatus) -> Self {
        match s {
            DivisionStatus::Optimal => ApiStatus::Optimal,
            DivisionStatus::OptimalInaccurate => ApiStatus::OptimalInaccurate,
        }
    }
}

/// Map a division to its wire form; `cached` tells the client whether it was recomputed.
pub fn to_divide_response(division: &Division, cached: bool) -> DivideResponse {
    DivideResponse {
        status: division.status.into(),
        min_utility: division.min_utility,
        allocations: division.allocations.to_rows(),
        utilities: division.utilities.clone(),
        solver: division.solver.clone(),
        cached,
    }
}

impl From<&DivisionError> for ApiError {
    fn from(e: &DivisionError) -> Self {
        ApiError {
            error: e.to_string(),
            kind: Some(e.kind().to_string()),
        }
    }
}
