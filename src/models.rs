use serde::{Deserialize, Serialize};

// ---------- API (wire) types: owned & serde-friendly ----------

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DivideRequest {
    /// `valuations[i][j]`: agent i's value for one full unit of resource j
    pub valuations: Vec<Vec<f64>>,
    /// Backend name; the server default when absent
    #[serde(default)]
    pub solver: Option<String>,
    /// Reject inexact optima instead of flagging them
    #[serde(default)]
    pub strict: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    Optimal,
    OptimalInaccurate,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DivideResponse {
    pub status: ApiStatus,
    pub min_utility: f64,
    pub allocations: Vec<Vec<f64>>,
    pub utilities: Vec<f64>,
    pub solver: String,
    pub cached: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SolversResponse {
    pub default: String,
    pub available: Vec<String>,
}
