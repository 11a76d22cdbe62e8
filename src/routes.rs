use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::cache::{CacheKey, DivisionCache};
use crate::config::ServerConfig;
use crate::convert::to_divide_response;
use crate::domain::interpret::InexactPolicy;
use crate::domain::matrix::ValuationMatrix;
use crate::domain::solve::divide;
use crate::domain::solver_factory::{available_solvers, create_solver, SolverType};
use crate::error::DivisionError;
use crate::models::{ApiError, DivideRequest, SolversResponse};

/// Shared per-server state
pub struct AppState {
    pub config: ServerConfig,
    pub cache: DivisionCache,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let cache = DivisionCache::new(config.cache_capacity);
        AppState { config, cache }
    }
}

impl ResponseError for DivisionError {
    fn status_code(&self) -> StatusCode {
        match self {
            DivisionError::Input(_) => StatusCode::BAD_REQUEST,
            DivisionError::Infeasible
            | DivisionError::Unbounded
            | DivisionError::InexactRejected => StatusCode::UNPROCESSABLE_ENTITY,
            DivisionError::Solver(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiError::from(self))
    }
}

/// JSON extractor config: payload limit, and malformed bodies answered with 400 + `{"error": ...}`
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ApiError {
                    error: err_string,
                    kind: None,
                }),
            )
            .into()
        })
}

/// POST /divide
pub async fn divide_handler(
    state: web::Data<AppState>,
    req: web::Json<DivideRequest>,
) -> Result<HttpResponse, DivisionError> {
    let DivideRequest {
        valuations,
        solver,
        strict,
    } = req.into_inner();

    let solver_type = match solver.as_deref() {
        Some(name) => SolverType::from_str(name)
            .ok_or_else(|| DivisionError::Input(format!("unknown solver {:?}", name)))?,
        None => state.config.solver,
    };
    let policy = if strict {
        InexactPolicy::Reject
    } else {
        state.config.inexact_policy
    };

    let valuations = ValuationMatrix::new(valuations)?;
    let key = CacheKey::new(solver_type, policy, &valuations);
    if let Some(division) = state.cache.get(&key) {
        log::debug!("serving cached division from {}", division.solver);
        return Ok(HttpResponse::Ok().json(to_divide_response(&division, true)));
    }

    log::info!(
        "dividing {} resources among {} agents with {}",
        valuations.resources(),
        valuations.agents(),
        solver_type.name(),
    );

    let solver = create_solver(solver_type, state.config.solver_options());
    let job = web::block(move || divide(&valuations, solver.as_ref(), policy));
    let joined = match state.config.solve_timeout {
        Some(limit) => actix_web::rt::time::timeout(limit, job)
            .await
            .map_err(|_| DivisionError::Solver(format!("solve timed out after {:?}", limit)))?,
        None => job.await,
    };
    let division = joined.map_err(|e| DivisionError::Solver(e.to_string()))??;

    let response = to_divide_response(&division, false);
    state.cache.insert(key, division);
    Ok(HttpResponse::Ok().json(response))
}

/// GET /solvers
pub async fn solvers(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(SolversResponse {
        default: state.config.solver.name().to_string(),
        available: available_solvers()
            .iter()
            .map(|s| s.name().to_string())
            .collect(),
    })
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/divide", web::post().to(divide_handler))
        .route("/solvers", web::get().to(solvers))
        .route("/health", web::get().to(health_check));
}
