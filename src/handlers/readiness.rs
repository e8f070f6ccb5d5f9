use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::readiness::StoreStatus;
use crate::errors::AppError;
use crate::infrastructure::bootstrap::initialize;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// One of `idle`, `ready`, `unready`.
    pub status: String,
}

impl From<StoreStatus> for ReadinessResponse {
    fn from(status: StoreStatus) -> Self {
        Self {
            status: status.as_str().to_string(),
        }
    }
}

/// GET /readiness
///
/// Reports the last published store status; does not touch the database.
#[utoipa::path(
    get,
    path = "/readiness",
    responses((status = 200, description = "Store status", body = ReadinessResponse)),
    tag = "readiness"
)]
pub async fn get_readiness(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ReadinessResponse::from(state.readiness.status()))
}

/// POST /readiness
///
/// Runs store setup again (pending migrations, then the readiness check),
/// e.g. after checkout was refused.
#[utoipa::path(
    post,
    path = "/readiness",
    responses(
        (status = 200, description = "Store status after the check", body = ReadinessResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readiness"
)]
pub async fn recheck_readiness(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let status = web::block(move || initialize(&state.pool, &state.readiness))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ReadinessResponse::from(status)))
}
