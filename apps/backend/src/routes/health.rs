use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::{now_millis, EpochMillis};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct PingResponse {
    success: bool,
    message: &'static str,
    timestamp: EpochMillis,
}

/// GET /api/test
///
/// Reachability check the browser calls before joining.
async fn ping() -> Result<web::Json<PingResponse>, AppError> {
    Ok(web::Json(PingResponse {
        success: true,
        message: "Server is running",
        timestamp: now_millis(),
    }))
}

/// GET /health
async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("ok"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/test", web::get().to(ping))
        .route("/health", web::get().to(health));
}
