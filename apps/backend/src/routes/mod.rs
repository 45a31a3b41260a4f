use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod classroom;
pub mod health;

/// Register every route. `main.rs` and the test app builder both call this so
/// the two can never drift apart.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    // Classroom routes: /api/classroom/**
    cfg.service(web::scope("/api/classroom").configure(classroom::configure_routes));
}

/// Fallback for unmatched routes, registered as the app's default service.
pub async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::RouteNotFound,
        format!("Route not found: {} {}", req.method(), req.path()),
    ))
}
