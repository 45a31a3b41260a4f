use actix_cors::Cors;
use actix_web::http::header;

/// Classrooms are joined from whatever host serves the quiz page, so any
/// origin may call the API. Only the methods and headers the browser client
/// actually sends are allowed.
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600)
}
