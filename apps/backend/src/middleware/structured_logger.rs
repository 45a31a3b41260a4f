//! One `request_completed` event per request.
//!
//! Runs inside the `request` span opened by `RequestTrace`. The event carries
//! the matched route pattern (`/api/classroom/players/{code}`, not the raw
//! path) so classroom codes do not fan out into distinct routes; a `{code}`
//! path segment is recorded on the span's `classroom` field instead.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use super::request_trace::record_classroom;

const UNMATCHED_ROUTE: &str = "unmatched";

/// 5xx is an error, 4xx a warning, everything else info.
fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, route) = match &result {
                Ok(res) => {
                    let req = res.request();
                    if let Some(code) = req.match_info().get("code") {
                        record_classroom(code);
                    }
                    (res.status(), req.match_pattern())
                }
                Err(err) => (err.as_response_error().status_code(), None),
            };
            let route = route.unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
            let status_code = status.as_u16();
            let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

            let level = level_for(status);
            if level == Level::ERROR {
                error!(http.method = %method, http.route = %route, http.status_code = status_code, duration_us, trace_id = %trace_id, message = "request_completed");
            } else if level == Level::WARN {
                warn!(http.method = %method, http.route = %route, http.status_code = status_code, duration_us, trace_id = %trace_id, message = "request_completed");
            } else {
                info!(http.method = %method, http.route = %route, http.status_code = status_code, duration_us, trace_id = %trace_id, message = "request_completed");
            }

            result
        })
    }
}
