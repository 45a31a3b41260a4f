//! Per-request trace id and tracing span.
//!
//! Generates a UUID v4 trace id, stores it in request extensions (read by
//! `StructuredLogger`), makes it available through `trace_ctx` for error
//! bodies, and runs the downstream service inside a `request` span. The span
//! has an empty `classroom` field that handlers fill with
//! [`record_classroom`]. Every response carries both `x-request-id` and
//! `x-trace-id`.
//!
//! Wire it last so it is the outermost layer:
//!
//! App::new()
//!     .wrap(cors_middleware())
//!     .wrap(StructuredLogger)
//!     .wrap(RequestTrace)

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{field, info_span, Instrument, Span};
use uuid::Uuid;

use crate::trace_ctx;

const TRACE_ID_HEADERS: [&str; 2] = ["x-request-id", "x-trace-id"];

/// Tag the current request span with the classroom it touches.
pub fn record_classroom(code: &str) {
    Span::current().record("classroom", code);
}

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(trace_id.clone());

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            classroom = field::Empty
        );

        let fut = trace_ctx::with_trace_id(trace_id.clone(), self.service.call(req));

        Box::pin(
            async move {
                let mut res = fut.await?;

                let value = header::HeaderValue::from_str(&trace_id)
                    .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-uuid"));
                for name in TRACE_ID_HEADERS {
                    res.headers_mut()
                        .insert(header::HeaderName::from_static(name), value.clone());
                }

                Ok(res)
            }
            .instrument(span),
        )
    }
}
