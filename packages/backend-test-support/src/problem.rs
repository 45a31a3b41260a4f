//! Assertions for the problem+json error contract.

use actix_web::http::StatusCode;
use serde_json::Value;

/// Check status, `x-trace-id` parity and the `code` field of an error body.
///
/// Returns the parsed body so callers can make further assertions.
pub fn assert_problem(
    status: StatusCode,
    headers: &actix_web::http::header::HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> Value {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let problem: Value = serde_json::from_slice(body).unwrap_or_else(|_| {
        panic!(
            "error body is not JSON: {}",
            String::from_utf8_lossy(body)
        )
    });

    for key in ["type", "title", "status", "detail", "code", "trace_id", "error"] {
        assert!(problem.get(key).is_some(), "missing `{key}` in {problem}");
    }

    let trace_header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(problem["trace_id"], trace_header);

    assert_eq!(problem["code"], expected_code);
    assert_eq!(problem["status"], expected_status.as_u16());
    assert_eq!(problem["error"], problem["detail"]);

    problem
}
