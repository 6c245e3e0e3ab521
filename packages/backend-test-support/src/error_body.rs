//! Error-body test helpers
//!
//! Assertions for the backend's stable error contract without depending on
//! backend types. Every error response is a JSON body of the shape
//! `{message, code, status, trace_id}` with a matching `x-trace-id` header.

use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body.
#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    message: String,
    code: String,
    status: u16,
    trace_id: String,
}

/// Assert that a `ServiceResponse` conforms to the stable error contract:
/// - HTTP status matches expected
/// - `x-trace-id` header exists and matches the body's `trace_id`
/// - `code` and `status` fields match expected values
/// - `message` contains the expected substring, if provided
pub async fn assert_error_body(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message_contains: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_eq!(status, expected_status);

    let body_str = String::from_utf8(body.to_vec()).expect("response body should be valid UTF-8");
    let error: ErrorBodyLike = serde_json::from_str(&body_str)
        .unwrap_or_else(|e| panic!("response body should be a valid error body ({e}): {body_str}"));

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");

    assert_eq!(
        error.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(error.code, expected_code);
    assert_eq!(error.status, expected_status.as_u16());

    if let Some(expected) = expected_message_contains {
        assert!(
            error.message.contains(expected),
            "Expected message to contain '{}', but got '{}'",
            expected,
            error.message
        );
    }
}
