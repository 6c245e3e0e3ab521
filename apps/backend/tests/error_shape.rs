//! Contract tests for the stable error body shape.

mod support;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend::errors::ErrorCode;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::AppError;
use backend_test_support::error_body::assert_error_body;
use support::create_test_app;

async fn fail_validation() -> Result<HttpResponse, AppError> {
    Err(AppError::validation(
        ErrorCode::ValidationError,
        "Example failure",
    ))
}

async fn fail_internal() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("secret internal detail"))
}

async fn succeed() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("ok"))
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/fail/validation").route(web::get().to(fail_validation)));
    cfg.service(web::resource("/fail/internal").route(web::get().to(fail_internal)));
    cfg.service(web::resource("/ok").route(web::get().to(succeed)));
}

#[actix_web::test]
async fn test_error_body_contract() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(state).with_routes(configure).build().await?;

    let req = test::TestRequest::get().uri("/fail/validation").to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        Some("Example failure"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_internal_errors_leak_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(state).with_routes(configure).build().await?;

    let req = test::TestRequest::get().uri("/fail/internal").to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let body = test::read_body(resp).await;
    let body_str = String::from_utf8(body.to_vec())?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_str.contains("Internal server error"));
    assert!(!body_str.contains("secret internal detail"));

    Ok(())
}

#[actix_web::test]
async fn test_success_responses_carry_trace_id_header() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(state).with_routes(configure).build().await?;

    let req = test::TestRequest::get().uri("/ok").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("x-trace-id").is_some());

    Ok(())
}
