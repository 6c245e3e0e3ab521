mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::{verify_access_token, Role, SecurityConfig};
use backend_test_support::error_body::assert_error_body;
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;
use support::{build_sqlite_state, create_test_app, register_user, TEST_SECRET};

#[actix_web::test]
async fn test_register_creates_user_and_returns_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("reg");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "Test User", "email": email, "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User created successfully");

    let user = &body["data"]["user"];
    assert_eq!(user["email"], email);
    assert_eq!(user["name"], "Test User");
    assert_eq!(user["role"], "USER");
    // The stored hash must never be serialized
    assert!(user.get("password_hash").is_none());

    // The token round-trips into an identity matching the new user
    let token = body["data"]["token"].as_str().unwrap();
    let security = SecurityConfig::new(TEST_SECRET.as_bytes());
    let identity = verify_access_token(token, &security)?;
    assert_eq!(identity.subject_id, user["id"].as_i64().unwrap());
    assert_eq!(identity.email, email);
    assert_eq!(identity.role, Role::User);

    Ok(())
}

#[actix_web::test]
async fn test_register_with_admin_role() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("admin");
    let (user, token) = register_user(&app, "Admin", &email, "pw123456", Some("ADMIN")).await;
    assert_eq!(user["role"], "ADMIN");

    let security = SecurityConfig::new(TEST_SECRET.as_bytes());
    let identity = verify_access_token(&token, &security)?;
    assert_eq!(identity.role, Role::Admin);

    Ok(())
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("dup");
    register_user(&app, "First", &email, "pw123456", None).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "Second", "email": email, "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::CONFLICT,
        "UNIQUE_EMAIL",
        Some("Email already exists"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_register_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    // Not an email
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "N", "email": "not-an-email", "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        Some("Invalid email address"),
    )
    .await;

    // Password too short
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "N", "email": unique_email("short"), "password": "pw12345"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        Some("Password must be at least 8 characters"),
    )
    .await;

    // Empty name
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "  ", "email": unique_email("noname"), "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        Some("Name cannot be empty"),
    )
    .await;

    // Unknown role value fails body parsing
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "N",
            "email": unique_email("role"),
            "password": "pw123456",
            "role": "SUPERUSER"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;

    Ok(())
}

#[actix_web::test]
async fn test_register_rejects_malformed_json() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        Some("Invalid JSON"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn test_login_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("login");
    let (user, _) = register_user(&app, "Login User", &email, "pw123456", None).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email, "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["id"], user["id"]);
    assert!(body["data"]["user"].get("password_hash").is_none());

    // The token asserts the same subject as registration did
    let token = body["data"]["token"].as_str().unwrap();
    let security = SecurityConfig::new(TEST_SECRET.as_bytes());
    let identity = verify_access_token(token, &security)?;
    assert_eq!(identity.subject_id, user["id"].as_i64().unwrap());

    Ok(())
}

#[actix_web::test]
async fn test_login_email_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("case");
    register_user(&app, "Case User", &email, "pw123456", None).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email.to_uppercase(), "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[actix_web::test]
async fn test_login_wrong_password_and_unknown_email_look_identical(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_sqlite_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("wrongpw");
    register_user(&app, "User", &email, "pw123456", None).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email, "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_CREDENTIALS",
        Some("Invalid email or password"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": unique_email("nobody"), "password": "pw123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_CREDENTIALS",
        Some("Invalid email or password"),
    )
    .await;

    Ok(())
}
