//! Integration tests for the account endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::TestApp;

const NEW_USER: &str = "jane@example.com";
const PASSWORD: &str = "correct-horse";

/// Sign up the default account and return its bearer token
macro_rules! signup_token {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({ "email": NEW_USER, "password": PASSWORD }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_signup_returns_token_and_mails_code() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": "Jane@Example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], NEW_USER);
    assert_eq!(body["data"]["emailVerified"], false);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert!(ctx.mail.last_code_for(NEW_USER).is_some());
}

#[actix_web::test]
async fn test_duplicate_signup_conflicts() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);
    signup_token!(app);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": NEW_USER, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "duplicate_account");
}

#[actix_web::test]
async fn test_signup_validation() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": "not-an-email", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["email"].is_string());
    assert!(body["details"]["password"].is_string());
}

#[actix_web::test]
async fn test_malformed_json_is_validation_error() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn test_login_with_wrong_password() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);
    signup_token!(app);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": NEW_USER, "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[actix_web::test]
async fn test_onboarding_flow() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);
    let token = signup_token!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    // Profile completion needs a verified email
    let req = test::TestRequest::post()
        .uri("/api/auth/complete-profile")
        .insert_header(auth.clone())
        .set_json(json!({ "firstName": "Jane", "lastName": "Doe", "phoneNumber": "+38640123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let code = ctx.mail.last_code_for(NEW_USER).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .insert_header(auth.clone())
        .set_json(json!({ "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["emailVerified"], true);

    let req = test::TestRequest::post()
        .uri("/api/auth/complete-profile")
        .insert_header(auth.clone())
        .set_json(json!({ "firstName": "Jane", "lastName": "Doe", "phoneNumber": "+38640123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["firstName"], "Jane");
    assert_eq!(body["data"]["profileCompleted"], true);
    assert!(body["data"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_resend_after_verification_conflicts() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);
    let token = signup_token!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    let code = ctx.mail.last_code_for(NEW_USER).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-email")
        .insert_header(auth.clone())
        .set_json(json!({ "code": code }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-verification")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "already_verified");
}

#[actix_web::test]
async fn test_forgot_password_for_unknown_email_is_silent() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/forgot-password")
        .set_json(json!({ "email": "nobody@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.mail.sent_count(), 0);
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let ctx = TestApp::new().await;
    let app = init_app!(ctx);
    signup_token!(app);

    let req = test::TestRequest::post()
        .uri("/api/auth/forgot-password")
        .set_json(json!({ "email": NEW_USER }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = ctx.mail.last_code_for(NEW_USER).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "email": NEW_USER, "code": code, "newPassword": "brand-new-pass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": NEW_USER, "password": "brand-new-pass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The code is single use
    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "email": NEW_USER, "code": code, "newPassword": "another-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_code");
}

#[actix_web::test]
async fn test_signup_survives_mail_outage() {
    let ctx = TestApp::new().await;
    ctx.mail.set_simulate_failure(true);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": NEW_USER, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
}
