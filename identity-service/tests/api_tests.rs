mod common;

use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["role"], "USER");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let response = app
        .post("/auth/register")
        .json(&json!({ "username": "nicola", "password": "another_pass" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({ "username": "n", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let app = TestApp::spawn().await;

    let first = app
        .post("/auth/register")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send();
    let second = app
        .post("/auth/register")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send();

    let (first, second) = tokio::join!(first, second);
    let mut statuses = [
        first.expect("Failed to execute request").status(),
        second.expect("Failed to execute request").status(),
    ];
    statuses.sort_by_key(|s| s.as_u16());

    // Exactly one winner, never two silent successes.
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_login_returns_token_accepted_on_protected_route() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;
    let token = app.login("nicola", "pass_word!").await;

    // Compact three-segment wire format, opaque to the caller.
    assert_eq!(token.split('.').count(), 3);
    assert!(app.token_codec.validate(&token, "nicola"));

    let response = app
        .get("/auth/me")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["role"], "USER");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let wrong_password = app
        .post("/auth/login")
        .json(&json!({ "username": "nicola", "password": "wrong_pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/auth/login")
        .json(&json!({ "username": "nobody", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Identical bodies: the response must not leak whether the username
    // exists.
    let wrong_password: serde_json::Value =
        wrong_password.json().await.expect("Failed to parse response");
    let unknown_user: serde_json::Value =
        unknown_user.json().await.expect("Failed to parse response");
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_public_path_bypasses_identity_resolution() {
    let app = TestApp::spawn().await;

    // Unparseable body, no Authorization header: the request dies in the
    // handler's extractor, but only after the gate waved it through
    // without a single store lookup.
    let response = app
        .post("/auth/login")
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.repository.lookups(), 0);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_non_bearer_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me")
        .header("Authorization", "Basic bmljb2xhOnBhc3M=")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // A non-Bearer header never reaches token parsing or resolution.
    assert_eq!(app.repository.lookups(), 0);
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me")
        .bearer_auth("definitely.not.ajwt")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    // Correctly signed, matching subject, already expired.
    let expired = app
        .token_codec
        .mint("nicola", Duration::seconds(-60))
        .expect("Failed to mint token");

    let response = app
        .get("/auth/me")
        .bearer_auth(&expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_foreign_secret_token() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let foreign = auth::TokenCodec::new(b"some-other-secret-key-of-32-bytes-minimum")
        .mint("nicola", Duration::hours(1))
        .expect("Failed to mint token");

    let response = app
        .get("/auth/me")
        .bearer_auth(&foreign)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_tampered_signature() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;
    let token = app.login("nicola", "pass_word!").await;

    let signature_start = token.rfind('.').unwrap() + 1;
    let flip_at = signature_start + (token.len() - signature_start) / 2;
    let mut bytes = token.into_bytes();
    bytes[flip_at] = if bytes[flip_at] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let response = app
        .get("/auth/me")
        .bearer_auth(&tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_token_for_unknown_subject() {
    let app = TestApp::spawn().await;

    // Authentic token whose subject was never registered: signature and
    // expiry pass, resolution does not.
    let orphaned = app
        .token_codec
        .mint("ghost_user", Duration::hours(1))
        .expect("Failed to mint token");

    let response = app
        .get("/auth/me")
        .bearer_auth(&orphaned)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
