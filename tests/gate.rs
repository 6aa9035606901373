//! End-to-end exercises of the authentication gate and the admission table,
//! driven through a full app instance over the in-memory user store.

mod common;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{seed_user, set_test_secret, MemoryUserStore, TEST_JWT_SECRET};
use taskhub::auth::{issue_token, AuthGate, Claims};
use taskhub::models::UserRole;
use taskhub::routes;
use taskhub::store::UserStore;

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// A token that is correctly signed under the test secret but whose expiry
/// has already passed.
fn expired_token(subject: &str) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &Claims {
            sub: subject.to_string(),
            iat: now - 7200,
            exp: now - 3600,
        },
        &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

macro_rules! gated_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::clone(&$store) as Arc<dyn UserStore>))
                .service(web::scope("/api").wrap(AuthGate).configure(routes::config)),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_admin_route_without_header_is_unauthenticated() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    let app = gated_app!(store);

    let req = test::TestRequest::get().uri("/api/admin/users").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_admin_route_with_employee_token_is_forbidden() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Worker", "worker@example.com", "Password123!", UserRole::Employee).await;
    let app = gated_app!(store);

    let token = issue_token("worker@example.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Authenticated but under-privileged: 403, not 401.
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_employee_route_with_admin_token_is_forbidden() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Boss", "boss@example.com", "Password123!", UserRole::Admin).await;
    let app = gated_app!(store);

    let token = issue_token("boss@example.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/employee/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_admin_route_with_admin_token_succeeds() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Boss", "boss@example.com", "Password123!", UserRole::Admin).await;
    seed_user(&store, "Worker", "worker@example.com", "Password123!", UserRole::Employee).await;
    let app = gated_app!(store);

    let token = issue_token("boss@example.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    // Only employees are listed, without password material.
    let body: serde_json::Value = test::read_body_json(resp).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["email"], "worker@example.com");
    assert!(listed[0].get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_public_route_ignores_garbage_bearer_header() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Worker", "worker@example.com", "Password123!", UserRole::Employee).await;
    let app = gated_app!(store);

    // A nonsense token must not prevent the login route from being served.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(bearer("xyz"))
        .set_json(json!({
            "email": "worker@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[test_log::test(actix_rt::test)]
async fn test_expired_token_is_treated_as_unauthenticated() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Worker", "worker@example.com", "Password123!", UserRole::Employee).await;
    let app = gated_app!(store);

    let req = test::TestRequest::get()
        .uri("/api/employee/tasks")
        .insert_header(bearer(&expired_token("worker@example.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // The account exists and the signature is fine, but the token is dead:
    // same outcome as sending no token at all.
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_stale_subject_is_treated_as_unauthenticated() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Worker", "worker@example.com", "Password123!", UserRole::Employee).await;
    let app = gated_app!(store);

    let token = issue_token("worker@example.com").unwrap();
    store.remove("worker@example.com");

    let req = test::TestRequest::get()
        .uri("/api/employee/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_gate_applied_twice_is_idempotent() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    seed_user(&store, "Boss", "boss@example.com", "Password123!", UserRole::Admin).await;

    // Deliberately double-wrapped: the second pass must find the principal
    // already attached and leave it alone.
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&store) as Arc<dyn UserStore>))
            .service(
                web::scope("/api")
                    .wrap(AuthGate)
                    .wrap(AuthGate)
                    .configure(routes::config),
            ),
    )
    .await;

    let token = issue_token("boss@example.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_malformed_header_on_protected_route_is_unauthenticated() {
    set_test_secret();
    let store = Arc::new(MemoryUserStore::new());
    let app = gated_app!(store);

    for value in ["Bearer", "Bearer ", "Basic dXNlcjpwYXNz", "bearer abc"] {
        let req = test::TestRequest::get()
            .uri("/api/admin/users")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "header {:?} should leave the request unauthenticated",
            value
        );
    }
}
