/// Router-level tests
///
/// These exercise the middleware stack and authorization gates without a
/// running database: the pool is lazy and every asserted path rejects the
/// request before any query runs.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use projectflow_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig},
};
use projectflow_shared::auth::jwt;
use projectflow_shared::models::user::UserRole;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "router-test-secret-key-32-bytes-min!";

fn test_router() -> Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            // Nothing listens on port 1; queries fail instead of hanging.
            url: "postgres://127.0.0.1:1/projectflow_test".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
        },
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    build_router(AppState::new(pool, config))
}

fn bearer(role: UserRole) -> String {
    let claims = jwt::Claims::new(Uuid::new_v4(), role, jwt::TokenType::Access);
    let token = jwt::create_token(&claims, SECRET).expect("token");
    format!("Bearer {}", token)
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_unauthorized() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/tasks")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_authorization_is_bad_request() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/dashboard")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_token_is_rejected_on_protected_routes() {
    let app = test_router();

    let claims = jwt::Claims::new(Uuid::new_v4(), UserRole::Admin, jwt::TokenType::Refresh);
    let token = jwt::create_token(&claims, SECRET).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/users")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn collaborator_cannot_create_projects() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/projects")
                .header(header::AUTHORIZATION, bearer(UserRole::Collaborator))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Forbidden project"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn collaborator_cannot_delete_projects() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/projects/{}", Uuid::new_v4()))
                .header(header::AUTHORIZATION, bearer(UserRole::Collaborator))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn refresh_with_invalid_token_is_unauthorized() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"refresh_token": "expired.or.garbage"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_with_bad_email_is_unprocessable() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"name": "Ana", "email": "not-an-email", "password": "SecureP@ss123"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_with_weak_password_is_unprocessable() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"name": "Ana", "email": "ana@example.com", "password": "alllowercase1"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
