use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use parkline_core::types::DbId;
use sqlx::PgPool;
use tower::ServiceExt;

use parkline_api::config::{LogFormat, ServerConfig};
use parkline_api::router::build_app_router;
use parkline_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        db_acquire_timeout_secs: 5,
        db_statement_timeout_ms: 10_000,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router, with the production middleware
/// stack, on the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    actor: Option<DbId>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-actor-id", actor.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    actor: Option<DbId>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, actor, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    actor: Option<DbId>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, actor, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str, actor: Option<DbId>) -> Response<Body> {
    send(app, Method::POST, uri, actor, None).await
}

pub async fn delete(app: Router, uri: &str, actor: Option<DbId>) -> Response<Body> {
    send(app, Method::DELETE, uri, actor, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of a seeded company, user and the user's vehicle.
pub struct Accounts {
    pub company_id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
}

pub async fn seed_accounts(pool: &PgPool) -> Accounts {
    let (company_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO company (name, phone_number, email) \
         VALUES ('Harbor Parking', '0900000001', 'ops@harbor.test') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let (user_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO users (full_name, phone_number) VALUES ('Rider', '0922222222') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let (vehicle_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO vehicle (user_id, vehicle_name, license_plate, vehicle_type) \
         VALUES ($1, 'Scooter', '59X1-678.90', 'motorbike') RETURNING id",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();

    Accounts {
        company_id,
        user_id,
        vehicle_id,
    }
}

/// Parse a JSON string field as an id.
pub fn id_of(value: &serde_json::Value) -> DbId {
    value.as_str().unwrap().parse().unwrap()
}
