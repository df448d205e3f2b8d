//! HTTP tests for the ticket lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, id_of, post_empty, post_json, Accounts};
use parkline_core::types::DbId;
use serde_json::{json, Value};
use sqlx::PgPool;

/// Ids of a parking lot with one two-slot block and one time frame.
struct Layout {
    parking_lot_id: DbId,
    slot_id: DbId,
    time_frame_id: DbId,
}

async fn seed_layout(pool: &PgPool, accounts: &Accounts) -> Layout {
    let actor = Some(accounts.user_id);
    let lot = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/parking-lots",
            actor,
            json!({ "company_id": accounts.company_id, "name": "Riverside" }),
        )
        .await,
    )
    .await;
    let parking_lot_id = id_of(&lot["data"]["id"]);

    let block = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/parking-lots/{parking_lot_id}/blocks"),
            actor,
            json!({ "code": "A", "slot": 2 }),
        )
        .await,
    )
    .await;
    let time_frame = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/parking-lots/{parking_lot_id}/time-frames"),
            actor,
            json!({ "duration": 60, "cost": 15000.0 }),
        )
        .await,
    )
    .await;

    Layout {
        parking_lot_id,
        slot_id: id_of(&block["data"]["parking_slots"][0]["id"]),
        time_frame_id: id_of(&time_frame["data"]["id"]),
    }
}

fn booking(accounts: &Accounts, layout: &Layout) -> Value {
    json!({
        "user_id": accounts.user_id,
        "vehicle_id": accounts.vehicle_id,
        "parking_lot_id": layout.parking_lot_id,
        "parking_slot_id": layout.slot_id,
        "time_frame_id": layout.time_frame_id,
        "start_time": "2030-01-01T08:00:00Z",
        "end_time": "2030-01-01T10:00:00Z",
        "total": 30000.0
    })
}

async fn book(pool: &PgPool, accounts: &Accounts, layout: &Layout) -> DbId {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tickets",
        Some(accounts.user_id),
        booking(accounts, layout),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    id_of(&body_json(response).await["data"]["id"])
}

async fn procedure(
    pool: &PgPool,
    actor: DbId,
    ticket_id: DbId,
    kind: &str,
) -> (StatusCode, Value) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tickets/procedure",
        Some(actor),
        json!({ "ticket_id": ticket_id, "type": kind }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn review(pool: &PgPool, actor: DbId, ticket_id: DbId) -> (StatusCode, Value) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tickets/{ticket_id}/review"),
        Some(actor),
        json!({ "is_good_review": true, "comment": "easy in, easy out" }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_goes_from_booking_to_review(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let ticket_id = book(&pool, &accounts, &layout).await;

    let (status, json) = review(&pool, accounts.user_id, ticket_id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "ticket is not yet completed");

    let (status, json) = procedure(&pool, accounts.user_id, ticket_id, "check_in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["state"], "ongoing");
    assert!(json["data"]["entry_time"].is_string());

    let (status, json) = procedure(&pool, accounts.user_id, ticket_id, "check_out").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["state"], "completed");
    assert!(json["data"]["exit_time"].is_string());

    let (status, json) = review(&pool, accounts.user_id, ticket_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["is_good_review"], true);
    assert_eq!(json["data"]["comment"], "easy in, easy out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_out_from_new_is_conflict(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let ticket_id = book(&pool, &accounts, &layout).await;

    let (status, json) = procedure(&pool, accounts.user_id, ticket_id, "check_out").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_is_idempotent(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let ticket_id = book(&pool, &accounts, &layout).await;
    let uri = format!("/api/v1/tickets/{ticket_id}/cancel");

    for _ in 0..2 {
        let response =
            post_empty(common::build_test_app(pool.clone()), &uri, Some(accounts.user_id)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["state"], "cancel");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn extend_creates_linked_ticket(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let ticket_id = book(&pool, &accounts, &layout).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tickets/extend",
        Some(accounts.user_id),
        json!({
            "ticket_origin_id": ticket_id,
            "start_time": "2030-01-01T10:00:00Z",
            "end_time": "2030-01-01T11:00:00Z",
            "time_frame_id": layout.time_frame_id,
            "total": 15000.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["original"]["is_extend"], true);
    assert_eq!(data["extension"]["state"], "extend");
    assert_eq!(data["extension"]["parking_slot_id"], layout.slot_id.to_string());
    let extension_id = data["extension"]["id"].clone();

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/tickets/{ticket_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["ticket"]["is_extend"], true);
    assert_eq!(data["ticket_extends"].as_array().unwrap().len(), 1);
    assert_eq!(data["ticket_extends"][0]["ticket_extend_id"], extension_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inverted_window_is_bad_request(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let mut body = booking(&accounts, &layout);
    body["end_time"] = json!("2030-01-01T07:00:00Z");

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/tickets",
        Some(accounts.user_id),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_ticket_is_not_found(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/tickets/{}", DbId::new_v4()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_actor_header_is_unauthorized(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let ticket_id = book(&pool, &accounts, &layout).await;

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri(format!("/api/v1/tickets/{ticket_id}/cancel"))
        .header("x-actor-id", "not-a-uuid")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(common::build_test_app(pool), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn merchant_listing_filters_by_state(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    let active = book(&pool, &accounts, &layout).await;
    let cancelled = book(&pool, &accounts, &layout).await;
    post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tickets/{cancelled}/cancel"),
        Some(accounts.user_id),
    )
    .await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!(
            "/api/v1/merchant/tickets?parking_lot_id={}&state=new",
            layout.parking_lot_id
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    let tickets = data.as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["id"], active.to_string());
    assert_eq!(tickets[0]["vehicle"]["license_plate"], "59X1-678.90");
    assert_eq!(tickets[0]["parking_slot"]["name"], "1");
    assert_eq!(tickets[0]["parking_slot"]["block"]["code"], "A");

    let response = get(common::build_test_app(pool), "/api/v1/merchant/tickets").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_listing_filters_by_user(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let layout = seed_layout(&pool, &accounts).await;
    book(&pool, &accounts, &layout).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tickets?user_id={}", accounts.user_id),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/tickets?user_id={}", DbId::new_v4()),
    )
    .await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}
