//! Integration tests for slot provisioning on block creation.

mod common;

use assert_matches::assert_matches;
use parkline_core::error::CoreError;
use parkline_core::types::DbId;
use parkline_db::error::DbError;
use parkline_db::models::block::{CreateBlock, UpdateBlock};
use parkline_db::repositories::{BlockRepo, ParkingSlotRepo};
use parkline_db::services::LayoutService;
use sqlx::PgPool;

fn names(slots: &[parkline_db::models::parking_slot::ParkingSlot]) -> Vec<&str> {
    slots.iter().map(|s| s.name.as_str()).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_with_three_slots_gets_named_slots(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let lot = common::create_parking_lot(&pool, accounts.company_id, "Provisioning").await;

    let block = common::create_block(&pool, lot.id, "A", 3).await;

    assert_eq!(names(&block.parking_slots), vec!["1", "2", "3"]);
    assert!(block
        .parking_slots
        .iter()
        .all(|s| s.block_id == block.block.id));

    let persisted = ParkingSlotRepo::list_by_block(&pool, block.block.id)
        .await
        .unwrap();
    assert_eq!(names(&persisted), vec!["1", "2", "3"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_slots_sort_numerically(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let lot = common::create_parking_lot(&pool, accounts.company_id, "Wide").await;

    let block = common::create_block(&pool, lot.id, "W", 12).await;

    let persisted = ParkingSlotRepo::list_by_block(&pool, block.block.id)
        .await
        .unwrap();
    assert_eq!(persisted.len(), 12);
    assert_eq!(persisted[1].name, "2");
    assert_eq!(persisted[9].name, "10");
    assert_eq!(persisted[11].name, "12");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zero_capacity_provisions_nothing(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let lot = common::create_parking_lot(&pool, accounts.company_id, "Empty").await;

    let block = common::create_block(&pool, lot.id, "Z", 0).await;

    assert!(block.parking_slots.is_empty());
    let persisted = ParkingSlotRepo::list_by_block(&pool, block.block.id)
        .await
        .unwrap();
    assert!(persisted.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_does_not_reprovision(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let lot = common::create_parking_lot(&pool, accounts.company_id, "Grow").await;
    let block = common::create_block(&pool, lot.id, "G", 2).await;

    let update = UpdateBlock {
        code: None,
        description: Some("expanded".to_string()),
        slot: Some(5),
    };
    let updated = BlockRepo::update(&pool, block.block.id, &update)
        .await
        .unwrap()
        .expect("block should exist");
    assert_eq!(updated.slot, 5);
    assert_eq!(updated.code, "G");

    let persisted = ParkingSlotRepo::list_by_block(&pool, block.block.id)
        .await
        .unwrap();
    assert_eq!(names(&persisted), vec!["1", "2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_under_missing_parking_lot_is_not_found(pool: PgPool) {
    let input = CreateBlock {
        code: "X".to_string(),
        description: String::new(),
        slot: 2,
    };

    let result = LayoutService::create_block(&pool, DbId::new_v4(), &input).await;

    assert_matches!(
        result,
        Err(DbError::Core(CoreError::NotFound {
            entity: "ParkingLot",
            ..
        }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_block_returns_slots(pool: PgPool) {
    let accounts = common::seed_accounts(&pool).await;
    let lot = common::create_parking_lot(&pool, accounts.company_id, "Lookup").await;
    let block = common::create_block(&pool, lot.id, "L", 2).await;

    let found = LayoutService::find_block(&pool, block.block.id).await.unwrap();

    assert_eq!(found.block.code, "L");
    assert_eq!(names(&found.parking_slots), vec!["1", "2"]);
}
