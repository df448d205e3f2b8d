//! Shared fixtures for the repository and service integration tests.

use chrono::{Duration, Utc};
use parkline_core::types::DbId;
use parkline_db::models::block::{BlockWithSlots, CreateBlock};
use parkline_db::models::parking_lot::{CreateParkingLot, ParkingLot};
use parkline_db::models::ticket::CreateTicket;
use parkline_db::models::time_frame::{CreateTimeFrame, TimeFrame};
use parkline_db::repositories::ParkingLotRepo;
use parkline_db::services::LayoutService;
use sqlx::PgPool;

/// Ids of a company, a user and the user's vehicle.
pub struct Accounts {
    pub company_id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
}

/// A parking lot with one block (and its slots) and one time frame.
pub struct Layout {
    pub parking_lot: ParkingLot,
    pub block: BlockWithSlots,
    pub time_frame: TimeFrame,
}

pub async fn seed_accounts(pool: &PgPool) -> Accounts {
    let (company_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO company (name, phone_number, email) \
         VALUES ('Central Parking', '0900000000', 'ops@central.test') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let (user_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO users (full_name, phone_number) VALUES ('Driver', '0911111111') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let (vehicle_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO vehicle (user_id, vehicle_name, license_plate, vehicle_type) \
         VALUES ($1, 'Sedan', '51A-123.45', 'car') RETURNING id",
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

pub async fn create_parking_lot(pool: &PgPool, company_id: DbId, name: &str) -> ParkingLot {
    let input = CreateParkingLot {
        company_id,
        name: name.to_string(),
        description: Some("downtown".to_string()),
        address: Some("1 Main St".to_string()),
        start_time: None,
        end_time: None,
        lat: Some(10.77),
        long: Some(106.7),
    };
    ParkingLotRepo::create(pool, &input, DbId::new_v4())
        .await
        .unwrap()
}

pub async fn create_block(
    pool: &PgPool,
    parking_lot_id: DbId,
    code: &str,
    slot: i32,
) -> BlockWithSlots {
    let input = CreateBlock {
        code: code.to_string(),
        description: format!("block {code}"),
        slot,
    };
    LayoutService::create_block(pool, parking_lot_id, &input)
        .await
        .unwrap()
}

pub async fn create_time_frame(pool: &PgPool, parking_lot_id: DbId, duration: i32) -> TimeFrame {
    let input = CreateTimeFrame {
        duration,
        cost: f64::from(duration) * 100.0,
    };
    LayoutService::create_time_frame(pool, parking_lot_id, &input)
        .await
        .unwrap()
}

pub async fn seed_layout(pool: &PgPool, company_id: DbId) -> Layout {
    let parking_lot = create_parking_lot(pool, company_id, "Central").await;
    let block = create_block(pool, parking_lot.id, "A", 3).await;
    let time_frame = create_time_frame(pool, parking_lot.id, 60).await;
    Layout {
        parking_lot,
        block,
        time_frame,
    }
}

/// A two-hour booking of the first slot of the layout's block.
pub fn booking(accounts: &Accounts, layout: &Layout) -> CreateTicket {
    let start = Utc::now() + Duration::hours(1);
    CreateTicket {
        user_id: accounts.user_id,
        vehicle_id: accounts.vehicle_id,
        parking_lot_id: layout.parking_lot.id,
        parking_slot_id: layout.block.parking_slots[0].id,
        time_frame_id: layout.time_frame.id,
        start_time: start,
        end_time: start + Duration::hours(2),
        total: 20_000.0,
        is_long_term: false,
        booking_type: None,
    }
}
