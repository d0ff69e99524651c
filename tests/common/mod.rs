#![allow(dead_code)]

use axum::Router;
use chrono::NaiveDate;
use hotel_management_backend::entities::{booking, guest, room};
use hotel_management_backend::services::bookings::CreateBookingRequest;
use hotel_management_backend::{routes, AppState};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set};

/// Fresh in-memory database with the full schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn test_app(db: DatabaseConnection) -> Router {
    routes::create_router(AppState { db })
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub async fn seed_guest(db: &DatabaseConnection, email: &str) -> guest::Model {
    guest::ActiveModel {
        first_name: Set("Ada".to_string()),
        last_name: Set("Lovelace".to_string()),
        email: Set(email.to_string()),
        phone: Set("+44 20 7946 0000".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed guest")
}

pub async fn seed_room(db: &DatabaseConnection, number: &str, rate: i64) -> room::Model {
    room::ActiveModel {
        room_number: Set(number.to_string()),
        room_type: Set(room::RoomType::Double),
        price_per_night: Set(Decimal::from(rate)),
        capacity: Set(2),
        status: Set(room::RoomStatus::Available),
        has_wifi: Set(true),
        has_tv: Set(true),
        has_air_con: Set(true),
        has_balcony: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed room")
}

pub fn booking_request(
    guest_id: i32,
    room_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> CreateBookingRequest {
    CreateBookingRequest {
        guest_id,
        room_id,
        check_in_date: check_in,
        check_out_date: check_out,
        number_of_guests: Some(2),
        payment_status: None,
        booking_status: None,
        payment_method: None,
        special_requests: None,
        booking_reference: None,
    }
}

pub async fn room_status(db: &DatabaseConnection, room_id: i32) -> room::RoomStatus {
    room::Entity::find_by_id(room_id)
        .one(db)
        .await
        .unwrap()
        .expect("room exists")
        .status
}

pub async fn all_bookings(db: &DatabaseConnection) -> Vec<booking::Model> {
    booking::Entity::find().all(db).await.unwrap()
}
