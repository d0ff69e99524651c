use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use validator::Validate;

use crate::entities::booking;
use crate::entities::room::{self, RoomImages, RoomStatus, RoomType};
use crate::error::{AppError, AppResult};
use crate::handlers::{deleted, AppJson};
use crate::services::availability;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub price_per_night: Decimal,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub status: Option<RoomStatus>,
    pub floor: Option<i32>,
    pub has_wifi: Option<bool>,
    #[serde(rename = "hasTV")]
    pub has_tv: Option<bool>,
    pub has_air_con: Option<bool>,
    pub has_balcony: Option<bool>,
    pub images: Option<Vec<String>>,
}

/// Partial room update. Setting `status` here is the manual override path.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub price_per_night: Option<Decimal>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub status: Option<RoomStatus>,
    pub floor: Option<i32>,
    pub has_wifi: Option<bool>,
    #[serde(rename = "hasTV")]
    pub has_tv: Option<bool>,
    pub has_air_con: Option<bool>,
    pub has_balcony: Option<bool>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}

fn ensure_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::BadRequest(
            "Price per night cannot be negative".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<Vec<room::Model>>> {
    let rooms = room::Entity::find()
        .order_by_asc(room::Column::RoomNumber)
        .all(&state.db)
        .await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<room::Model>> {
    let room = room::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
    Ok(Json(room))
}

/// Rooms free for the whole of `[checkInDate, checkOutDate]`
pub async fn available_rooms(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<room::Model>>> {
    let (Some(check_in), Some(check_out)) = (query.check_in_date, query.check_out_date) else {
        return Err(AppError::BadRequest(
            "Check-in and check-out dates are required".to_string(),
        ));
    };

    Ok(Json(availability::available_rooms(&state.db, check_in, check_out).await?))
}

pub async fn create_room(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<room::Model>)> {
    payload.validate()?;
    ensure_price(payload.price_per_night)?;

    let room = room::ActiveModel {
        room_number: Set(payload.room_number),
        room_type: Set(payload.room_type),
        price_per_night: Set(payload.price_per_night),
        capacity: Set(payload.capacity.unwrap_or(1)),
        description: Set(payload.description),
        status: Set(payload.status.unwrap_or(RoomStatus::Available)),
        floor: Set(payload.floor),
        has_wifi: Set(payload.has_wifi.unwrap_or(true)),
        has_tv: Set(payload.has_tv.unwrap_or(true)),
        has_air_con: Set(payload.has_air_con.unwrap_or(true)),
        has_balcony: Set(payload.has_balcony.unwrap_or(false)),
        images: Set(payload.images.map(RoomImages)),
        ..Default::default()
    };

    let result = room.insert(&state.db).await?;
    tracing::info!(room_id = result.id, room_number = %result.room_number, "Room created");
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRoomRequest>,
) -> AppResult<Json<room::Model>> {
    payload.validate()?;

    let room = room::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    let mut active: room::ActiveModel = room.into();

    if let Some(number) = payload.room_number {
        active.room_number = Set(number);
    }
    if let Some(room_type) = payload.room_type {
        active.room_type = Set(room_type);
    }
    if let Some(price) = payload.price_per_night {
        ensure_price(price)?;
        active.price_per_night = Set(price);
    }
    if let Some(capacity) = payload.capacity {
        active.capacity = Set(capacity);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(status) = payload.status {
        tracing::info!(room_id = id, status = ?status, "Room status set manually");
        active.status = Set(status);
    }
    if let Some(floor) = payload.floor {
        active.floor = Set(Some(floor));
    }
    if let Some(flag) = payload.has_wifi {
        active.has_wifi = Set(flag);
    }
    if let Some(flag) = payload.has_tv {
        active.has_tv = Set(flag);
    }
    if let Some(flag) = payload.has_air_con {
        active.has_air_con = Set(flag);
    }
    if let Some(flag) = payload.has_balcony {
        active.has_balcony = Set(flag);
    }
    if let Some(images) = payload.images {
        active.images = Set(Some(RoomImages(images)));
    }

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

/// Delete a room. Rooms still referenced by bookings are refused.
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::RoomId.eq(id))
        .count(&state.db)
        .await?;
    if bookings > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete room with existing bookings".to_string(),
        ));
    }

    let result = room::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Room not found".to_string()));
    }

    Ok(Json(deleted("Room")))
}
