use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use validator::Validate;

use crate::entities::{booking, guest};
use crate::error::{AppError, AppResult};
use crate::handlers::{deleted, AppJson};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuestRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub notes: Option<String>,
}

pub async fn list_guests(State(state): State<AppState>) -> AppResult<Json<Vec<guest::Model>>> {
    let guests = guest::Entity::find()
        .order_by_asc(guest::Column::LastName)
        .order_by_asc(guest::Column::FirstName)
        .all(&state.db)
        .await?;
    Ok(Json(guests))
}

pub async fn get_guest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<guest::Model>> {
    let guest = guest::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Guest not found".to_string()))?;
    Ok(Json(guest))
}

pub async fn create_guest(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateGuestRequest>,
) -> AppResult<(StatusCode, Json<guest::Model>)> {
    payload.validate()?;

    let guest = guest::ActiveModel {
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        address: Set(payload.address),
        city: Set(payload.city),
        country: Set(payload.country),
        id_type: Set(payload.id_type),
        id_number: Set(payload.id_number),
        notes: Set(payload.notes),
        ..Default::default()
    };

    let result = guest.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn update_guest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateGuestRequest>,
) -> AppResult<Json<guest::Model>> {
    payload.validate()?;

    let guest = guest::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Guest not found".to_string()))?;

    let mut active: guest::ActiveModel = guest.into();

    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(city) = payload.city {
        active.city = Set(Some(city));
    }
    if let Some(country) = payload.country {
        active.country = Set(Some(country));
    }
    if let Some(id_type) = payload.id_type {
        active.id_type = Set(Some(id_type));
    }
    if let Some(id_number) = payload.id_number {
        active.id_number = Set(Some(id_number));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

/// Delete a guest. Guests that still have bookings are refused.
pub async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::GuestId.eq(id))
        .count(&state.db)
        .await?;
    if bookings > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete guest with existing bookings".to_string(),
        ));
    }

    let result = guest::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Guest not found".to_string()));
    }

    Ok(Json(deleted("Guest")))
}
