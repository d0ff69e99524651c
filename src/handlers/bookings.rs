use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::handlers::{deleted, AppJson};
use crate::services::bookings::{self, BookingDetails, CreateBookingRequest, UpdateBookingRequest};
use crate::AppState;

/// List all bookings with their guest and room
pub async fn list_bookings(State(state): State<AppState>) -> AppResult<Json<Vec<BookingDetails>>> {
    Ok(Json(bookings::list_all(&state.db).await?))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    Ok(Json(bookings::get(&state.db, id).await?))
}

/// List a guest's bookings
pub async fn guest_bookings(
    State(state): State<AppState>,
    Path(guest_id): Path<i32>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    Ok(Json(bookings::list_by_guest(&state.db, guest_id).await?))
}

/// Create a booking if the room is free for the requested dates
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = bookings::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBookingRequest>,
) -> AppResult<Json<BookingDetails>> {
    Ok(Json(bookings::update(&state.db, id, payload).await?))
}

/// Delete a booking and release its room
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    bookings::delete(&state.db, id).await?;
    Ok(Json(deleted("Booking")))
}
