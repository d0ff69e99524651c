//! Booking lifecycle: create, update, cancel and delete, keeping prices and
//! room status consistent with the bookings that hold each room.
//!
//! Create and update run in one transaction that starts by locking the
//! affected room rows (`SELECT ... FOR UPDATE`). Two requests for the same
//! room therefore run their availability check one after the other, and the
//! second one sees the first one's booking.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::booking::{self, BookingStatus, PaymentStatus};
use crate::entities::{guest, room};
use crate::error::{AppError, AppResult};
use crate::services::{availability, room_status};
use crate::utils::pricing::{compute_price, ensure_valid_stay};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub guest_id: i32,
    pub room_id: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub number_of_guests: Option<i32>,
    pub payment_status: Option<PaymentStatus>,
    pub booking_status: Option<BookingStatus>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    pub special_requests: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub booking_reference: Option<String>,
}

/// Partial update. `bookingReference` and `totalPrice` are not accepted:
/// the first is fixed at creation, the second is always derived.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub guest_id: Option<i32>,
    pub room_id: Option<i32>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub number_of_guests: Option<i32>,
    pub payment_status: Option<PaymentStatus>,
    pub booking_status: Option<BookingStatus>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    pub special_requests: Option<String>,
}

impl UpdateBookingRequest {
    fn touches_schedule(&self) -> bool {
        self.check_in_date.is_some() || self.check_out_date.is_some() || self.room_id.is_some()
    }
}

/// A booking joined with its guest and room.
#[derive(Debug, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub guest: Option<guest::Model>,
    pub room: Option<room::Model>,
}

pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<BookingDetails>> {
    let bookings = booking::Entity::find()
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?;

    Ok(attach_details(db, bookings).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<BookingDetails> {
    let booking = booking::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    details(db, booking).await
}

pub async fn list_by_guest(db: &DatabaseConnection, guest_id: i32) -> AppResult<Vec<BookingDetails>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::GuestId.eq(guest_id))
        .order_by_asc(booking::Column::CheckInDate)
        .all(db)
        .await?;

    Ok(attach_details(db, bookings).await?)
}

pub async fn create(db: &DatabaseConnection, request: CreateBookingRequest) -> AppResult<BookingDetails> {
    request.validate()?;
    ensure_valid_stay(request.check_in_date, request.check_out_date)?;

    let txn = db.begin().await?;

    let room = room::Entity::find_by_id(request.room_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    guest::Entity::find_by_id(request.guest_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Guest not found".to_string()))?;

    let conflicts = availability::find_conflicts(
        &txn,
        room.id,
        request.check_in_date,
        request.check_out_date,
        None,
    )
    .await?;

    if !conflicts.is_empty() {
        tracing::warn!(
            room_id = room.id,
            check_in = %request.check_in_date,
            check_out = %request.check_out_date,
            conflicts = conflicts.len(),
            "Booking rejected: room not available"
        );
        return Err(AppError::room_unavailable(conflicts));
    }

    let total_price = compute_price(
        room.price_per_night,
        request.check_in_date,
        request.check_out_date,
    )?;

    let new_booking = booking::ActiveModel {
        guest_id: Set(request.guest_id),
        room_id: Set(room.id),
        check_in_date: Set(request.check_in_date),
        check_out_date: Set(request.check_out_date),
        number_of_guests: Set(request.number_of_guests.unwrap_or(1)),
        total_price: Set(total_price),
        payment_status: Set(request.payment_status.unwrap_or(PaymentStatus::Pending)),
        booking_status: Set(request.booking_status.unwrap_or(BookingStatus::Confirmed)),
        payment_method: Set(request.payment_method),
        special_requests: Set(request.special_requests),
        booking_reference: match request.booking_reference {
            Some(reference) if !reference.trim().is_empty() => Set(reference),
            _ => NotSet,
        },
        ..Default::default()
    };

    let booking = new_booking.insert(&txn).await?;
    room_status::mark_reserved(&txn, room.id).await?;
    txn.commit().await?;

    tracing::info!(
        booking_id = booking.id,
        reference = %booking.booking_reference,
        room_id = booking.room_id,
        total_price = %booking.total_price,
        "Booking created"
    );

    details(db, booking).await
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: UpdateBookingRequest,
) -> AppResult<BookingDetails> {
    patch.validate()?;

    let txn = db.begin().await?;

    let existing = booking::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let check_in = patch.check_in_date.unwrap_or(existing.check_in_date);
    let check_out = patch.check_out_date.unwrap_or(existing.check_out_date);
    let room_id = patch.room_id.unwrap_or(existing.room_id);
    let room_changed = room_id != existing.room_id;
    let status = patch.booking_status.unwrap_or(existing.booking_status);

    let mut rooms = lock_rooms(&txn, existing.room_id, room_id).await?;
    let target_room = rooms
        .remove(&room_id)
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    if let Some(guest_id) = patch.guest_id {
        guest::Entity::find_by_id(guest_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Guest not found".to_string()))?;
    }

    let mut active: booking::ActiveModel = existing.clone().into();

    if patch.touches_schedule() {
        ensure_valid_stay(check_in, check_out)?;
        active.total_price = Set(compute_price(target_room.price_per_night, check_in, check_out)?);
    }

    // A booking coming back from Cancelled or No Show claims the room again
    let reactivated = !existing.booking_status.is_active() && status.is_active();

    if (patch.touches_schedule() && status != BookingStatus::Cancelled) || reactivated {
        let conflicts =
            availability::find_conflicts(&txn, room_id, check_in, check_out, Some(existing.id))
                .await?;

        if !conflicts.is_empty() {
            tracing::warn!(
                booking_id = existing.id,
                room_id,
                check_in = %check_in,
                check_out = %check_out,
                conflicts = conflicts.len(),
                "Booking update rejected: room not available"
            );
            return Err(AppError::room_unavailable(conflicts));
        }

        if room_changed {
            room_status::mark_available(&txn, existing.room_id).await?;
            room_status::mark_reserved(&txn, room_id).await?;
        } else if reactivated {
            room_status::mark_reserved(&txn, room_id).await?;
        }
    }

    if status == BookingStatus::Cancelled && existing.booking_status != BookingStatus::Cancelled {
        room_status::mark_available(&txn, existing.room_id).await?;
    }

    if let Some(guest_id) = patch.guest_id {
        active.guest_id = Set(guest_id);
    }
    if patch.room_id.is_some() {
        active.room_id = Set(room_id);
    }
    if patch.check_in_date.is_some() {
        active.check_in_date = Set(check_in);
    }
    if patch.check_out_date.is_some() {
        active.check_out_date = Set(check_out);
    }
    if let Some(guests) = patch.number_of_guests {
        active.number_of_guests = Set(guests);
    }
    if let Some(payment_status) = patch.payment_status {
        active.payment_status = Set(payment_status);
    }
    if patch.booking_status.is_some() {
        active.booking_status = Set(status);
    }
    if let Some(method) = patch.payment_method {
        active.payment_method = Set(Some(method));
    }
    if let Some(requests) = patch.special_requests {
        active.special_requests = Set(Some(requests));
    }

    let updated = active.update(&txn).await?;
    txn.commit().await?;

    if updated.booking_status == BookingStatus::Cancelled
        && existing.booking_status != BookingStatus::Cancelled
    {
        tracing::info!(booking_id = updated.id, room_id = updated.room_id, "Booking cancelled");
    } else {
        tracing::info!(booking_id = updated.id, room_id = updated.room_id, "Booking updated");
    }

    details(db, updated).await
}

/// Delete a booking outright and release its room, whatever the booking's status.
pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let txn = db.begin().await?;

    // Booking row first, then its room: the same order `update` locks in.
    let booking = booking::Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    room_status::mark_available(&txn, booking.room_id).await?;
    booking::Entity::delete_by_id(booking.id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(booking_id = booking.id, room_id = booking.room_id, "Booking deleted");
    Ok(())
}

/// Lock the current and target rooms in ascending id order.
async fn lock_rooms<C: ConnectionTrait>(
    db: &C,
    current: i32,
    target: i32,
) -> Result<HashMap<i32, room::Model>, DbErr> {
    let mut ids = vec![current, target];
    ids.sort_unstable();
    ids.dedup();

    let mut rooms = HashMap::new();
    for id in ids {
        if let Some(room) = room::Entity::find_by_id(id).lock_exclusive().one(db).await? {
            rooms.insert(room.id, room);
        }
    }
    Ok(rooms)
}

async fn details<C: ConnectionTrait>(db: &C, booking: booking::Model) -> AppResult<BookingDetails> {
    let mut joined = attach_details(db, vec![booking]).await?;
    joined
        .pop()
        .ok_or_else(|| AppError::Internal("Booking vanished while loading details".to_string()))
}

/// Join bookings with their guests and rooms by id.
async fn attach_details<C: ConnectionTrait>(
    db: &C,
    bookings: Vec<booking::Model>,
) -> Result<Vec<BookingDetails>, DbErr> {
    let guest_ids: Vec<i32> = bookings.iter().map(|b| b.guest_id).collect();
    let room_ids: Vec<i32> = bookings.iter().map(|b| b.room_id).collect();

    let guests: HashMap<i32, guest::Model> = guest::Entity::find()
        .filter(guest::Column::Id.is_in(guest_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    let rooms: HashMap<i32, room::Model> = room::Entity::find()
        .filter(room::Column::Id.is_in(room_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

    Ok(bookings
        .into_iter()
        .map(|b| BookingDetails {
            guest: guests.get(&b.guest_id).cloned(),
            room: rooms.get(&b.room_id).cloned(),
            booking: b,
        })
        .collect())
}
