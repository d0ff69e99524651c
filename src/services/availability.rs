use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::booking::{self, BookingStatus};
use crate::entities::room::{self, RoomStatus};
use crate::error::AppResult;
use crate::utils::overlap::stays_overlap;
use crate::utils::pricing::ensure_valid_stay;

/// Active bookings on `room_id` whose stay collides with the requested one.
///
/// `exclude_booking_id` lets an update ignore the booking being edited.
pub async fn find_conflicts<C: ConnectionTrait>(
    db: &C,
    room_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_booking_id: Option<i32>,
) -> Result<Vec<booking::Model>, DbErr> {
    let mut query = booking::Entity::find()
        .filter(booking::Column::RoomId.eq(room_id))
        .filter(booking::Column::BookingStatus.is_not_in(BookingStatus::INACTIVE))
        .filter(
            Condition::any()
                .add(booking::Column::CheckInDate.between(check_in, check_out))
                .add(booking::Column::CheckOutDate.between(check_in, check_out))
                .add(
                    Condition::all()
                        .add(booking::Column::CheckInDate.lte(check_in))
                        .add(booking::Column::CheckOutDate.gte(check_out)),
                ),
        );

    if let Some(id) = exclude_booking_id {
        query = query.filter(booking::Column::Id.ne(id));
    }

    query.order_by_asc(booking::Column::CheckInDate).all(db).await
}

pub async fn is_available<C: ConnectionTrait>(
    db: &C,
    room_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_booking_id: Option<i32>,
) -> Result<bool, DbErr> {
    let conflicts = find_conflicts(db, room_id, check_in, check_out, exclude_booking_id).await?;
    Ok(conflicts.is_empty())
}

/// Rooms with no active booking colliding with the given stay.
/// Rooms under maintenance are never offered.
pub async fn available_rooms<C: ConnectionTrait>(
    db: &C,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> AppResult<Vec<room::Model>> {
    ensure_valid_stay(check_in, check_out)?;

    let rooms = room::Entity::find()
        .filter(room::Column::Status.ne(RoomStatus::Maintenance))
        .order_by_asc(room::Column::RoomNumber)
        .all(db)
        .await?;

    let bookings = booking::Entity::find()
        .filter(booking::Column::BookingStatus.is_not_in(BookingStatus::INACTIVE))
        .filter(booking::Column::CheckInDate.lte(check_out))
        .filter(booking::Column::CheckOutDate.gte(check_in))
        .all(db)
        .await?;

    let available = rooms
        .into_iter()
        .filter(|r| {
            !bookings.iter().any(|b| {
                b.room_id == r.id
                    && stays_overlap(b.check_in_date, b.check_out_date, check_in, check_out)
            })
        })
        .collect();

    Ok(available)
}
