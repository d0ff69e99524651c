use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::room::{self, RoomStatus};
use crate::error::{AppError, AppResult};

/// Lifecycle write path for `rooms.status`.
///
/// These calls overwrite whatever an administrator set by hand, including
/// `Maintenance`. Callers decide when a write is warranted; nothing here
/// looks at the room's bookings.
pub async fn mark_reserved<C: ConnectionTrait>(db: &C, room_id: i32) -> AppResult<room::Model> {
    set_status(db, room_id, RoomStatus::Reserved).await
}

pub async fn mark_available<C: ConnectionTrait>(db: &C, room_id: i32) -> AppResult<room::Model> {
    set_status(db, room_id, RoomStatus::Available).await
}

async fn set_status<C: ConnectionTrait>(
    db: &C,
    room_id: i32,
    status: RoomStatus,
) -> AppResult<room::Model> {
    let room = room::Entity::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    if room.status == status {
        return Ok(room);
    }

    let previous = room.status;
    let mut active: room::ActiveModel = room.into();
    active.status = Set(status);
    let updated = active.update(db).await?;

    tracing::debug!(room_id, from = ?previous, to = ?status, "Room status synchronised");
    Ok(updated)
}
