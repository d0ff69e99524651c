use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::utils::reference::generate_booking_reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Partially Paid")]
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    #[sea_orm(string_value = "Refunded")]
    Refunded,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BookingStatus {
    #[sea_orm(string_value = "Confirmed")]
    Confirmed,
    #[sea_orm(string_value = "Checked In")]
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[sea_orm(string_value = "Checked Out")]
    #[serde(rename = "Checked Out")]
    CheckedOut,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    #[sea_orm(string_value = "No Show")]
    #[serde(rename = "No Show")]
    NoShow,
}

impl BookingStatus {
    /// Statuses that no longer hold the room.
    pub const INACTIVE: [BookingStatus; 2] = [BookingStatus::Cancelled, BookingStatus::NoShow];

    /// Whether a booking in this status still occupies its room's calendar.
    pub fn is_active(self) -> bool {
        !Self::INACTIVE.contains(&self)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guest_id: i32,
    pub room_id: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub number_of_guests: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub payment_method: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub special_requests: Option<String>,
    #[sea_orm(unique)]
    pub booking_reference: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id"
    )]
    Guest,
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            self.created_at = Set(now);
            if !self.booking_reference.is_set() {
                self.booking_reference = Set(generate_booking_reference());
            }
        } else {
            // The reference is fixed at creation
            self.booking_reference = sea_orm::ActiveValue::NotSet;
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
