use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RoomType {
    #[sea_orm(string_value = "Single")]
    Single,
    #[sea_orm(string_value = "Double")]
    Double,
    #[sea_orm(string_value = "Twin")]
    Twin,
    #[sea_orm(string_value = "Suite")]
    Suite,
    #[sea_orm(string_value = "Deluxe")]
    Deluxe,
    #[sea_orm(string_value = "Family")]
    Family,
}

/// Occupancy state of a room.
///
/// Written from two places: an administrator editing the room directly, and
/// the booking lifecycle (see [`crate::services::room_status`]). The booking
/// lifecycle always wins; creating or cancelling a booking overwrites
/// whatever was set manually, `Maintenance` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Occupied")]
    Occupied,
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
    #[sea_orm(string_value = "Reserved")]
    Reserved,
}

/// Image URLs, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct RoomImages(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub room_number: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price_per_night: Decimal,
    pub capacity: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: RoomStatus,
    pub floor: Option<i32>,
    pub has_wifi: bool,
    #[serde(rename = "hasTV")]
    pub has_tv: bool,
    pub has_air_con: bool,
    pub has_balcony: bool,
    #[sea_orm(column_type = "Json", nullable)]
    pub images: Option<RoomImages>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
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
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
