use sea_orm_migration::{prelude::*, schema::*};

use super::m20240601_000001_create_guests::Guest;
use super::m20240601_000002_create_rooms::Room;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::GuestId).not_null())
                    .col(integer(Booking::RoomId).not_null())
                    .col(date(Booking::CheckInDate).not_null())
                    .col(date(Booking::CheckOutDate).not_null())
                    .col(integer(Booking::NumberOfGuests).not_null().default(1))
                    .col(decimal_len(Booking::TotalPrice, 10, 2).not_null())
                    .col(
                        string_len(Booking::PaymentStatus, 20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        string_len(Booking::BookingStatus, 20)
                            .not_null()
                            .default("Confirmed"),
                    )
                    .col(string_len_null(Booking::PaymentMethod, 50))
                    .col(text_null(Booking::SpecialRequests))
                    .col(
                        string_len(Booking::BookingReference, 32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Booking::CheckOutDate).gt(Expr::col(Booking::CheckInDate)))
                    .check(Expr::col(Booking::NumberOfGuests).gte(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_guest")
                            .from(Booking::Table, Booking::GuestId)
                            .to(Guest::Table, Guest::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_room")
                            .from(Booking::Table, Booking::RoomId)
                            .to(Room::Table, Room::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Availability lookups filter by room first, then by date range
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_dates")
                    .table(Booking::Table)
                    .col(Booking::RoomId)
                    .col(Booking::CheckInDate)
                    .col(Booking::CheckOutDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_guest")
                    .table(Booking::Table)
                    .col(Booking::GuestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    #[sea_orm(iden = "bookings")]
    Table,
    Id,
    GuestId,
    RoomId,
    CheckInDate,
    CheckOutDate,
    NumberOfGuests,
    TotalPrice,
    PaymentStatus,
    BookingStatus,
    PaymentMethod,
    SpecialRequests,
    BookingReference,
    CreatedAt,
    UpdatedAt,
}
