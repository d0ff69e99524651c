use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Room type and status are stored as their display strings
        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(pk_auto(Room::Id))
                    .col(string_len(Room::RoomNumber, 20).not_null().unique_key())
                    .col(string_len(Room::Type, 20).not_null())
                    .col(decimal_len(Room::PricePerNight, 10, 2).not_null())
                    .col(integer(Room::Capacity).not_null().default(1))
                    .col(text_null(Room::Description))
                    .col(
                        string_len(Room::Status, 20)
                            .not_null()
                            .default("Available"),
                    )
                    .col(integer_null(Room::Floor))
                    .col(boolean(Room::HasWifi).not_null().default(true))
                    .col(boolean(Room::HasTv).not_null().default(true))
                    .col(boolean(Room::HasAirCon).not_null().default(true))
                    .col(boolean(Room::HasBalcony).not_null().default(false))
                    .col(json_null(Room::Images))
                    .col(
                        timestamp_with_time_zone(Room::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Room::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Room::PricePerNight).gte(0))
                    .check(Expr::col(Room::Capacity).gte(1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Room::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Room {
    #[sea_orm(iden = "rooms")]
    Table,
    Id,
    RoomNumber,
    Type,
    PricePerNight,
    Capacity,
    Description,
    Status,
    Floor,
    HasWifi,
    HasTv,
    HasAirCon,
    HasBalcony,
    Images,
    CreatedAt,
    UpdatedAt,
}
