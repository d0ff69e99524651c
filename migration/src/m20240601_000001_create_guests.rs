use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guest::Table)
                    .if_not_exists()
                    .col(pk_auto(Guest::Id))
                    .col(string_len(Guest::FirstName, 100).not_null())
                    .col(string_len(Guest::LastName, 100).not_null())
                    .col(string_len(Guest::Email, 255).not_null().unique_key())
                    .col(string_len(Guest::Phone, 50).not_null())
                    .col(string_null(Guest::Address))
                    .col(string_len_null(Guest::City, 100))
                    .col(string_len_null(Guest::Country, 100))
                    .col(string_len_null(Guest::IdType, 50))
                    .col(string_len_null(Guest::IdNumber, 100))
                    .col(text_null(Guest::Notes))
                    .col(
                        timestamp_with_time_zone(Guest::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Guest::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Guest {
    #[sea_orm(iden = "guests")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    Country,
    IdType,
    IdNumber,
    Notes,
    CreatedAt,
    UpdatedAt,
}
