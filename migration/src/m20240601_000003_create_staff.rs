use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(pk_auto(Staff::Id))
                    .col(string_len(Staff::FirstName, 100).not_null())
                    .col(string_len(Staff::LastName, 100).not_null())
                    .col(string_len(Staff::Email, 255).not_null().unique_key())
                    .col(string_len(Staff::Phone, 50).not_null())
                    .col(string_len(Staff::Position, 100).not_null())
                    .col(string_len(Staff::Department, 100).not_null())
                    .col(date(Staff::HireDate).not_null())
                    .col(decimal_len_null(Staff::Salary, 10, 2))
                    .col(string_null(Staff::Address))
                    .col(string_null(Staff::EmergencyContact))
                    .col(string_len_null(Staff::EmergencyPhone, 50))
                    .col(boolean(Staff::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Staff::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Staff::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Staff {
    #[sea_orm(iden = "staff")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Department,
    HireDate,
    Salary,
    Address,
    EmergencyContact,
    EmergencyPhone,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
