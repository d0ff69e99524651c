pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_guests;
mod m20240601_000002_create_rooms;
mod m20240601_000003_create_staff;
mod m20240601_000004_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_guests::Migration),
            Box::new(m20240601_000002_create_rooms::Migration),
            Box::new(m20240601_000003_create_staff::Migration),
            Box::new(m20240601_000004_create_bookings::Migration),
        ]
    }
}
