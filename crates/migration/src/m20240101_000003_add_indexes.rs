use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reservations: lookup by customer, chronological listing
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_customer")
                    .table(Reservations::Table)
                    .col(Reservations::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_start_at")
                    .table(Reservations::Table)
                    .col(Reservations::StartAt)
                    .to_owned(),
            )
            .await?;

        // Customers: list ordering (last_name, first_name)
        manager
            .create_index(
                Index::create()
                    .name("idx_customers_name")
                    .table(Customers::Table)
                    .col(Customers::LastName)
                    .col(Customers::FirstName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reservations_customer").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservations_start_at").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customers_name").table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations { Table, CustomerId, StartAt }

#[derive(DeriveIden)]
enum Customers { Table, LastName, FirstName }
