//! Create `customers` table.
//!
//! `middle_name` is the only nullable column; `phone` and `notes` default to `''`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_auto(Customers::Id))
                    .col(text(Customers::FirstName))
                    .col(text_null(Customers::MiddleName))
                    .col(text(Customers::LastName))
                    .col(text(Customers::Phone).default(""))
                    .col(text(Customers::Notes).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customers { Table, Id, FirstName, MiddleName, LastName, Phone, Notes }
