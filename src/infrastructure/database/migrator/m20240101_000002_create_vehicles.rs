//! Create vehicles table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Brand).string_len(255).not_null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(255).not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing filters on brand
        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_brand")
                    .table(Vehicles::Table)
                    .col(Vehicles::Brand)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Brand,
    Model,
    Year,
}
