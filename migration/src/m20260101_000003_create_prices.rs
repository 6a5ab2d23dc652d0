use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only price history, one row per successful scrape
        manager
            .create_table(
                Table::create()
                    .table(Prices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Prices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Prices::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(Prices::VendorId).big_integer().not_null())
                    .col(ColumnDef::new(Prices::Price).double().not_null())
                    .col(ColumnDef::new(Prices::Availability).boolean().not_null())
                    .col(
                        ColumnDef::new(Prices::ScrapedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prices_product_vendor_scraped")
                    .table(Prices::Table)
                    .col(Prices::ProductId)
                    .col(Prices::VendorId)
                    .col(Prices::ScrapedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Prices {
    Table,
    Id,
    ProductId,
    VendorId,
    Price,
    Availability,
    ScrapedAt,
}
