use sea_orm_migration::prelude::*;

use crate::m20260101_000001_create_vendors::Vendors;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VendorUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VendorUrls::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VendorUrls::Url).string().not_null())
                    .col(ColumnDef::new(VendorUrls::VendorId).big_integer().not_null())
                    .col(ColumnDef::new(VendorUrls::ProductId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vendor_urls_vendor")
                            .from(VendorUrls::Table, VendorUrls::VendorId)
                            .to(Vendors::Table, Vendors::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VendorUrls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VendorUrls {
    Table,
    Id,
    Url,
    VendorId,
    ProductId,
}
