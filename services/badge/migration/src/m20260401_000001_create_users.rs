use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::DiscordHandle).string().not_null())
                    .col(ColumnDef::new(Users::DiscordUserId).string().not_null())
                    .col(ColumnDef::new(Users::DeviceId).string().not_null())
                    .col(ColumnDef::new(Users::DeviceMac).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups are always by the composite device identity, and there is
        // at most one registered user per badge.
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::DeviceId)
                    .col(Users::DeviceMac)
                    .unique()
                    .name("idx_users_device_identity")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    DiscordHandle,
    DiscordUserId,
    DeviceId,
    DeviceMac,
    CreatedAt,
}
