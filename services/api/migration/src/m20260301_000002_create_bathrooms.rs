use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bathrooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bathrooms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bathrooms::Building).string().not_null())
                    .col(ColumnDef::new(Bathrooms::Floor).integer().not_null())
                    .col(ColumnDef::new(Bathrooms::Latitude).double().not_null())
                    .col(ColumnDef::new(Bathrooms::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Bathrooms::IsAccessible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Bathrooms::Gender)
                            .string_len(8)
                            .not_null()
                            .default("all"),
                    )
                    .col(ColumnDef::new(Bathrooms::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Bathrooms::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Bathrooms::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Bathrooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bathrooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bathrooms::Table, Bathrooms::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Bathrooms::Table)
                    .col(Bathrooms::Latitude)
                    .col(Bathrooms::Longitude)
                    .name("idx_bathrooms_latitude_longitude")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bathrooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bathrooms {
    Table,
    Id,
    Building,
    Floor,
    Latitude,
    Longitude,
    IsAccessible,
    Gender,
    CreatedBy,
    Rating,
    ReviewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
