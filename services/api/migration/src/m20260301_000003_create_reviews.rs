use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::BathroomId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().null())
                    .col(ColumnDef::new(Reviews::Cleanliness).small_integer().null())
                    .col(ColumnDef::new(Reviews::Privacy).small_integer().null())
                    .col(ColumnDef::new(Reviews::Accessibility).small_integer().null())
                    .col(ColumnDef::new(Reviews::BestFor).string().null())
                    .col(ColumnDef::new(Reviews::Comment).text().null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::BathroomId)
                            .to(Bathrooms::Table, Bathrooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::BathroomId)
                    .col(Reviews::CreatedAt)
                    .name("idx_reviews_bathroom_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::CreatedAt)
                    .name("idx_reviews_user_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    BathroomId,
    UserId,
    Rating,
    Cleanliness,
    Privacy,
    Accessibility,
    BestFor,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Bathrooms {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
