use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_reviews"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("reviews"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("submission_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("stage")).string().not_null())
                    .col(ColumnDef::new(Alias::new("reviewer_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("score")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("feedback")).text().not_null())
                    .col(ColumnDef::new(Alias::new("result")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("reviewed_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .check(Expr::cust("score >= 0 AND score <= 100"))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("reviews"), Alias::new("submission_id"))
                            .to(Alias::new("submissions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("reviews"), Alias::new("reviewer_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_submission_id")
                    .table(Alias::new("reviews"))
                    .col(Alias::new("submission_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("reviews")).to_owned())
            .await
    }
}
