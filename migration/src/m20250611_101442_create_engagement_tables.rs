use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vote::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Vote::CampaignId).string().not_null())
                    .col(ColumnDef::new(Vote::EventId).string().not_null())
                    .col(ColumnDef::new(Vote::UserId).string().null())
                    .col(ColumnDef::new(Vote::SessionId).string().null())
                    .col(ColumnDef::new(Vote::Weight).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Vote::IsSuperLike)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_campaign")
                            .from(Vote::Table, Vote::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_event")
                            .from(Vote::Table, Vote::EventId)
                            .to(EventOptions::Table, EventOptions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vote_campaign_id")
                    .table(Vote::Table)
                    .col(Vote::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Availability::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Availability::CampaignId).string().not_null())
                    .col(ColumnDef::new(Availability::UserId).string().null())
                    .col(ColumnDef::new(Availability::SessionId).string().null())
                    .col(ColumnDef::new(Availability::Date).string().not_null())
                    .col(ColumnDef::new(Availability::Slots).json().not_null())
                    .col(
                        ColumnDef::new(Availability::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_campaign")
                            .from(Availability::Table, Availability::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_campaign_id")
                    .table(Availability::Table)
                    .col(Availability::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Room::Token).string().not_null().primary_key())
                    .col(ColumnDef::new(Room::DeptCode).string().not_null())
                    .col(ColumnDef::new(Room::CampaignId).string().null())
                    .col(
                        ColumnDef::new(Room::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Room::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vote {
    Table,
    Id,
    CampaignId,
    EventId,
    UserId,
    SessionId,
    Weight,
    IsSuperLike,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Availability {
    Table,
    Id,
    CampaignId,
    UserId,
    SessionId,
    Date,
    Slots,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Room {
    Table,
    Token,
    DeptCode,
    CampaignId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Campaign {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum EventOptions {
    Table,
    Id,
}
