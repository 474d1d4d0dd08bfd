use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::DeptCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Department::Name).string().null())
                    .col(ColumnDef::new(Department::Region).string().null())
                    .col(
                        ColumnDef::new(Department::CreatedAt)
                            .timestamp_with_time_zone() // Corresponds to DateTime<Utc>
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventOptions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventOptions::Title).string().not_null())
                    .col(ColumnDef::new(EventOptions::Category).string().not_null())
                    .col(ColumnDef::new(EventOptions::Tags).json().not_null())
                    .col(ColumnDef::new(EventOptions::LocationRegion).string().not_null())
                    .col(ColumnDef::new(EventOptions::EstPricePp).double().not_null())
                    .col(ColumnDef::new(EventOptions::MinParticipants).integer().null())
                    .col(ColumnDef::new(EventOptions::AccessibilityFlags).json().not_null())
                    .col(
                        ColumnDef::new(EventOptions::WeatherDependent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(EventOptions::ImageUrl).string().null())
                    .col(ColumnDef::new(EventOptions::Description).text().null())
                    .col(
                        ColumnDef::new(EventOptions::IsMystery)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EventOptions::Season)
                            .string()
                            .not_null()
                            .default("all_year"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Campaign::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaign::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaign::Name).string().not_null())
                    .col(ColumnDef::new(Campaign::DeptCode).string().not_null())
                    .col(ColumnDef::new(Campaign::TargetDateRange).string().not_null())
                    .col(ColumnDef::new(Campaign::VotingDeadline).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Campaign::Status)
                            .string()
                            .not_null()
                            .default("voting"),
                    )
                    .col(ColumnDef::new(Campaign::TotalBudgetNeeded).double().not_null())
                    .col(ColumnDef::new(Campaign::CompanyBudgetAvailable).double().not_null())
                    .col(ColumnDef::new(Campaign::BudgetPerParticipant).double().null())
                    .col(
                        ColumnDef::new(Campaign::ExternalSponsors)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Campaign::WinningEventId).string().null())
                    .col(
                        ColumnDef::new(Campaign::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_dept_code")
                            .from(Campaign::Table, Campaign::DeptCode)
                            .to(Department::Table, Department::DeptCode),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaign_dept_code")
                    .table(Campaign::Table)
                    .col(Campaign::DeptCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignEventOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignEventOptions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignEventOptions::CampaignId).string().not_null())
                    .col(ColumnDef::new(CampaignEventOptions::EventOptionId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_event_options_campaign")
                            .from(CampaignEventOptions::Table, CampaignEventOptions::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_event_options_event")
                            .from(CampaignEventOptions::Table, CampaignEventOptions::EventOptionId)
                            .to(EventOptions::Table, EventOptions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaign_event_options_campaign_id")
                    .table(CampaignEventOptions::Table)
                    .col(CampaignEventOptions::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StretchGoal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StretchGoal::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StretchGoal::CampaignId).string().not_null())
                    .col(ColumnDef::new(StretchGoal::AmountThreshold).double().not_null())
                    .col(ColumnDef::new(StretchGoal::RewardDescription).string().not_null())
                    .col(
                        ColumnDef::new(StretchGoal::Unlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(StretchGoal::Icon).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stretch_goal_campaign")
                            .from(StretchGoal::Table, StretchGoal::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stretch_goal_campaign_id")
                    .table(StretchGoal::Table)
                    .col(StretchGoal::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PrivateContribution::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrivateContribution::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrivateContribution::CampaignId).string().not_null())
                    .col(ColumnDef::new(PrivateContribution::UserName).string().not_null())
                    .col(ColumnDef::new(PrivateContribution::Amount).double().not_null())
                    .col(
                        ColumnDef::new(PrivateContribution::IsHero)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PrivateContribution::IsAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PrivateContribution::Badge).string().null())
                    .col(
                        ColumnDef::new(PrivateContribution::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_private_contribution_campaign")
                            .from(PrivateContribution::Table, PrivateContribution::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_private_contribution_campaign_id")
                    .table(PrivateContribution::Table)
                    .col(PrivateContribution::CampaignId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrivateContribution::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StretchGoal::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignEventOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaign::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Department {
    Table,
    DeptCode,
    Name,
    Region,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Campaign {
    Table,
    Id,
    Name,
    DeptCode,
    TargetDateRange,
    VotingDeadline,
    Status,
    TotalBudgetNeeded,
    CompanyBudgetAvailable,
    BudgetPerParticipant,
    ExternalSponsors,
    WinningEventId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EventOptions {
    Table,
    Id,
    Title,
    Category,
    Tags,
    LocationRegion,
    EstPricePp,
    MinParticipants,
    AccessibilityFlags,
    WeatherDependent,
    ImageUrl,
    Description,
    IsMystery,
    Season,
}

#[derive(DeriveIden)]
enum CampaignEventOptions {
    Table,
    Id,
    CampaignId,
    EventOptionId,
}

#[derive(DeriveIden)]
enum StretchGoal {
    Table,
    Id,
    CampaignId,
    AmountThreshold,
    RewardDescription,
    Unlocked,
    Icon,
}

#[derive(DeriveIden)]
enum PrivateContribution {
    Table,
    Id,
    CampaignId,
    UserName,
    Amount,
    IsHero,
    IsAnonymous,
    Badge,
    CreatedAt,
}
