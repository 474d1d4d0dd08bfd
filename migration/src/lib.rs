pub use sea_orm_migration::prelude::*;

mod m20250611_093015_create_campaign_tables; mod m20250611_101442_create_engagement_tables;
// Add other migration modules here if you have more

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250611_093015_create_campaign_tables::Migration),
            Box::new(m20250611_101442_create_engagement_tables::Migration),
        ]
    }
}
