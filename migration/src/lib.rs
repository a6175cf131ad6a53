pub use sea_orm_migration::prelude::*;

mod m20260301_101500_create_users_table;
mod m20260301_102200_create_category_board_tables;
mod m20260301_103000_create_topic_post_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_101500_create_users_table::Migration),
            Box::new(m20260301_102200_create_category_board_tables::Migration),
            Box::new(m20260301_103000_create_topic_post_tables::Migration),
        ]
    }
}
