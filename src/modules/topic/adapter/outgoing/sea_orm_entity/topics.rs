use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::modules::topic::application::domain::entities::UserId;
use crate::modules::topic::application::ports::outgoing::TopicRecord;

/// A forum topic row. The sticky/closed/deleted flags are independent;
/// each one travels with the column recording who set it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub board_id: i64,

    pub title: String,

    pub is_sticky: bool,

    pub is_closed: bool,

    pub is_deleted: bool,

    // Nullable only for the moment between topic and first-post creation;
    // every read joins through it, so rows without one never surface.
    pub first_post_id: Option<i64>,

    pub last_post_id: Option<i64>,

    pub closed_by: Option<Uuid>,

    pub deleted_by: Option<Uuid>,

    pub stickied_by: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_record(&self) -> TopicRecord {
        TopicRecord {
            id: self.id,
            board_id: self.board_id,
            title: self.title.clone(),
            is_sticky: self.is_sticky,
            is_closed: self.is_closed,
            is_deleted: self.is_deleted,
            first_post_id: self.first_post_id,
            last_post_id: self.last_post_id,
            closed_by: self.closed_by.map(UserId::from),
            deleted_by: self.deleted_by.map(UserId::from),
            stickied_by: self.stickied_by.map(UserId::from),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::boards::Entity",
        from = "Column::BoardId",
        to = "super::boards::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Board,

    #[sea_orm(has_many = "super::posts::Entity")]
    Posts,
}

impl Related<super::boards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::ActiveValue::Set;

            let insert = _insert;
            if !insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}
