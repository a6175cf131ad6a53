use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::modules::topic::application::domain::entities::{BoardId, TopicId, UserId};
use crate::modules::topic::application::ports::outgoing::{
    TopicRecord, TopicRepository, TopicRepositoryError,
};

use super::sea_orm_entity::topics::ActiveModel as TopicActiveModel;

#[derive(Debug, Clone)]
pub struct TopicRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TopicRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_update_err(e: DbErr) -> TopicRepositoryError {
    match e {
        // A partial update that matched no row surfaces as either of
        // these depending on the execution path.
        DbErr::RecordNotUpdated => TopicRepositoryError::TopicNotFound,
        DbErr::RecordNotFound(_) => TopicRepositoryError::TopicNotFound,
        other => TopicRepositoryError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl TopicRepository for TopicRepositoryPostgres {
    async fn sticky(
        &self,
        id: TopicId,
        moderator: UserId,
    ) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            is_sticky: Set(true),
            stickied_by: Set(Some(moderator.value())),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        Ok(result.to_record())
    }

    async fn unsticky(&self, id: TopicId) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            is_sticky: Set(false),
            stickied_by: Set(None),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        Ok(result.to_record())
    }

    async fn close(
        &self,
        id: TopicId,
        moderator: UserId,
    ) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            is_closed: Set(true),
            closed_by: Set(Some(moderator.value())),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        Ok(result.to_record())
    }

    async fn reopen(&self, id: TopicId) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            is_closed: Set(false),
            closed_by: Set(None),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        Ok(result.to_record())
    }

    async fn soft_delete(
        &self,
        id: TopicId,
        moderator: UserId,
    ) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            is_deleted: Set(true),
            deleted_by: Set(Some(moderator.value())),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        if !result.is_deleted {
            // Should never happen, but safe
            return Err(TopicRepositoryError::TopicNotFound);
        }

        Ok(result.to_record())
    }

    async fn restore(&self, id: TopicId) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            is_deleted: Set(false),
            deleted_by: Set(None),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        if result.is_deleted {
            return Err(TopicRepositoryError::TopicNotFound);
        }

        Ok(result.to_record())
    }

    async fn move_to_board(
        &self,
        id: TopicId,
        board: BoardId,
    ) -> Result<TopicRecord, TopicRepositoryError> {
        let active = TopicActiveModel {
            id: Set(id.value()),
            board_id: Set(board.value()),
            ..Default::default()
        };

        let result = active.update(&*self.db).await.map_err(map_update_err)?;

        Ok(result.to_record())
    }
}
