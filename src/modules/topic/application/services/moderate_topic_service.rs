use async_trait::async_trait;
use tracing::info;

use crate::modules::topic::application::{
    domain::entities::{BoardId, TopicId, UserId},
    ports::incoming::use_cases::{ModerateTopicError, ModerateTopicUseCase},
    ports::outgoing::{AccessPolicy, TopicRecord, TopicRepository, TopicRepositoryError},
};

#[derive(Debug, Clone)]
pub struct ModerateTopicService<R, P>
where
    R: TopicRepository,
    P: AccessPolicy,
{
    repository: R,
    policy: P,
}

impl<R, P> ModerateTopicService<R, P>
where
    R: TopicRepository,
    P: AccessPolicy,
{
    pub fn new(repository: R, policy: P) -> Self {
        Self { repository, policy }
    }

    async fn authorize(&self, moderator: &UserId) -> Result<(), ModerateTopicError> {
        if self.policy.can_moderate_topics(moderator).await {
            Ok(())
        } else {
            Err(ModerateTopicError::Denied)
        }
    }
}

fn map_repo_err(e: TopicRepositoryError) -> ModerateTopicError {
    match e {
        TopicRepositoryError::TopicNotFound => ModerateTopicError::NotFound,
        TopicRepositoryError::DatabaseError(msg) => ModerateTopicError::Failed(msg),
    }
}

#[async_trait]
impl<R, P> ModerateTopicUseCase for ModerateTopicService<R, P>
where
    R: TopicRepository,
    P: AccessPolicy,
{
    async fn sticky(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;

        let record = self
            .repository
            .sticky(id, *moderator)
            .await
            .map_err(map_repo_err)?;

        info!(topic = %id, moderator = %moderator, "topic stickied");
        Ok(record)
    }

    async fn unsticky(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;

        let record = self.repository.unsticky(id).await.map_err(map_repo_err)?;

        info!(topic = %id, moderator = %moderator, "topic unstickied");
        Ok(record)
    }

    async fn close(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;

        let record = self
            .repository
            .close(id, *moderator)
            .await
            .map_err(map_repo_err)?;

        info!(topic = %id, moderator = %moderator, "topic closed");
        Ok(record)
    }

    async fn reopen(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;

        let record = self.repository.reopen(id).await.map_err(map_repo_err)?;

        info!(topic = %id, moderator = %moderator, "topic reopened");
        Ok(record)
    }

    async fn soft_delete(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;

        let record = self
            .repository
            .soft_delete(id, *moderator)
            .await
            .map_err(map_repo_err)?;

        info!(topic = %id, moderator = %moderator, "topic soft-deleted");
        Ok(record)
    }

    async fn restore(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;

        let record = self.repository.restore(id).await.map_err(map_repo_err)?;

        info!(topic = %id, moderator = %moderator, "topic restored");
        Ok(record)
    }

    async fn move_to_board(
        &self,
        topic_id: &str,
        board_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError> {
        self.authorize(moderator).await?;
        let id = TopicId::parse(topic_id)?;
        let board = BoardId::parse(board_id)?;

        let record = self
            .repository
            .move_to_board(id, board)
            .await
            .map_err(map_repo_err)?;

        info!(topic = %id, board = %board, moderator = %moderator, "topic moved");
        Ok(record)
    }
}
