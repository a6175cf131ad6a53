use async_trait::async_trait;

use crate::modules::topic::application::domain::entities::{InvalidId, UserId};
use crate::modules::topic::application::ports::outgoing::TopicRecord;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ModerateTopicError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] InvalidId),

    #[error("Actor is not allowed to moderate topics")]
    Denied,

    #[error("Topic not found")]
    NotFound,

    #[error("Moderation failed: {0}")]
    Failed(String),
}

/// Moderator state changes on a topic. Every call authorizes the actor
/// first; the returned record reflects the topic after the change.
#[async_trait]
pub trait ModerateTopicUseCase: Send + Sync {
    async fn sticky(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;

    async fn unsticky(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;

    /// Once closed, a topic accepts no further posts or edits.
    async fn close(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;

    async fn reopen(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;

    async fn soft_delete(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;

    async fn restore(
        &self,
        topic_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;

    async fn move_to_board(
        &self,
        topic_id: &str,
        board_id: &str,
        moderator: &UserId,
    ) -> Result<TopicRecord, ModerateTopicError>;
}
