use async_trait::async_trait;

use crate::modules::topic::application::domain::entities::InvalidId;
use crate::modules::topic::application::ports::outgoing::{PageResult, TopicRecord, TopicView};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ModerationQueuesError {
    #[error("Invalid topic id: {0}")]
    InvalidId(#[from] InvalidId),

    #[error("At least one topic id is required")]
    EmptyIdList,

    #[error("Failed to load moderation queue: {0}")]
    QueryFailed(String),
}

/// Review listings for privileged users: the closed-topic queue (deleted
/// topics included on purpose), the deleted-topic queue, and bulk lookup
/// of the topics a moderator selected.
#[async_trait]
pub trait ModerationQueuesUseCase: Send + Sync {
    async fn closed(&self, page: u32) -> Result<PageResult<TopicView>, ModerationQueuesError>;

    async fn deleted(&self, page: u32) -> Result<PageResult<TopicView>, ModerationQueuesError>;

    async fn selected(&self, topic_ids: &[i64])
        -> Result<Vec<TopicRecord>, ModerationQueuesError>;
}
