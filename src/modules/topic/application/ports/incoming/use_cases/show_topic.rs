use async_trait::async_trait;

use crate::modules::topic::application::domain::entities::{InvalidId, UserId};
use crate::modules::topic::application::ports::outgoing::{TopicView, TopicWithPosts};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ShowTopicError {
    #[error("Invalid topic id: {0}")]
    InvalidId(#[from] InvalidId),

    #[error("Topic not found")]
    NotFound,

    #[error("Failed to load topic: {0}")]
    QueryFailed(String),
}

/// Displaying a single topic: the context header, the full thread, and the
/// auxiliary post count. Ids arrive raw (route segments); validation
/// happens here, before anything touches persistence.
#[async_trait]
pub trait ShowTopicUseCase: Send + Sync {
    async fn show(
        &self,
        topic_id: &str,
        actor: Option<&UserId>,
    ) -> Result<TopicView, ShowTopicError>;

    async fn show_with_posts(
        &self,
        topic_id: &str,
        actor: Option<&UserId>,
    ) -> Result<TopicWithPosts, ShowTopicError>;

    /// `Ok(None)` means the count is unknown; that is not a failure.
    async fn post_count(&self, topic_id: &str) -> Result<Option<u64>, ShowTopicError>;
}
