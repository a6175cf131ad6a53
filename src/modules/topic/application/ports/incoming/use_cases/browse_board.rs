use async_trait::async_trait;

use crate::modules::topic::application::domain::entities::{InvalidId, UserId};
use crate::modules::topic::application::ports::outgoing::{PageResult, TopicView};

#[derive(Debug, Clone, thiserror::Error)]
pub enum BrowseBoardError {
    #[error("Invalid board id: {0}")]
    InvalidId(#[from] InvalidId),

    #[error("Failed to load board topics: {0}")]
    QueryFailed(String),
}

/// The board listing: pinned topics on top, the rest paginated, and the
/// most recently active topic for board summaries.
#[async_trait]
pub trait BrowseBoardUseCase: Send + Sync {
    async fn stickied(
        &self,
        board_id: &str,
        actor: Option<&UserId>,
    ) -> Result<Vec<TopicView>, BrowseBoardError>;

    async fn page(
        &self,
        board_id: &str,
        page: u32,
        actor: Option<&UserId>,
    ) -> Result<PageResult<TopicView>, BrowseBoardError>;

    /// Latest non-deleted topic of the board; `None` for an empty board.
    /// Deleted topics never surface here, whoever asks.
    async fn latest(&self, board_id: &str) -> Result<Option<TopicView>, BrowseBoardError>;
}
