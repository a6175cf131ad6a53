use async_trait::async_trait;
use serde::Serialize;

use crate::modules::topic::application::domain::entities::{BoardId, TopicId, UserId};

//
// ──────────────────────────────────────────────────────────
// Row DTO
// ──────────────────────────────────────────────────────────
//

/// A topic row without its join graph: what the write side returns after a
/// state change, and what id-set lookups yield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicRecord {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub is_sticky: bool,
    pub is_closed: bool,
    pub is_deleted: bool,
    pub first_post_id: Option<i64>,
    pub last_post_id: Option<i64>,
    pub closed_by: Option<UserId>,
    pub deleted_by: Option<UserId>,
    pub stickied_by: Option<UserId>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum TopicRepositoryError {
    #[error("Topic not found")]
    TopicNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (write side)
// ──────────────────────────────────────────────────────────
//

/// Moderator state transitions on a topic. Each flag travels together with
/// the column recording who set it: setting a flag stores the acting
/// moderator, clearing it clears the reference too.
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn sticky(
        &self,
        id: TopicId,
        moderator: UserId,
    ) -> Result<TopicRecord, TopicRepositoryError>;

    async fn unsticky(&self, id: TopicId) -> Result<TopicRecord, TopicRepositoryError>;

    async fn close(
        &self,
        id: TopicId,
        moderator: UserId,
    ) -> Result<TopicRecord, TopicRepositoryError>;

    async fn reopen(&self, id: TopicId) -> Result<TopicRecord, TopicRepositoryError>;

    async fn soft_delete(
        &self,
        id: TopicId,
        moderator: UserId,
    ) -> Result<TopicRecord, TopicRepositoryError>;

    async fn restore(&self, id: TopicId) -> Result<TopicRecord, TopicRepositoryError>;

    async fn move_to_board(
        &self,
        id: TopicId,
        board: BoardId,
    ) -> Result<TopicRecord, TopicRepositoryError>;
}
