use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::topic::application::domain::entities::{BoardId, TopicId, UserId};

use super::topic_repository::TopicRecord;

//
// ──────────────────────────────────────────────────────────
// Query DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRef {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardRef {
    pub id: i64,
    pub name: String,
    pub category: Option<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub id: i64,
    pub body: String,
    pub author: Option<UserRef>,
    pub created_at: DateTime<Utc>,
}

/// A topic hydrated with everything the browsing and moderation screens
/// show in one row: its board and category, the opening and most recent
/// post with their authors, and whoever last closed/deleted/stickied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicView {
    pub id: i64,
    pub title: String,
    pub is_sticky: bool,
    pub is_closed: bool,
    pub is_deleted: bool,
    pub board: Option<BoardRef>,
    pub first_post: PostView,
    pub last_post: Option<PostView>,
    pub closed_by: Option<UserRef>,
    pub deleted_by: Option<UserRef>,
    pub stickied_by: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicWithPosts {
    pub topic: TopicView,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum TopicQueryError {
    #[error("Topic not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (read side)
// ──────────────────────────────────────────────────────────
//

/// Read-side queries over topics and their join graph.
///
/// `can_view_deleted` gates soft-deleted rows: when false, the query adds
/// `is_deleted = FALSE` on top of its primary filter. Multi-result queries
/// order by last-post creation time, newest first.
#[async_trait]
pub trait TopicQuery: Send + Sync {
    /// One topic with board, category, first/last post and moderator refs.
    async fn by_id_with_context(
        &self,
        id: TopicId,
        can_view_deleted: bool,
    ) -> Result<TopicView, TopicQueryError>;

    /// Same as [`by_id_with_context`](Self::by_id_with_context), plus the
    /// full ordered post collection. A topic without posts is reported as
    /// not found.
    async fn by_id_with_posts(
        &self,
        id: TopicId,
        can_view_deleted: bool,
    ) -> Result<TopicWithPosts, TopicQueryError>;

    /// All sticky topics of a board, unpaginated.
    async fn stickied_by_board(
        &self,
        board: BoardId,
        can_view_deleted: bool,
    ) -> Result<Vec<TopicView>, TopicQueryError>;

    /// Non-sticky topics of a board, one page at a time.
    async fn paged_by_board(
        &self,
        board: BoardId,
        page: PageRequest,
        can_view_deleted: bool,
    ) -> Result<PageResult<TopicView>, TopicQueryError>;

    /// The board's most recently active topic. Deleted topics are excluded
    /// here regardless of the caller's capability.
    async fn last_for_board(&self, board: BoardId) -> Result<Option<TopicView>, TopicQueryError>;

    /// Every closed topic, deleted ones included, for the moderator queue.
    async fn closed_paginated(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError>;

    /// Every soft-deleted topic, for the admin queue.
    async fn deleted_paginated(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError>;

    /// Plain topic rows for a set of ids. Callers validate non-emptiness.
    async fn by_ids(&self, ids: &[TopicId]) -> Result<Vec<TopicRecord>, TopicQueryError>;

    /// Distinct-post count for a topic. `None` means the count could not
    /// be determined (missing topic or persistence failure); callers treat
    /// it as "unknown", never as an error.
    async fn post_count(&self, id: TopicId) -> Option<u64>;
}
