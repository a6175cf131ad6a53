use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryResult, Statement,
};
use tracing::warn;
use uuid::Uuid;

use crate::modules::topic::application::domain::entities::{BoardId, TopicId, UserId};
use crate::modules::topic::application::ports::outgoing::{
    BoardRef, CategoryRef, PageRequest, PageResult, PostView, TopicQuery, TopicQueryError,
    TopicRecord, TopicView, TopicWithPosts, UserRef,
};

use super::sea_orm_entity::topics::{Column as TopicColumn, Entity as TopicEntity};

// ============================================================================
// Query Implementation (Production)
// ============================================================================

#[derive(Clone)]
pub struct TopicQueryPostgres {
    db: Arc<DatabaseConnection>,
}

/// The join graph every topic listing and lookup hydrates: the topic row,
/// its board and category, first and last post with authors, and the
/// moderators recorded on the three state flags.
const TOPIC_CONTEXT_SELECT: &str = r#"
SELECT
    t.id, t.title, t.is_sticky, t.is_closed, t.is_deleted,
    b.id AS board_id, b.name AS board_name,
    c.id AS category_id, c.name AS category_name,
    fp.id AS first_post_id, fp.body AS first_post_body,
    fp.created_at AS first_post_created_at,
    fp_author.id AS first_post_author_id,
    fp_author.username AS first_post_author_name,
    lp.id AS last_post_id, lp.body AS last_post_body,
    lp.created_at AS last_post_created_at,
    lp_author.id AS last_post_author_id,
    lp_author.username AS last_post_author_name,
    closer.id AS closed_by_id, closer.username AS closed_by_name,
    deleter.id AS deleted_by_id, deleter.username AS deleted_by_name,
    pinner.id AS stickied_by_id, pinner.username AS stickied_by_name
FROM topics t
INNER JOIN posts fp ON fp.id = t.first_post_id
LEFT JOIN users fp_author ON fp_author.id = fp.created_by
LEFT JOIN posts lp ON lp.id = t.last_post_id
LEFT JOIN users lp_author ON lp_author.id = lp.created_by
LEFT JOIN boards b ON b.id = t.board_id
LEFT JOIN categories c ON c.id = b.category_id
LEFT JOIN users closer ON closer.id = t.closed_by
LEFT JOIN users deleter ON deleter.id = t.deleted_by
LEFT JOIN users pinner ON pinner.id = t.stickied_by
"#;

const ORDER_BY_ACTIVITY: &str = " ORDER BY lp.created_at DESC NULLS LAST";

/// The soft-delete gate, defined once and appended to every query whose
/// visibility depends on the caller's capability.
fn visibility_clause(can_view_deleted: bool) -> &'static str {
    if can_view_deleted {
        ""
    } else {
        " AND t.is_deleted = FALSE"
    }
}

impl TopicQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // =====================================================
    // SQL builders
    // =====================================================

    fn by_id_stmt(id: TopicId, can_view_deleted: bool) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "{}WHERE t.id = $1{}",
                TOPIC_CONTEXT_SELECT,
                visibility_clause(can_view_deleted)
            ),
            vec![id.value().into()],
        )
    }

    fn stickied_stmt(board: BoardId, can_view_deleted: bool) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "{}WHERE t.board_id = $1 AND t.is_sticky = TRUE{}{}",
                TOPIC_CONTEXT_SELECT,
                visibility_clause(can_view_deleted),
                ORDER_BY_ACTIVITY
            ),
            vec![board.value().into()],
        )
    }

    fn paged_stmt(
        board: BoardId,
        can_view_deleted: bool,
        limit: i64,
        offset: i64,
    ) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "{}WHERE t.board_id = $1 AND t.is_sticky = FALSE{}{} LIMIT $2 OFFSET $3",
                TOPIC_CONTEXT_SELECT,
                visibility_clause(can_view_deleted),
                ORDER_BY_ACTIVITY
            ),
            vec![board.value().into(), limit.into(), offset.into()],
        )
    }

    fn paged_count_stmt(board: BoardId, can_view_deleted: bool) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "SELECT COUNT(*) AS total FROM topics t WHERE t.board_id = $1 AND t.is_sticky = FALSE{}",
                visibility_clause(can_view_deleted)
            ),
            vec![board.value().into()],
        )
    }

    fn last_for_board_stmt(board: BoardId) -> Statement {
        // This feeds board summaries, never moderation screens, so deleted
        // topics stay out no matter who asks.
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "{}WHERE t.board_id = $1 AND t.is_deleted = FALSE{} LIMIT 1",
                TOPIC_CONTEXT_SELECT, ORDER_BY_ACTIVITY
            ),
            vec![board.value().into()],
        )
    }

    fn closed_stmt(limit: i64, offset: i64) -> Statement {
        // No deleted-state filter: the closed queue shows moderators
        // closed topics even after soft deletion.
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "{}WHERE t.is_closed = TRUE{} LIMIT $1 OFFSET $2",
                TOPIC_CONTEXT_SELECT, ORDER_BY_ACTIVITY
            ),
            vec![limit.into(), offset.into()],
        )
    }

    fn closed_count_stmt() -> Statement {
        Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*) AS total FROM topics t WHERE t.is_closed = TRUE".to_string(),
        )
    }

    fn deleted_stmt(limit: i64, offset: i64) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "{}WHERE t.is_deleted = TRUE{} LIMIT $1 OFFSET $2",
                TOPIC_CONTEXT_SELECT, ORDER_BY_ACTIVITY
            ),
            vec![limit.into(), offset.into()],
        )
    }

    fn deleted_count_stmt() -> Statement {
        Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*) AS total FROM topics t WHERE t.is_deleted = TRUE".to_string(),
        )
    }

    fn posts_stmt(id: TopicId) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT
                p.id, p.body, p.created_at,
                author.id AS author_id, author.username AS author_name
            FROM posts p
            LEFT JOIN users author ON author.id = p.created_by
            WHERE p.topic_id = $1
            ORDER BY p.created_at ASC
            "#,
            vec![id.value().into()],
        )
    }

    fn post_count_stmt(id: TopicId) -> Statement {
        // GROUP BY keeps a missing topic distinguishable from a topic with
        // no posts: the former yields no row, the latter a zero row.
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT COUNT(DISTINCT p.id) AS post_count
            FROM topics t
            LEFT JOIN posts p ON p.topic_id = t.id
            WHERE t.id = $1
            GROUP BY t.id
            "#,
            vec![id.value().into()],
        )
    }

    // =====================================================
    // Row mapping
    // =====================================================

    async fn fetch_page(
        &self,
        count_stmt: Statement,
        page_stmt: Statement,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError> {
        let total = match self.db.query_one(count_stmt).await.map_err(map_db_err)? {
            Some(row) => row.try_get::<i64>("", "total").map_err(map_db_err)? as u64,
            None => 0,
        };

        let rows = self.db.query_all(page_stmt).await.map_err(map_db_err)?;

        let items = rows
            .iter()
            .map(row_to_topic_view)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResult {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }
}

fn map_db_err(e: DbErr) -> TopicQueryError {
    TopicQueryError::DatabaseError(e.to_string())
}

fn page_offset(page: PageRequest) -> i64 {
    (page.page.saturating_sub(1) as i64) * (page.per_page as i64)
}

fn user_ref(
    row: &QueryResult,
    id_col: &str,
    name_col: &str,
) -> Result<Option<UserRef>, TopicQueryError> {
    let id: Option<Uuid> = row.try_get("", id_col).map_err(map_db_err)?;

    match id {
        Some(id) => {
            let username: Option<String> = row.try_get("", name_col).map_err(map_db_err)?;
            Ok(Some(UserRef {
                id: UserId::from(id),
                username: username.unwrap_or_default(),
            }))
        }
        None => Ok(None),
    }
}

fn row_to_topic_view(row: &QueryResult) -> Result<TopicView, TopicQueryError> {
    let id: i64 = row.try_get("", "id").map_err(map_db_err)?;
    let title: String = row.try_get("", "title").map_err(map_db_err)?;
    let is_sticky: bool = row.try_get("", "is_sticky").map_err(map_db_err)?;
    let is_closed: bool = row.try_get("", "is_closed").map_err(map_db_err)?;
    let is_deleted: bool = row.try_get("", "is_deleted").map_err(map_db_err)?;

    let board = match row
        .try_get::<Option<i64>>("", "board_id")
        .map_err(map_db_err)?
    {
        Some(board_id) => {
            let board_name: Option<String> =
                row.try_get("", "board_name").map_err(map_db_err)?;
            let category = match row
                .try_get::<Option<i64>>("", "category_id")
                .map_err(map_db_err)?
            {
                Some(category_id) => {
                    let category_name: Option<String> =
                        row.try_get("", "category_name").map_err(map_db_err)?;
                    Some(CategoryRef {
                        id: category_id,
                        name: category_name.unwrap_or_default(),
                    })
                }
                None => None,
            };
            Some(BoardRef {
                id: board_id,
                name: board_name.unwrap_or_default(),
                category,
            })
        }
        None => None,
    };

    let first_post = PostView {
        id: row.try_get("", "first_post_id").map_err(map_db_err)?,
        body: row.try_get("", "first_post_body").map_err(map_db_err)?,
        author: user_ref(row, "first_post_author_id", "first_post_author_name")?,
        created_at: row
            .try_get::<sea_orm::prelude::DateTimeWithTimeZone>("", "first_post_created_at")
            .map_err(map_db_err)?
            .into(),
    };

    let last_post = match row
        .try_get::<Option<i64>>("", "last_post_id")
        .map_err(map_db_err)?
    {
        Some(post_id) => {
            let body: Option<String> = row.try_get("", "last_post_body").map_err(map_db_err)?;
            let created_at: sea_orm::prelude::DateTimeWithTimeZone = row
                .try_get("", "last_post_created_at")
                .map_err(map_db_err)?;
            Some(PostView {
                id: post_id,
                body: body.unwrap_or_default(),
                author: user_ref(row, "last_post_author_id", "last_post_author_name")?,
                created_at: created_at.into(),
            })
        }
        None => None,
    };

    Ok(TopicView {
        id,
        title,
        is_sticky,
        is_closed,
        is_deleted,
        board,
        first_post,
        last_post,
        closed_by: user_ref(row, "closed_by_id", "closed_by_name")?,
        deleted_by: user_ref(row, "deleted_by_id", "deleted_by_name")?,
        stickied_by: user_ref(row, "stickied_by_id", "stickied_by_name")?,
    })
}

fn row_to_post_view(row: &QueryResult) -> Result<PostView, TopicQueryError> {
    Ok(PostView {
        id: row.try_get("", "id").map_err(map_db_err)?,
        body: row.try_get("", "body").map_err(map_db_err)?,
        author: user_ref(row, "author_id", "author_name")?,
        created_at: row
            .try_get::<sea_orm::prelude::DateTimeWithTimeZone>("", "created_at")
            .map_err(map_db_err)?
            .into(),
    })
}

#[async_trait]
impl TopicQuery for TopicQueryPostgres {
    async fn by_id_with_context(
        &self,
        id: TopicId,
        can_view_deleted: bool,
    ) -> Result<TopicView, TopicQueryError> {
        let stmt = Self::by_id_stmt(id, can_view_deleted);

        let row = self
            .db
            .query_one(stmt)
            .await
            .map_err(map_db_err)?
            .ok_or(TopicQueryError::NotFound)?;

        row_to_topic_view(&row)
    }

    async fn by_id_with_posts(
        &self,
        id: TopicId,
        can_view_deleted: bool,
    ) -> Result<TopicWithPosts, TopicQueryError> {
        let topic = self.by_id_with_context(id, can_view_deleted).await?;

        let rows = self
            .db
            .query_all(Self::posts_stmt(id))
            .await
            .map_err(map_db_err)?;

        // A topic without posts should not exist; treat it like the inner
        // join the listing queries already perform.
        if rows.is_empty() {
            return Err(TopicQueryError::NotFound);
        }

        let posts = rows
            .iter()
            .map(row_to_post_view)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TopicWithPosts { topic, posts })
    }

    async fn stickied_by_board(
        &self,
        board: BoardId,
        can_view_deleted: bool,
    ) -> Result<Vec<TopicView>, TopicQueryError> {
        let rows = self
            .db
            .query_all(Self::stickied_stmt(board, can_view_deleted))
            .await
            .map_err(map_db_err)?;

        rows.iter().map(row_to_topic_view).collect()
    }

    async fn paged_by_board(
        &self,
        board: BoardId,
        page: PageRequest,
        can_view_deleted: bool,
    ) -> Result<PageResult<TopicView>, TopicQueryError> {
        self.fetch_page(
            Self::paged_count_stmt(board, can_view_deleted),
            Self::paged_stmt(
                board,
                can_view_deleted,
                page.per_page as i64,
                page_offset(page),
            ),
            page,
        )
        .await
    }

    async fn last_for_board(&self, board: BoardId) -> Result<Option<TopicView>, TopicQueryError> {
        let row = self
            .db
            .query_one(Self::last_for_board_stmt(board))
            .await
            .map_err(map_db_err)?;

        row.as_ref().map(row_to_topic_view).transpose()
    }

    async fn closed_paginated(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError> {
        self.fetch_page(
            Self::closed_count_stmt(),
            Self::closed_stmt(page.per_page as i64, page_offset(page)),
            page,
        )
        .await
    }

    async fn deleted_paginated(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError> {
        self.fetch_page(
            Self::deleted_count_stmt(),
            Self::deleted_stmt(page.per_page as i64, page_offset(page)),
            page,
        )
        .await
    }

    async fn by_ids(&self, ids: &[TopicId]) -> Result<Vec<TopicRecord>, TopicQueryError> {
        let models = TopicEntity::find()
            .filter(TopicColumn::Id.is_in(ids.iter().map(TopicId::value)))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.iter().map(|m| m.to_record()).collect())
    }

    async fn post_count(&self, id: TopicId) -> Option<u64> {
        let row = match self.db.query_one(Self::post_count_stmt(id)).await {
            Ok(row) => row?,
            Err(e) => {
                warn!(topic = %id, error = %e, "post count query failed, reporting unknown");
                return None;
            }
        };

        match row.try_get::<i64>("", "post_count") {
            Ok(count) => Some(count as u64),
            Err(e) => {
                warn!(topic = %id, error = %e, "post count row unreadable, reporting unknown");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
