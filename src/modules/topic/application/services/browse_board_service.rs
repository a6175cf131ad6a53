use async_trait::async_trait;

use crate::config::ModerationConfig;
use crate::modules::topic::application::{
    domain::entities::{BoardId, UserId},
    ports::incoming::use_cases::{BrowseBoardError, BrowseBoardUseCase},
    ports::outgoing::{
        AccessPolicy, PageRequest, PageResult, TopicQuery, TopicQueryError, TopicView,
    },
};

#[derive(Debug, Clone)]
pub struct BrowseBoardService<Q, P>
where
    Q: TopicQuery,
    P: AccessPolicy,
{
    query: Q,
    policy: P,
    config: ModerationConfig,
}

impl<Q, P> BrowseBoardService<Q, P>
where
    Q: TopicQuery,
    P: AccessPolicy,
{
    pub fn new(query: Q, policy: P, config: ModerationConfig) -> Self {
        Self {
            query,
            policy,
            config,
        }
    }
}

fn map_query_err(e: TopicQueryError) -> BrowseBoardError {
    match e {
        // A board listing that matches nothing is an empty listing, but a
        // gateway-level "no result" can still surface from the single-row
        // latest lookup; treat both as query failures here.
        TopicQueryError::NotFound => BrowseBoardError::QueryFailed("no result".to_string()),
        TopicQueryError::DatabaseError(msg) => BrowseBoardError::QueryFailed(msg),
    }
}

#[async_trait]
impl<Q, P> BrowseBoardUseCase for BrowseBoardService<Q, P>
where
    Q: TopicQuery,
    P: AccessPolicy,
{
    async fn stickied(
        &self,
        board_id: &str,
        actor: Option<&UserId>,
    ) -> Result<Vec<TopicView>, BrowseBoardError> {
        let board = BoardId::parse(board_id)?;
        let can_view_deleted = self.config.deleted_topics.resolve(&self.policy, actor).await;

        self.query
            .stickied_by_board(board, can_view_deleted)
            .await
            .map_err(map_query_err)
    }

    async fn page(
        &self,
        board_id: &str,
        page: u32,
        actor: Option<&UserId>,
    ) -> Result<PageResult<TopicView>, BrowseBoardError> {
        let board = BoardId::parse(board_id)?;
        let can_view_deleted = self.config.deleted_topics.resolve(&self.policy, actor).await;

        let request = PageRequest {
            page,
            per_page: self.config.topics_per_page,
        };

        self.query
            .paged_by_board(board, request, can_view_deleted)
            .await
            .map_err(map_query_err)
    }

    async fn latest(&self, board_id: &str) -> Result<Option<TopicView>, BrowseBoardError> {
        let board = BoardId::parse(board_id)?;

        self.query.last_for_board(board).await.map_err(map_query_err)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use super::*;
    use crate::modules::topic::application::domain::entities::TopicId;
    use crate::modules::topic::application::ports::outgoing::{
        DeletedVisibility, PostView, TopicRecord, TopicWithPosts,
    };

    // ============================================================
    // Mocks
    // ============================================================

    #[derive(Clone)]
    struct MockTopicQuery {
        stickied: Vec<TopicView>,
        paged: Vec<TopicView>,
        latest: Option<TopicView>,
        calls: Arc<AtomicUsize>,
        seen_page: Arc<Mutex<Option<PageRequest>>>,
    }

    impl MockTopicQuery {
        fn new(stickied: Vec<TopicView>, paged: Vec<TopicView>, latest: Option<TopicView>) -> Self {
            Self {
                stickied,
                paged,
                latest,
                calls: Arc::new(AtomicUsize::new(0)),
                seen_page: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl TopicQuery for MockTopicQuery {
        async fn by_id_with_context(
            &self,
            _id: TopicId,
            _can_view_deleted: bool,
        ) -> Result<TopicView, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn by_id_with_posts(
            &self,
            _id: TopicId,
            _can_view_deleted: bool,
        ) -> Result<TopicWithPosts, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn stickied_by_board(
            &self,
            _board: BoardId,
            _can_view_deleted: bool,
        ) -> Result<Vec<TopicView>, TopicQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.stickied.clone())
        }

        async fn paged_by_board(
            &self,
            _board: BoardId,
            page: PageRequest,
            _can_view_deleted: bool,
        ) -> Result<PageResult<TopicView>, TopicQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_page.lock().unwrap() = Some(page);
            Ok(PageResult {
                items: self.paged.clone(),
                page: page.page,
                per_page: page.per_page,
                total: self.paged.len() as u64,
            })
        }

        async fn last_for_board(
            &self,
            _board: BoardId,
        ) -> Result<Option<TopicView>, TopicQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.latest.clone())
        }

        async fn closed_paginated(
            &self,
            _page: PageRequest,
        ) -> Result<PageResult<TopicView>, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn deleted_paginated(
            &self,
            _page: PageRequest,
        ) -> Result<PageResult<TopicView>, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn by_ids(&self, _ids: &[TopicId]) -> Result<Vec<TopicRecord>, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn post_count(&self, _id: TopicId) -> Option<u64> {
            unimplemented!("Not used in this test")
        }
    }

    #[derive(Clone)]
    struct AllowAllPolicy;

    #[async_trait]
    impl AccessPolicy for AllowAllPolicy {
        async fn can_view_deleted_topics(&self, _actor: Option<&UserId>) -> bool {
            true
        }

        async fn can_moderate_topics(&self, _actor: &UserId) -> bool {
            true
        }
    }

    // ============================================================
    // Helpers
    // ============================================================

    fn topic(id: i64, sticky: bool) -> TopicView {
        TopicView {
            id,
            title: format!("Topic {}", id),
            is_sticky: sticky,
            is_closed: false,
            is_deleted: false,
            board: None,
            first_post: PostView {
                id,
                body: "body".to_string(),
                author: None,
                created_at: Utc::now(),
            },
            last_post: None,
            closed_by: None,
            deleted_by: None,
            stickied_by: None,
        }
    }

    fn service_with(query: MockTopicQuery) -> BrowseBoardService<MockTopicQuery, AllowAllPolicy> {
        BrowseBoardService::new(
            query,
            AllowAllPolicy,
            ModerationConfig {
                topics_per_page: 15,
                deleted_topics: DeletedVisibility::AlwaysVisible,
            },
        )
    }

    // ============================================================
    // Tests
    // ============================================================

    #[tokio::test]
    async fn test_stickied_returns_pinned_topics() {
        let query = MockTopicQuery::new(vec![topic(1, true)], vec![], None);
        let service = service_with(query);

        let result = service.stickied("3", None).await.unwrap();

        assert_eq!(result.len(), 1);
        assert!(result[0].is_sticky);
    }

    #[tokio::test]
    async fn test_page_uses_the_configured_page_size() {
        let query = MockTopicQuery::new(vec![], vec![topic(2, false)], None);
        let service = service_with(query.clone());

        let result = service.page("3", 2, None).await.unwrap();

        assert_eq!(result.page, 2);
        let seen = query.seen_page.lock().unwrap().unwrap();
        assert_eq!(seen.per_page, 15);
    }

    #[tokio::test]
    async fn test_invalid_board_id_never_reaches_the_query() {
        let query = MockTopicQuery::new(vec![], vec![], None);
        let service = service_with(query.clone());

        assert!(matches!(
            service.stickied("x", None).await,
            Err(BrowseBoardError::InvalidId(_))
        ));
        assert!(matches!(
            service.page("0", 1, None).await,
            Err(BrowseBoardError::InvalidId(_))
        ));
        assert!(matches!(
            service.latest("").await,
            Err(BrowseBoardError::InvalidId(_))
        ));

        assert_eq!(query.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_latest_empty_board_is_none() {
        let query = MockTopicQuery::new(vec![], vec![], None);
        let service = service_with(query);

        let result = service.latest("3").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_latest_returns_the_most_recent_topic() {
        let query = MockTopicQuery::new(vec![], vec![], Some(topic(9, false)));
        let service = service_with(query);

        let result = service.latest("3").await.unwrap();

        assert_eq!(result.unwrap().id, 9);
    }
}
