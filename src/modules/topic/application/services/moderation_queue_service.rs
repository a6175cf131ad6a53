use async_trait::async_trait;

use crate::config::ModerationConfig;
use crate::modules::topic::application::{
    domain::entities::TopicId,
    ports::incoming::use_cases::{ModerationQueuesError, ModerationQueuesUseCase},
    ports::outgoing::{PageRequest, PageResult, TopicQuery, TopicQueryError, TopicRecord, TopicView},
};

#[derive(Debug, Clone)]
pub struct ModerationQueueService<Q>
where
    Q: TopicQuery,
{
    query: Q,
    config: ModerationConfig,
}

impl<Q> ModerationQueueService<Q>
where
    Q: TopicQuery,
{
    pub fn new(query: Q, config: ModerationConfig) -> Self {
        Self { query, config }
    }

    fn page_request(&self, page: u32) -> PageRequest {
        PageRequest {
            page,
            per_page: self.config.topics_per_page,
        }
    }
}

fn map_query_err(e: TopicQueryError) -> ModerationQueuesError {
    ModerationQueuesError::QueryFailed(e.to_string())
}

#[async_trait]
impl<Q> ModerationQueuesUseCase for ModerationQueueService<Q>
where
    Q: TopicQuery,
{
    async fn closed(&self, page: u32) -> Result<PageResult<TopicView>, ModerationQueuesError> {
        self.query
            .closed_paginated(self.page_request(page))
            .await
            .map_err(map_query_err)
    }

    async fn deleted(&self, page: u32) -> Result<PageResult<TopicView>, ModerationQueuesError> {
        self.query
            .deleted_paginated(self.page_request(page))
            .await
            .map_err(map_query_err)
    }

    async fn selected(
        &self,
        topic_ids: &[i64],
    ) -> Result<Vec<TopicRecord>, ModerationQueuesError> {
        if topic_ids.is_empty() {
            return Err(ModerationQueuesError::EmptyIdList);
        }

        let ids: Vec<TopicId> = topic_ids
            .iter()
            .map(|raw| TopicId::new(*raw))
            .collect::<Result<_, _>>()?;

        self.query.by_ids(&ids).await.map_err(map_query_err)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::modules::topic::application::domain::entities::{BoardId, InvalidId};
    use crate::modules::topic::application::ports::outgoing::{
        DeletedVisibility, TopicWithPosts,
    };

    // ============================================================
    // Mock Query
    // ============================================================

    #[derive(Clone)]
    struct MockTopicQuery {
        records: Vec<TopicRecord>,
        calls: Arc<AtomicUsize>,
    }

    impl MockTopicQuery {
        fn new(records: Vec<TopicRecord>) -> Self {
            Self {
                records,
                calls: Arc::new(AtomicUsize::new(0)),
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
            unimplemented!("Not used in this test")
        }

        async fn paged_by_board(
            &self,
            _board: BoardId,
            _page: PageRequest,
            _can_view_deleted: bool,
        ) -> Result<PageResult<TopicView>, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn last_for_board(
            &self,
            _board: BoardId,
        ) -> Result<Option<TopicView>, TopicQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn closed_paginated(
            &self,
            page: PageRequest,
        ) -> Result<PageResult<TopicView>, TopicQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PageResult {
                items: vec![],
                page: page.page,
                per_page: page.per_page,
                total: 0,
            })
        }

        async fn deleted_paginated(
            &self,
            page: PageRequest,
        ) -> Result<PageResult<TopicView>, TopicQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PageResult {
                items: vec![],
                page: page.page,
                per_page: page.per_page,
                total: 0,
            })
        }

        async fn by_ids(&self, ids: &[TopicId]) -> Result<Vec<TopicRecord>, TopicQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .iter()
                .filter(|r| ids.iter().any(|id| id.value() == r.id))
                .cloned()
                .collect())
        }

        async fn post_count(&self, _id: TopicId) -> Option<u64> {
            unimplemented!("Not used in this test")
        }
    }

    fn record(id: i64) -> TopicRecord {
        TopicRecord {
            id,
            board_id: 1,
            title: format!("Topic {}", id),
            is_sticky: false,
            is_closed: false,
            is_deleted: false,
            first_post_id: Some(id),
            last_post_id: Some(id),
            closed_by: None,
            deleted_by: None,
            stickied_by: None,
        }
    }

    fn service_with(query: MockTopicQuery) -> ModerationQueueService<MockTopicQuery> {
        ModerationQueueService::new(
            query,
            ModerationConfig {
                topics_per_page: 25,
                deleted_topics: DeletedVisibility::AlwaysVisible,
            },
        )
    }

    // ============================================================
    // Tests
    // ============================================================

    #[tokio::test]
    async fn test_closed_queue_uses_configured_page_size() {
        let service = service_with(MockTopicQuery::new(vec![]));

        let result = service.closed(3).await.unwrap();

        assert_eq!(result.page, 3);
        assert_eq!(result.per_page, 25);
    }

    #[tokio::test]
    async fn test_deleted_queue_uses_configured_page_size() {
        let service = service_with(MockTopicQuery::new(vec![]));

        let result = service.deleted(1).await.unwrap();

        assert_eq!(result.per_page, 25);
    }

    #[tokio::test]
    async fn test_selected_returns_matching_records() {
        let query = MockTopicQuery::new(vec![record(1), record(2), record(3)]);
        let service = service_with(query);

        let result = service.selected(&[1, 3]).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[1].id, 3);
    }

    #[tokio::test]
    async fn test_selected_rejects_an_empty_list() {
        let query = MockTopicQuery::new(vec![]);
        let service = service_with(query.clone());

        let result = service.selected(&[]).await;

        assert!(matches!(result, Err(ModerationQueuesError::EmptyIdList)));
        assert_eq!(query.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_selected_rejects_invalid_ids_before_querying() {
        let query = MockTopicQuery::new(vec![record(1)]);
        let service = service_with(query.clone());

        let result = service.selected(&[1, 0]).await;

        assert!(matches!(
            result,
            Err(ModerationQueuesError::InvalidId(InvalidId::NotPositive(0)))
        ));
        assert_eq!(query.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_service_is_cloneable() {
        let service = service_with(MockTopicQuery::new(vec![]));

        let _ = service.clone();
    }
}
