use async_trait::async_trait;

use crate::config::ModerationConfig;
use crate::modules::topic::application::{
    domain::entities::{TopicId, UserId},
    ports::incoming::use_cases::{ShowTopicError, ShowTopicUseCase},
    ports::outgoing::{AccessPolicy, TopicQuery, TopicQueryError, TopicView, TopicWithPosts},
};

#[derive(Debug, Clone)]
pub struct ShowTopicService<Q, P>
where
    Q: TopicQuery,
    P: AccessPolicy,
{
    query: Q,
    policy: P,
    config: ModerationConfig,
}

impl<Q, P> ShowTopicService<Q, P>
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

    async fn can_view_deleted(&self, actor: Option<&UserId>) -> bool {
        self.config.deleted_topics.resolve(&self.policy, actor).await
    }
}

fn map_query_err(e: TopicQueryError) -> ShowTopicError {
    match e {
        TopicQueryError::NotFound => ShowTopicError::NotFound,
        TopicQueryError::DatabaseError(msg) => ShowTopicError::QueryFailed(msg),
    }
}

#[async_trait]
impl<Q, P> ShowTopicUseCase for ShowTopicService<Q, P>
where
    Q: TopicQuery,
    P: AccessPolicy,
{
    async fn show(
        &self,
        topic_id: &str,
        actor: Option<&UserId>,
    ) -> Result<TopicView, ShowTopicError> {
        let id = TopicId::parse(topic_id)?;
        let can_view_deleted = self.can_view_deleted(actor).await;

        self.query
            .by_id_with_context(id, can_view_deleted)
            .await
            .map_err(map_query_err)
    }

    async fn show_with_posts(
        &self,
        topic_id: &str,
        actor: Option<&UserId>,
    ) -> Result<TopicWithPosts, ShowTopicError> {
        let id = TopicId::parse(topic_id)?;
        let can_view_deleted = self.can_view_deleted(actor).await;

        self.query
            .by_id_with_posts(id, can_view_deleted)
            .await
            .map_err(map_query_err)
    }

    async fn post_count(&self, topic_id: &str) -> Result<Option<u64>, ShowTopicError> {
        let id = TopicId::parse(topic_id)?;

        Ok(self.query.post_count(id).await)
    }
}
