mod access_policy;
mod topic_query;
mod topic_repository;

pub use access_policy::{AccessPolicy, DeletedVisibility};
pub use topic_query::{
    BoardRef, CategoryRef, PageRequest, PageResult, PostView, TopicQuery, TopicQueryError,
    TopicView, TopicWithPosts, UserRef,
};
pub use topic_repository::{TopicRecord, TopicRepository, TopicRepositoryError};
