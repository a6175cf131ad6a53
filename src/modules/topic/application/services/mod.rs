mod browse_board_service;
mod moderate_topic_service;
mod moderation_queue_service;
mod show_topic_service;

pub use browse_board_service::BrowseBoardService;
pub use moderate_topic_service::ModerateTopicService;
pub use moderation_queue_service::ModerationQueueService;
pub use show_topic_service::ShowTopicService;
