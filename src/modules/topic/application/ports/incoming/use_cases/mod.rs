mod browse_board;
mod moderate_topic;
mod moderation_queues;
mod show_topic;

pub use browse_board::{BrowseBoardError, BrowseBoardUseCase};
pub use moderate_topic::{ModerateTopicError, ModerateTopicUseCase};
pub use moderation_queues::{ModerationQueuesError, ModerationQueuesUseCase};
pub use show_topic::{ShowTopicError, ShowTopicUseCase};
