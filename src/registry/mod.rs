pub mod engine;
pub mod topic;

pub use engine::Registry;
pub use topic::{Callback, Identifier, Subscription, Token, Topic, TopicInfo};
