mod registry;
mod room;
mod subscription;

pub use registry::ChannelRegistry;
pub use room::{Room, chat_room};
pub use subscription::SubscriptionTracker;
