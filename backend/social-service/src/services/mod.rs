pub mod engagement;
pub mod feed;
pub mod follow;

pub use engagement::EngagementService;
pub use feed::{FeedPage, FeedService};
pub use follow::FollowService;
