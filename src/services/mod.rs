/// Business logic layer.
///
/// Services own the rules the repositories don't: feed assembly and
/// paging, the self-follow guard, form validation ordering, image
/// persistence. Handlers stay thin orchestration over these.
pub mod comments;
pub mod feed;
pub mod follow;
pub mod posts;

pub use comments::CommentService;
pub use feed::FeedService;
pub use follow::FollowService;
pub use posts::PostService;
