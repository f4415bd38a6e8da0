/// Feed assembly - ordered, paginated post listings.
///
/// Four views over the same candidate logic: global, by group, by
/// author, and the personalized feed of followed authors. Ordering is
/// strictly newest-first with a stable tiebreaker; page numbers clamp
/// to the valid range instead of erroring.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Group, PostView, User};
use crate::pagination::{clamp_page, offset, Page, PAGE_SIZE};

pub struct FeedService {
    pool: PgPool,
}

/// Author feed plus the profile data the view needs alongside it.
#[derive(Debug)]
pub struct AuthorFeed {
    pub author: User,
    pub page: Page<PostView>,
    pub post_count: i64,
    pub follower_count: i64,
    /// Whether the requesting user follows this author, when known
    pub requester_follows: Option<bool>,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All posts, newest first
    pub async fn global_feed(&self, requested_page: Option<i64>) -> Result<Page<PostView>> {
        let total = post_repo::count_posts(&self.pool).await?;
        let number = clamp_page(requested_page, total);
        let items = post_repo::list_posts(&self.pool, PAGE_SIZE, offset(number)).await?;

        Ok(Page::new(items, number, total))
    }

    /// Posts scoped to a group; unknown slugs are NotFound
    pub async fn group_feed(
        &self,
        slug: &str,
        requested_page: Option<i64>,
    ) -> Result<(Group, Page<PostView>)> {
        let group = group_repo::find_group_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group '{}'", slug)))?;

        let total = post_repo::count_posts_by_group(&self.pool, group.id).await?;
        let number = clamp_page(requested_page, total);
        let items =
            post_repo::list_posts_by_group(&self.pool, group.id, PAGE_SIZE, offset(number)).await?;

        Ok((group, Page::new(items, number, total)))
    }

    /// An author's posts plus profile counters; unknown usernames are NotFound
    pub async fn author_feed(
        &self,
        username: &str,
        requested_page: Option<i64>,
        requester: Option<Uuid>,
    ) -> Result<AuthorFeed> {
        let author = user_repo::find_user_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;

        let post_count = post_repo::count_posts_by_author(&self.pool, author.id).await?;
        let number = clamp_page(requested_page, post_count);
        let items =
            post_repo::list_posts_by_author(&self.pool, author.id, PAGE_SIZE, offset(number))
                .await?;

        let follower_count = follow_repo::count_followers(&self.pool, author.id).await?;
        let requester_follows = match requester {
            Some(user_id) => {
                Some(follow_repo::follow_exists(&self.pool, user_id, author.id).await?)
            }
            None => None,
        };

        Ok(AuthorFeed {
            page: Page::new(items, number, post_count),
            author,
            post_count,
            follower_count,
            requester_follows,
        })
    }

    /// Posts from every author the user follows
    pub async fn following_feed(
        &self,
        user_id: Uuid,
        requested_page: Option<i64>,
    ) -> Result<Page<PostView>> {
        let total = post_repo::count_following_posts(&self.pool, user_id).await?;
        let number = clamp_page(requested_page, total);
        let items =
            post_repo::list_following_posts(&self.pool, user_id, PAGE_SIZE, offset(number)).await?;

        Ok(Page::new(items, number, total))
    }
}
