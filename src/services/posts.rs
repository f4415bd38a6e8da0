/// Post service - creation, editing, and the detail view.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::forms::PostForm;
use crate::media::MediaStore;
use crate::models::{CommentView, Post, PostView};

pub struct PostService {
    pool: PgPool,
    media: MediaStore,
}

/// Everything the post detail view shows: the post, its comments, and
/// the author's total post count.
#[derive(Debug)]
pub struct PostDetail {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub author_post_count: i64,
}

impl PostService {
    pub fn new(pool: PgPool, media: MediaStore) -> Self {
        Self { pool, media }
    }

    /// Validate the form and persist a new post. The image, if any,
    /// must sniff as a real image before anything is written.
    pub async fn create_post(&self, author_id: Uuid, form: &PostForm) -> Result<Post> {
        form.validate()?;
        let group_id = self.resolve_group(form.group_id).await?;

        let image_key = match &form.image {
            Some(upload) => Some(self.media.store_image(upload).await?),
            None => None,
        };

        let post = post_repo::create_post(
            &self.pool,
            author_id,
            form.text.trim(),
            group_id,
            image_key.as_deref(),
        )
        .await?;

        tracing::info!(post_id = %post.id, author = %author_id, "post created");
        Ok(post)
    }

    /// Validate the form and update text/group of an existing post.
    /// A missing image field preserves the stored image unchanged.
    pub async fn update_post(&self, post_id: Uuid, form: &PostForm) -> Result<Post> {
        form.validate()?;
        let group_id = self.resolve_group(form.group_id).await?;

        let image_key = match &form.image {
            Some(upload) => Some(self.media.store_image(upload).await?),
            None => None,
        };

        let post = post_repo::update_post(
            &self.pool,
            post_id,
            form.text.trim(),
            group_id,
            image_key.as_deref(),
        )
        .await?;

        tracing::info!(post_id = %post.id, "post updated");
        Ok(post)
    }

    /// Resolve a post addressed as `/{username}/{post_id}`; a post
    /// whose author does not match the username is NotFound.
    pub async fn get_post_for_author(&self, username: &str, post_id: Uuid) -> Result<PostView> {
        post_repo::find_post_view_for_author(&self.pool, post_id, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} by '{}'", post_id, username)))
    }

    /// The detail view: post, comments, author's post count.
    pub async fn post_detail(&self, username: &str, post_id: Uuid) -> Result<PostDetail> {
        let post = self.get_post_for_author(username, post_id).await?;
        let comments = comment_repo::list_comments_by_post(&self.pool, post.id).await?;
        let author_post_count = post_repo::count_posts_by_author(&self.pool, post.author_id).await?;

        Ok(PostDetail {
            post,
            comments,
            author_post_count,
        })
    }

    /// A referenced group must exist; a dangling reference is form
    /// rejection, not a server error.
    async fn resolve_group(&self, group_id: Option<Uuid>) -> Result<Option<Uuid>> {
        match group_id {
            None => Ok(None),
            Some(id) => match group_repo::find_group_by_id(&self.pool, id).await? {
                Some(group) => Ok(Some(group.id)),
                None => Err(AppError::validation("group", "unknown group")),
            },
        }
    }
}

/// Resolve a username or fail with NotFound, shared by follow routes.
pub async fn resolve_username(pool: &PgPool, username: &str) -> Result<crate::models::User> {
    user_repo::find_user_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))
}
