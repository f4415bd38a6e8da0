use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::forms::CommentForm;
use crate::models::Comment;

/// Comment creation against a resolved parent post.
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validate and persist a comment on `/{username}/{post_id}`.
    /// The parent post must exist under that author.
    pub async fn add_comment(
        &self,
        username: &str,
        post_id: Uuid,
        author_id: Uuid,
        form: &CommentForm,
    ) -> Result<Comment> {
        let post = post_repo::find_post_view_for_author(&self.pool, post_id, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} by '{}'", post_id, username)))?;

        form.validate()?;

        let comment =
            comment_repo::create_comment(&self.pool, post.id, author_id, form.text.trim()).await?;

        tracing::info!(comment_id = %comment.id, post_id = %post.id, "comment created");
        Ok(comment)
    }
}
