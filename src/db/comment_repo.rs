use crate::models::{Comment, CommentView};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, author_id, text)
        VALUES ($1, $2, $3)
        RETURNING id, text, author_id, post_id, created_at
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// All comments on a post, oldest first
pub async fn list_comments_by_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentView>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentView>(
        r#"
        SELECT c.id, c.text, c.author_id, u.username AS author_username,
               c.post_id, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
