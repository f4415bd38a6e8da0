use crate::models::{Post, PostView};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, text, group_id, image)
        VALUES ($1, $2, $3, $4)
        RETURNING id, text, author_id, group_id, image, created_at
        "#,
    )
    .bind(author_id)
    .bind(text)
    .bind(group_id)
    .bind(image)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Update a post's text and group; the image is replaced only when a
/// new key is supplied, otherwise it is preserved unchanged
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $2, group_id = $3, image = COALESCE($4, image)
        WHERE id = $1
        RETURNING id, text, author_id, group_id, image, created_at
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(group_id)
    .bind(image)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post with its author and group, requiring the author to
/// match the given username (the detail route 404s on mismatch)
pub async fn find_post_view_for_author(
    pool: &PgPool,
    post_id: Uuid,
    username: &str,
) -> Result<Option<PostView>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostView>(
        r#"
        SELECT p.id, p.text, p.author_id, u.username AS author_username,
               p.group_id, g.slug AS group_slug, g.title AS group_title,
               p.image, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.id = $1 AND u.username = $2
        "#,
    )
    .bind(post_id)
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// All posts, newest first
pub async fn list_posts(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(
        r#"
        SELECT p.id, p.text, p.author_id, u.username AS author_username,
               p.group_id, g.slug AS group_slug, g.title AS group_title,
               p.image, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        ORDER BY p.created_at DESC, p.seq DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count all posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Posts belonging to a group, newest first
pub async fn list_posts_by_group(
    pool: &PgPool,
    group_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(
        r#"
        SELECT p.id, p.text, p.author_id, u.username AS author_username,
               p.group_id, g.slug AS group_slug, g.title AS group_title,
               p.image, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.group_id = $1
        ORDER BY p.created_at DESC, p.seq DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts in a group
pub async fn count_posts_by_group(pool: &PgPool, group_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Posts by an author, newest first
pub async fn list_posts_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(
        r#"
        SELECT p.id, p.text, p.author_id, u.username AS author_username,
               p.group_id, g.slug AS group_slug, g.title AS group_title,
               p.image, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.author_id = $1
        ORDER BY p.created_at DESC, p.seq DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count an author's posts
pub async fn count_posts_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Posts authored by everyone the user follows, newest first
pub async fn list_following_posts(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostView>(
        r#"
        SELECT p.id, p.text, p.author_id, u.username AS author_username,
               p.group_id, g.slug AS group_slug, g.title AS group_title,
               p.image, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
        WHERE p.author_id IN (SELECT author_id FROM follows WHERE user_id = $1)
        ORDER BY p.created_at DESC, p.seq DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts in the personalized feed
pub async fn count_following_posts(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM posts
        WHERE author_id IN (SELECT author_id FROM follows WHERE user_id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Delete a post; its comments cascade away with it
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
