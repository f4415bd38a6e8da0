use crate::models::Group;
use sqlx::PgPool;

/// Find a group by its slug
pub async fn find_group_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, slug, title, description
        FROM groups
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// Find a group by id
pub async fn find_group_by_id(
    pool: &PgPool,
    group_id: uuid::Uuid,
) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, slug, title, description
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// Create a group
pub async fn create_group(
    pool: &PgPool,
    slug: &str,
    title: &str,
    description: Option<&str>,
) -> Result<Group, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (slug, title, description)
        VALUES ($1, $2, $3)
        RETURNING id, slug, title, description
        "#,
    )
    .bind(slug)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(group)
}

/// Delete a group; its posts are detached, never deleted
pub async fn delete_group(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM groups WHERE slug = $1")
        .bind(slug)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
