/// Follow handlers - subscribe/unsubscribe, both idempotent.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use super::redirect;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::services::posts::resolve_username;
use crate::services::FollowService;

/// Follow an author, then redirect to their profile.
pub async fn follow_author(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let author = resolve_username(&pool, &username).await?;
    FollowService::new((**pool).clone())
        .subscribe(user.id, author.id)
        .await?;

    Ok(redirect(&format!("/{}", author.username)))
}

/// Unfollow an author, then redirect to their profile.
pub async fn unfollow_author(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let author = resolve_username(&pool, &username).await?;
    FollowService::new((**pool).clone())
        .unsubscribe(user.id, author.id)
        .await?;

    Ok(redirect(&format!("/{}", author.username)))
}
