/// Feed handlers - global, group, and personalized feeds.
use actix_web::{http::header::ContentType, web, HttpResponse};
use sqlx::PgPool;

use crate::cache::PageCache;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::pagination::PageQuery;
use crate::services::FeedService;

/// Global feed. Responses are served from the full-page cache within
/// its TTL; a post created inside the window only shows up once the
/// entry expires or is invalidated.
pub async fn index(
    pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let requested = query.page.unwrap_or(1);

    match cache.get("/", requested).await {
        Ok(Some(body)) => {
            return Ok(HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(body));
        }
        Ok(None) => {}
        Err(err) => tracing::warn!("page cache read failed: {}", err),
    }

    let page = FeedService::new((**pool).clone())
        .global_feed(query.page)
        .await?;
    let body = serde_json::to_string(&serde_json::json!({ "page": page }))?;

    if let Err(err) = cache.set("/", requested, &body).await {
        tracing::warn!("page cache write failed: {}", err);
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Posts scoped to a group; 404 when the slug is unknown.
pub async fn group_feed(
    pool: web::Data<PgPool>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (group, page) = FeedService::new((**pool).clone())
        .group_feed(&slug, query.page)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "group": group,
        "page": page,
    })))
}

/// Personalized feed of followed authors; authentication required.
pub async fn following_feed(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = FeedService::new((**pool).clone())
        .following_feed(user.id, query.page)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "page": page })))
}
