/// Comment handlers.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use super::redirect;
use crate::error::Result;
use crate::forms::CommentForm;
use crate::middleware::CurrentUser;
use crate::services::CommentService;

/// Add a comment to a post, then redirect back to the post view.
/// Unauthenticated callers are redirected to login before anything
/// is validated or written.
pub async fn add_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(String, Uuid)>,
    user: CurrentUser,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    service
        .add_comment(&username, post_id, user.id, &form)
        .await?;

    Ok(redirect(&format!("/{}/{}", username, post_id)))
}
