/// Post handlers - creation, profile, detail, and editing.
use actix_multipart::form::{bytes::Bytes as UploadBytes, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use super::redirect;
use crate::error::Result;
use crate::forms::{ImageUpload, PostForm};
use crate::media::MediaStore;
use crate::middleware::CurrentUser;
use crate::pagination::PageQuery;
use crate::services::{FeedService, PostService};

/// Multipart body of the create/edit post form.
#[derive(Debug, MultipartForm)]
pub struct PostUpload {
    pub text: Option<Text<String>>,
    pub group_id: Option<Text<Uuid>>,
    pub image: Option<UploadBytes>,
}

impl PostUpload {
    fn into_form(self) -> PostForm {
        PostForm {
            text: self.text.map(|t| t.0).unwrap_or_default(),
            group_id: self.group_id.map(|t| t.0),
            // Browsers submit an empty file part when nothing was picked.
            image: self.image.filter(|b| !b.data.is_empty()).map(|b| ImageUpload {
                data: b.data.to_vec(),
                file_name: b.file_name,
            }),
        }
    }
}

fn post_path(username: &str, post_id: Uuid) -> String {
    format!("/{}/{}", username, post_id)
}

/// Empty create form; authentication required.
pub async fn new_post_form(_user: CurrentUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "form": { "text": "", "group_id": null, "image": null },
    })))
}

/// Validate and create a post, then redirect to the global feed.
pub async fn create_post(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    user: CurrentUser,
    MultipartForm(upload): MultipartForm<PostUpload>,
) -> Result<HttpResponse> {
    let form = upload.into_form();
    let service = PostService::new((**pool).clone(), (**media).clone());
    service.create_post(user.id, &form).await?;

    Ok(redirect("/"))
}

/// Author profile: their paginated posts plus profile counters.
pub async fn profile(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
    requester: Option<CurrentUser>,
) -> Result<HttpResponse> {
    let feed = FeedService::new((**pool).clone())
        .author_feed(&username, query.page, requester.map(|u| u.id))
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "author": feed.author,
        "page": feed.page,
        "post_count": feed.post_count,
        "follower_count": feed.follower_count,
        "following": feed.requester_follows,
    })))
}

/// Post detail: the post, its comments, and an empty comment form.
pub async fn post_detail(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let service = PostService::new((**pool).clone(), (**media).clone());
    let detail = service.post_detail(&username, post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "post": detail.post,
        "comments": detail.comments,
        "author_post_count": detail.author_post_count,
        "form": { "text": "" },
    })))
}

/// Prefilled edit form. Only the author may edit; anyone else is
/// redirected to the read-only view rather than rejected.
pub async fn edit_post_form(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    path: web::Path<(String, Uuid)>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let service = PostService::new((**pool).clone(), (**media).clone());
    let post = service.get_post_for_author(&username, post_id).await?;

    if post.author_id != user.id {
        return Ok(redirect(&post_path(&username, post_id)));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "form": {
            "text": post.text,
            "group_id": post.group_id,
            "image": post.image,
        },
        "post": post,
    })))
}

/// Validate and apply an edit, then redirect to the post view.
/// Non-authors get the same soft redirect as the edit form.
pub async fn update_post(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    path: web::Path<(String, Uuid)>,
    user: CurrentUser,
    MultipartForm(upload): MultipartForm<PostUpload>,
) -> Result<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let service = PostService::new((**pool).clone(), (**media).clone());
    let post = service.get_post_for_author(&username, post_id).await?;

    if post.author_id != user.id {
        return Ok(redirect(&post_path(&username, post_id)));
    }

    let form = upload.into_form();
    service.update_post(post.id, &form).await?;

    Ok(redirect(&post_path(&username, post_id)))
}
