/// HTTP request handlers.
///
/// Handlers are thin orchestration: resolve entities, enforce the
/// authentication gate through extractors, validate input, call the
/// service layer, respond. Static routes must be registered before
/// the `/{username}` tree or they would be shadowed.
pub mod comments;
pub mod errors;
pub mod feed;
pub mod follow;
pub mod posts;

use actix_web::{http::header, web, HttpResponse};

pub use comments::add_comment;
pub use errors::not_found;
pub use feed::{following_feed, group_feed, index};
pub use follow::{follow_author, unfollow_author};
pub use posts::{create_post, edit_post_form, new_post_form, post_detail, profile, update_post};

/// 302 redirect, the shape every successful mutation responds with.
pub(crate) fn redirect(to: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, to))
        .finish()
}

/// Route table, shared by the binary and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // A malformed post id is an unknown resource, not a bad request.
    cfg.app_data(web::PathConfig::default().error_handler(|_err, req| {
        crate::error::AppError::NotFound(format!("path '{}'", req.path())).into()
    }));
    cfg.route("/", web::get().to(index))
        .route("/new", web::get().to(new_post_form))
        .route("/new", web::post().to(create_post))
        .route("/follow", web::get().to(following_feed))
        .route("/group/{slug}", web::get().to(group_feed))
        .route("/{username}/follow", web::get().to(follow_author))
        .route("/{username}/unfollow", web::get().to(unfollow_author))
        .route("/{username}/{post_id}/edit", web::get().to(edit_post_form))
        .route("/{username}/{post_id}/edit", web::post().to(update_post))
        .route("/{username}/{post_id}/comment", web::post().to(add_comment))
        .route("/{username}/{post_id}", web::get().to(post_detail))
        .route("/{username}", web::get().to(profile));
}
