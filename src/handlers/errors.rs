/// Fallback handlers for unmatched routes.
use actix_web::{HttpRequest, HttpResponse};

/// Default service: 404 carrying the request path.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not found",
        "path": req.path(),
        "status": 404,
    }))
}
