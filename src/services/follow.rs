use sqlx::PgPool;
use uuid::Uuid;

use crate::db::follow_repo;
use crate::error::Result;

/// Subscribe/unsubscribe management for follow edges.
///
/// Both operations are idempotent; the unique (user, author) pair is
/// enforced by the schema, the self-follow guard lives here.
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the (user, author) edge. Self-follow is a silent no-op;
    /// returns true only when a new edge was inserted.
    pub async fn subscribe(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        if user_id == author_id {
            tracing::debug!(user = %user_id, "self-follow ignored");
            return Ok(false);
        }

        Ok(follow_repo::create_follow(&self.pool, user_id, author_id).await?)
    }

    /// Remove the edge if present; returns true when one was removed.
    pub async fn unsubscribe(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        Ok(follow_repo::delete_follow(&self.pool, user_id, author_id).await?)
    }
}
