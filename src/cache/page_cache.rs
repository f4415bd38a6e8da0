use std::time::Duration;

use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::debug;

use crate::error::Result;

/// Full-page response cache for the global feed, backed by Redis.
///
/// Entries hold the serialized response body keyed by route path and
/// page number and expire after the configured TTL (20 seconds by
/// default). Staleness within the window is accepted; entries can
/// also be dropped explicitly with `invalidate`.
#[derive(Clone)]
pub struct PageCache {
    redis: ConnectionManager,
    ttl: Duration,
}

impl PageCache {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            redis,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    fn page_key(path: &str, page: i64) -> String {
        format!("page:v1:{}?page={}", path, page)
    }

    pub async fn get(&self, path: &str, page: i64) -> Result<Option<String>> {
        let key = Self::page_key(path, page);
        let mut conn = self.redis.clone();
        let body: Option<String> = conn.get(&key).await?;
        debug!(
            key = %key,
            hit = body.is_some(),
            "page cache read"
        );
        Ok(body)
    }

    pub async fn set(&self, path: &str, page: i64, body: &str) -> Result<()> {
        let key = Self::page_key(path, page);
        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(&key, body, self.ttl.as_secs())
            .await?;
        debug!(key = %key, ttl = ?self.ttl, "page cache write");
        Ok(())
    }

    /// Drop a cached page before its TTL runs out.
    pub async fn invalidate(&self, path: &str, page: i64) -> Result<()> {
        let key = Self::page_key(path, page);
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(&key).await?;
        debug!(key = %key, "page cache invalidate");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_route_and_page_scoped() {
        assert_eq!(PageCache::page_key("/", 1), "page:v1:/?page=1");
        assert_eq!(PageCache::page_key("/", 2), "page:v1:/?page=2");
        assert_ne!(PageCache::page_key("/", 1), PageCache::page_key("/", 2));
    }
}
