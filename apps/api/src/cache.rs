//! Cache freshness policy shared by the repository and blog endpoints.
//!
//! Cached data younger than [`CACHE_TTL_SECS`] is served verbatim and the
//! upstream is not contacted at all; anything else (missing document, stale
//! document, unreadable timestamp, store failure) falls through to a live
//! fetch, after which the cache is rewritten best-effort.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::store::{CacheStore, StoreError};

/// Cached collections older than this are refetched. One upstream call per
/// owner per hour, at most.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Parses a stored `updated_at` value. The store serializes RFC 3339, but a
/// document written by another layer may carry RFC 2822 instead; both are
/// accepted. Anything else is unparseable and the caller treats it as stale.
pub fn parse_updated_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// True iff `updated_at` parses and is younger than the TTL.
pub fn is_fresh(updated_at: &str, now: DateTime<Utc>) -> bool {
    match parse_updated_at(updated_at) {
        Some(ts) => (now - ts).num_seconds() < CACHE_TTL_SECS,
        None => false,
    }
}

/// Serves `(kind, owner)` from the cache when fresh, otherwise runs `fetch`
/// and rewrites the cache with its result.
///
/// Store failures never fail the request: a read failure degrades to the
/// fetch, a write failure is logged and the fresh data is returned anyway.
pub async fn cached_or_fetch<T, F, Fut>(
    store: &CacheStore,
    kind: &str,
    owner: &str,
    fetch: F,
) -> Result<Vec<T>, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, AppError>>,
{
    match store.read_collection::<T>(kind, owner).await {
        Ok(Some(cached)) if is_fresh(&cached.updated_at, Utc::now()) => {
            debug!("Cache hit for {kind}:{owner}");
            return Ok(cached.items);
        }
        Ok(Some(_)) => debug!("Cache stale for {kind}:{owner}"),
        Ok(None) => debug!("Cache miss for {kind}:{owner}"),
        Err(StoreError::Unavailable) => {}
        Err(e) => warn!("Cache read failed for {kind}:{owner}: {e}"),
    }

    let items = fetch().await?;

    match store.write_collection(kind, owner, &items).await {
        Ok(()) => debug!("Cache updated for {kind}:{owner}"),
        Err(StoreError::Unavailable) => {}
        Err(e) => warn!("Cache write failed for {kind}:{owner}: {e}"),
    }

    Ok(items)
}
