//! Freshness rule for cached answers.

use std::time::Duration;
use tracing::warn;

/// Whether a record created at `created_at` (unix ms) is still reusable at `now`.
///
/// Age is `now - created_at` and the record is fresh while `age <= ttl`.
/// A record without a timestamp has unknown age and is stale. A timestamp in
/// the future (clock skew between writer and reader) counts as age zero.
pub fn is_fresh(created_at: Option<i64>, now: i64, ttl: Duration) -> bool {
    let Some(created_at) = created_at else {
        return false;
    };
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    let age = now.saturating_sub(created_at);
    if age < 0 {
        warn!(
            created_at,
            now,
            skew_ms = -age,
            "Cached memory timestamp is in the future; treating as fresh"
        );
        return true;
    }
    age <= ttl_ms
}
