//! Memory cache adapter.

use super::freshness::is_fresh;
use crate::host::{Embedder, KnowledgeStore};
use crate::types::{ConversationScope, MemoryContent, MemoryRecord, SearchOptions};
use crate::utils::now_millis;
use crate::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Minimum normalized similarity for a cached answer to count as relevant.
pub const SIMILARITY_THRESHOLD: f32 = 0.8;

/// Source tag written on every record this crate creates.
pub const MEMORY_SOURCE: &str = "messari";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stale: u64,
    pub stores: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses + self.stale;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    stores: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale: AtomicU64::new(0),
            stores: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

enum Lookup {
    Hit { text: String, age_ms: i64 },
    Stale,
    Miss,
}

/// Reads and writes cached answers in the host knowledge store.
///
/// Holds no cached data itself; the counters are the only state.
#[derive(Clone)]
pub struct MemoryCache {
    similarity_threshold: f32,
    stats: Arc<AtomicStats>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            stats: Arc::new(AtomicStats::new()),
        }
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    /// A previous answer to a question similar to `question` in `scope`'s room,
    /// if one exists and is no older than `ttl`.
    ///
    /// Lookup failures are logged and reported as a miss.
    pub async fn find_relevant<R>(
        &self,
        runtime: &R,
        scope: &ConversationScope,
        question: &str,
        ttl: Duration,
    ) -> Option<String>
    where
        R: Embedder + KnowledgeStore + ?Sized,
    {
        match self.lookup(runtime, scope, question, ttl).await {
            Ok(Lookup::Hit { text, age_ms }) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                info!(question, memory_age_ms = age_ms, "Found relevant memory");
                Some(text)
            }
            Ok(Lookup::Stale) => {
                self.stats.stale.fetch_add(1, Ordering::Relaxed);
                debug!(question, "Relevant memory is older than the TTL");
                None
            }
            Ok(Lookup::Miss) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                error!(question, error = %e, "Error searching memories");
                None
            }
        }
    }

    async fn lookup<R>(
        &self,
        runtime: &R,
        scope: &ConversationScope,
        question: &str,
        ttl: Duration,
    ) -> Result<Lookup>
    where
        R: Embedder + KnowledgeStore + ?Sized,
    {
        let embedding = runtime.embed(question).await?;
        let memories = runtime
            .search_memories_by_embedding(
                &embedding,
                SearchOptions {
                    match_threshold: self.similarity_threshold,
                    count: 1,
                    room_id: scope.room_id,
                    unique: true,
                },
            )
            .await?;

        let Some(memory) = memories.into_iter().next() else {
            return Ok(Lookup::Miss);
        };
        let now = now_millis();
        if !is_fresh(memory.created_at, now, ttl) {
            return Ok(Lookup::Stale);
        }
        if memory.content.text.trim().is_empty() {
            return Ok(Lookup::Miss);
        }
        let age_ms = memory
            .created_at
            .map(|created| now.saturating_sub(created).max(0))
            .unwrap_or_default();
        Ok(Lookup::Hit {
            text: memory.content.text,
            age_ms,
        })
    }

    /// Persist `answer` for `question`. Failures are logged and swallowed.
    pub async fn store<R>(&self, runtime: &R, scope: &ConversationScope, question: &str, answer: &str)
    where
        R: KnowledgeStore + ?Sized,
    {
        let record = MemoryRecord::new(
            *scope,
            MemoryContent {
                text: answer.to_string(),
                source: MEMORY_SOURCE.to_string(),
                action: question.to_string(),
            },
            now_millis(),
        );
        match runtime.create_memory(record, true).await {
            Ok(()) => {
                self.stats.stores.fetch_add(1, Ordering::Relaxed);
                info!(question, "Stored response in memory");
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                error!(question, error = %e, "Error storing memory");
            }
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}
