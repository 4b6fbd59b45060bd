//! # Answer Cache Module
//!
//! Semantic reuse of previous Messari answers through the host knowledge store.
//!
//! ## Overview
//!
//! Users phrase the same request in many ways ("ETH price", "price of ETH"),
//! so answers are matched by embedding similarity rather than by exact
//! question text. Market data goes stale quickly, so a match is only reused
//! while it is younger than the configured TTL. Staleness is decided at read
//! time; records are never deleted by this crate.
//!
//! Cache unavailability never fails the pipeline. A failed lookup is a miss
//! and a failed write is logged and forgotten.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`MemoryCache`] | `find_relevant` / `store` over the host runtime |
//! | [`CacheStats`] | Hit, miss, stale, store and error counters |
//! | [`is_fresh`] | The freshness rule applied to every match |

mod freshness;
mod manager;

pub use freshness::is_fresh;
pub use manager::{CacheStats, MemoryCache, MEMORY_SOURCE, SIMILARITY_THRESHOLD};
