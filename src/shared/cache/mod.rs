//! Client-side query cache and optimistic mutation support

pub mod optimistic;
pub mod query_cache;

pub use optimistic::{mutate_optimistically, OptimisticUpdate};
pub use query_cache::{CacheStats, QueryCache, QueryOptions};
