//! Outbound HTTP plumbing: request pacing, retry policies and backoff

pub mod rate_limit_client;
pub mod retry;
pub mod retry_policy;
pub mod supabase_client;

pub use rate_limit_client::RateLimitClient;
pub use retry::with_retry;
pub use retry_policy::{RateLimitInfo, RetryPolicy};
pub use supabase_client::SupabaseClient;
