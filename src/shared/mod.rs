// Shared kernel: cross-module errors, config, infrastructure and utilities

pub mod application;    // Shared application patterns (pagination)
pub mod cache;          // Query cache and optimistic updates
pub mod config;         // Environment configuration
pub mod errors;         // Shared error types
pub mod http;           // Outbound HTTP pacing and retries
pub mod infrastructure; // Database pool
pub mod utils;          // Logging and validation

pub use config::AppConfig;
pub use infrastructure::database::Database;
