/// Shared application layer patterns used across modules.
pub mod pagination;

pub use pagination::*;
