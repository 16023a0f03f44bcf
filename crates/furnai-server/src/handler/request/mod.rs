//! Request types for HTTP handlers.

mod recommend;

pub use recommend::{DEFAULT_TOP_K, MAX_TOP_K, RecommendRequest};
