//! Application services, state and dependency injection.

mod recommend;
mod state;

pub use crate::service::recommend::{RecommendService, Recommendations};
pub use crate::service::state::ServiceState;
