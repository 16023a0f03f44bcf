//! Response types for HTTP handlers.

mod error_response;
mod monitor;
mod recommend;

pub use error_response::ErrorResponse;
pub use monitor::{DependencyStatus, LIVENESS_MESSAGE, Liveness, MonitorStatus};
pub use recommend::{RecommendResponse, RecommendedProduct};
