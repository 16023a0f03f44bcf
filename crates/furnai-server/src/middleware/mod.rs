//! Middleware for `axum::Router` and HTTP request processing.
//!
//! ```rust,no_run
//! use axum::Router;
//! use furnai_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterCorsExt, RouterObservabilityExt, RouterRecoveryExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_cors(&CorsConfig::default())
//!     .with_recovery(&RecoveryConfig::default())
//!     .with_observability();
//! ```

mod cors;
mod observability;
mod recovery;

pub use crate::middleware::cors::{CorsConfig, RouterCorsExt, create_cors_layer};
pub use crate::middleware::observability::RouterObservabilityExt;
pub use crate::middleware::recovery::{RecoveryConfig, RouterRecoveryExt};
