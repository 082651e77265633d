//! Intake HTTP API.
//!
//! Exposes the questionnaire workflow as JSON endpoints. The router is
//! composable: `intake_router()` returns a `Router` that can be mounted on
//! any axum server, and `server` wraps it in a start/stop lifecycle.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod redact;
pub mod router;
pub mod server;
pub mod types;

pub use router::intake_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
