//! HTTP gateway in front of the agent.
//!
//! - `GET /health` - liveness probe
//! - `POST /api/chat` - run one message through the agent
//! - `GET /api/agent` - describe the configured agent
//! - anything else - prebuilt UI assets

mod error;
mod routes;
pub mod types;

pub use error::{ApiError, MESSAGE_REQUIRED};
pub use routes::{router, serve, AppState};
