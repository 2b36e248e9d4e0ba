//! HTTP API
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `POST` | `/prompt` | fan-out, aggregate and cache |
//! | `GET` | `/prompt/compare-latest` | comparison of the cached responses |
//! | `GET` | `/prompt/latest` | the cached aggregation |
//! | `GET` | `/connectors` | registered connectors |
//! | `GET` | `/health` | `OK` |

mod error;
mod handlers;
mod routes;
mod server;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{ConnectorsResponse, PromptBody};
pub use routes::routes;
pub use server::{AppState, router, serve};
