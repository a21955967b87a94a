//! HTTP API for the league simulator.
//!
//! Exposes the engine's operations and analytics as JSON over HTTP:
//!
//! - **Lifecycle** -- init, play one week, play all, reset
//! - **Reads** -- standings, matches, fixtures, status
//! - **Edits** -- retroactive result changes by id or by week and teams
//! - **Analytics** -- team analysis, league overview, head-to-head
//! - **Export** -- match history for the prediction service
//!
//! # Architecture
//!
//! ```text
//! Client --HTTP--> Router --> handlers --> League (league-core)
//!                                             |
//!                                        LeagueStore
//! ```
//!
//! # Modules
//!
//! - [`error`] -- Error-to-response mapping
//! - [`handlers`] -- Endpoint handlers
//! - [`router`] -- Router construction with CORS and tracing
//! - [`server`] -- Bind and serve
//! - [`state`] -- Shared application state

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
