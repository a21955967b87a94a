//! `Dragonfly` persistence for the league simulator.
//!
//! The engine talks to storage only through
//! [`LeagueStore`](league_core::LeagueStore). This crate implements that
//! contract on a Redis-compatible server:
//!
//! ```text
//! League --LeagueStore--> DragonflyStore --> DragonflyPool --> Dragonfly
//!                          (league keys)      (JSON + lists)
//! ```
//!
//! # Modules
//!
//! - [`dragonfly`] -- Connection handle and typed JSON/list primitives
//! - [`store`] -- League key layout and the `LeagueStore` implementation
//! - [`error`] -- Shared error types

pub mod dragonfly;
pub mod error;
pub mod store;

pub use dragonfly::DragonflyPool;
pub use error::DbError;
pub use store::{DEFAULT_NAMESPACE, DragonflyStore, Keys};
