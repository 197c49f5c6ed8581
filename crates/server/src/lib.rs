//! Mercado catalog server library.
//!
//! REST backend for the product catalog: `SQLite` persistence, image
//! uploads and static file serving. Exposed as a library so the router can
//! be driven directly in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod uploads;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
