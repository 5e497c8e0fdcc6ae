//! HTTP server for the Ludex game shelf.
//!
//! Exposes the CRUD API over the record store, accepts multipart image
//! uploads, and serves stored images as static assets under `/images`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::LudexServer;
