//! Foundation types for the Ludex game shelf.
//!
//! This crate provides the record types shared by the store, the HTTP
//! server, and the CLI. Every other Ludex crate depends on `ludex-types`.
//!
//! # Key Types
//!
//! - [`GameId`] — Unique numeric identifier assigned by the store
//! - [`Game`] — One tracked game entry with its metadata and image name
//! - [`GameStatus`] — Closed completion-status enumeration
//! - [`GameDraft`] — Input for creating a new entry
//! - [`GamePatch`] — Partial update where "absent" and "cleared" differ

pub mod error;
pub mod game;
pub mod id;

pub use error::TypeError;
pub use game::{Game, GameDraft, GamePatch, GameStatus};
pub use id::GameId;
