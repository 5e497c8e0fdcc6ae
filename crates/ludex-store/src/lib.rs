//! Record storage for the Ludex game shelf.
//!
//! This crate owns the authoritative collection of game entries and its
//! durable mirror: a single pretty-printed JSON file that is rewritten in
//! full after every mutation. It also owns the image blob store that the
//! record lifecycle is tied to (an entry's image is deleted together with
//! the entry).
//!
//! # Key Types
//!
//! - [`ShelfStore`] — CRUD interface over the game collection
//! - [`JsonShelfStore`] — the JSON-file-backed implementation
//! - [`ImageStore`] — blob storage keyed by generated file name
//! - [`DirImageStore`] — directory-backed implementation
//!
//! # Design Rules
//!
//! 1. The collection is the unit of persistence: snapshots are always
//!    complete, never partial diffs.
//! 2. Mutations hold the write lock across both the in-memory change and
//!    the snapshot write, so a completed operation never leaves memory and
//!    disk disagreeing.
//! 3. A failed snapshot write rolls the in-memory change back and
//!    propagates the error.
//! 4. A missing or unparsable data file at open time degrades to an empty
//!    collection; it is never an error.
//! 5. Blob deletion failures are warnings, not operation failures.

pub mod error;
pub mod images;
pub mod shelf;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use images::DirImageStore;
pub use shelf::JsonShelfStore;
pub use traits::{ImageStore, ShelfStore};
