use ludex_types::{Game, GameDraft, GameId, GamePatch};

use crate::error::StoreResult;

/// CRUD interface over the game collection.
///
/// All implementations must satisfy these invariants:
/// - Insertion order is preserved; `list` returns entries in the order they
///   were added.
/// - Ids are unique and never reused within one backing store.
/// - Mutations are serialized: no lost updates, and a read that starts
///   after a mutation completes sees its effect.
/// - Every mutation is mirrored to durable storage before it returns.
pub trait ShelfStore: Send + Sync {
    /// The full collection, in insertion order. No side effects.
    fn list(&self) -> StoreResult<Vec<Game>>;

    /// Create a new entry from `draft` and return it with its assigned id.
    ///
    /// Fails with [`StoreError::MissingImage`] when the draft carries no
    /// resolved image blob name.
    ///
    /// [`StoreError::MissingImage`]: crate::StoreError::MissingImage
    fn add(&self, draft: GameDraft) -> StoreResult<Game>;

    /// Apply the supplied fields of `patch` to the entry with this id.
    ///
    /// Absent fields keep their stored value. Returns the updated entry, or
    /// [`StoreError::NotFound`] when the id is unknown.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    fn update(&self, id: GameId, patch: GamePatch) -> StoreResult<Game>;

    /// Delete the entry with this id together with its image blob.
    ///
    /// A blob that cannot be deleted (already missing, permission trouble)
    /// is logged and does not fail the removal.
    fn remove(&self, id: GameId) -> StoreResult<()>;
}

/// Blob storage for uploaded images, keyed by generated file name.
///
/// Names are opaque to callers: `put` generates a collision-resistant name
/// that preserves the original file extension, and every other operation
/// takes that name back. Implementations must reject names that would
/// escape the storage root.
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under a freshly generated name and return the name.
    ///
    /// `original_name` is only consulted for its extension.
    fn put(&self, original_name: &str, bytes: &[u8]) -> StoreResult<String>;

    /// Delete a stored blob. Returns `Ok(false)` when it was already gone.
    fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Check whether a blob with this name exists.
    fn exists(&self, name: &str) -> StoreResult<bool>;
}
