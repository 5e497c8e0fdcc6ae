//! JSON-file-backed game collection.
//!
//! [`JsonShelfStore`] keeps the collection resident in memory behind a
//! `RwLock` and mirrors it to a single pretty-printed JSON file after every
//! mutation. Reads take the read lock; mutations hold the write lock across
//! both the in-memory change and the snapshot write, so a completed
//! operation never leaves memory and disk out of step.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use ludex_types::{Game, GameDraft, GameId, GamePatch};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::{ImageStore, ShelfStore};

struct ShelfState {
    games: Vec<Game>,
    /// Next id to assign. Seeded to one past the highest id in the loaded
    /// snapshot, so files created under the old timestamp-id scheme keep
    /// working.
    next_id: u64,
}

/// The JSON-file-backed implementation of [`ShelfStore`].
///
/// Owns the image store as well: an entry's blob is deleted together with
/// the entry, and a superseded blob is deleted when an update replaces the
/// image.
pub struct JsonShelfStore {
    path: PathBuf,
    images: Arc<dyn ImageStore>,
    state: RwLock<ShelfState>,
}

impl JsonShelfStore {
    /// Open the store backed by the snapshot file at `path`.
    ///
    /// A missing or unparsable file degrades to an empty collection and a
    /// fresh snapshot is written in its place; only an unwritable snapshot
    /// location is an error.
    pub fn open(path: impl Into<PathBuf>, images: Arc<dyn ImageStore>) -> StoreResult<Self> {
        let path = path.into();
        let games = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Game>>(&raw) {
                Ok(games) => Some(games),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "data file unparsable, starting empty");
                    None
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "creating new data file");
                None
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "data file unreadable, starting empty");
                None
            }
        };

        let (games, bootstrap) = match games {
            Some(games) => (games, false),
            None => (Vec::new(), true),
        };
        if bootstrap {
            write_snapshot(&path, &games)?;
        }

        let next_id = games.iter().map(|g| g.id.get()).max().map_or(1, |m| m + 1);
        Ok(Self {
            path,
            images,
            state: RwLock::new(ShelfState { games, next_id }),
        })
    }

    /// The snapshot file this store mirrors to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries currently on the shelf.
    pub fn len(&self) -> usize {
        self.state.read().expect("lock poisoned").games.len()
    }

    /// Returns `true` if the shelf holds no entries.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").games.is_empty()
    }

    fn delete_blob(&self, name: &str, context: &str) {
        match self.images.delete(name) {
            Ok(true) => debug!(name = %name, "{context} image deleted"),
            Ok(false) => warn!(name = %name, "{context} image already missing"),
            Err(err) => warn!(name = %name, error = %err, "failed to delete {context} image"),
        }
    }
}

/// Write the full collection as a pretty-printed JSON array, replacing the
/// previous snapshot in one rename.
fn write_snapshot(path: &Path, games: &[Game]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(games)?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| StoreError::Io(err.error))?;
    debug!(path = %path.display(), entries = games.len(), "snapshot written");
    Ok(())
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("title must not be empty".into()));
    }
    Ok(())
}

fn validate_hours(hours: f64) -> StoreResult<()> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(StoreError::Validation(format!(
            "hours must be a non-negative number, got {hours}"
        )));
    }
    Ok(())
}

impl ShelfStore for JsonShelfStore {
    fn list(&self) -> StoreResult<Vec<Game>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.games.clone())
    }

    fn add(&self, draft: GameDraft) -> StoreResult<Game> {
        let image = draft.image.ok_or(StoreError::MissingImage)?;
        validate_title(&draft.title)?;
        validate_hours(draft.hours)?;

        let mut state = self.state.write().expect("lock poisoned");
        let game = Game {
            id: GameId::new(state.next_id),
            image,
            title: draft.title,
            status: draft.status,
            hours: draft.hours,
            extra: draft.extra,
        };
        state.games.push(game.clone());
        if let Err(err) = write_snapshot(&self.path, &state.games) {
            state.games.pop();
            return Err(err);
        }
        state.next_id += 1;
        debug!(id = %game.id, title = %game.title, "game added");
        Ok(game)
    }

    fn update(&self, id: GameId, patch: GamePatch) -> StoreResult<Game> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(hours) = patch.hours {
            validate_hours(hours)?;
        }
        if let Some(image) = &patch.image {
            if image.is_empty() {
                return Err(StoreError::Validation("image name must not be empty".into()));
            }
        }

        let mut state = self.state.write().expect("lock poisoned");
        let idx = state
            .games
            .iter()
            .position(|g| g.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let before = state.games[idx].clone();
        let mut updated = before.clone();
        patch.apply_to(&mut updated);

        state.games[idx] = updated.clone();
        if let Err(err) = write_snapshot(&self.path, &state.games) {
            state.games[idx] = before;
            return Err(err);
        }

        // Delete-on-replace: once the new image name is durable, the old
        // blob has no referent left.
        if updated.image != before.image {
            self.delete_blob(&before.image, "superseded");
        }
        debug!(id = %id, "game updated");
        Ok(updated)
    }

    fn remove(&self, id: GameId) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        let idx = state
            .games
            .iter()
            .position(|g| g.id == id)
            .ok_or(StoreError::NotFound(id))?;

        self.delete_blob(&state.games[idx].image, "removed entry's");

        let game = state.games.remove(idx);
        if let Err(err) = write_snapshot(&self.path, &state.games) {
            state.games.insert(idx, game);
            return Err(err);
        }
        debug!(id = %id, "game removed");
        Ok(())
    }
}

impl std::fmt::Debug for JsonShelfStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonShelfStore")
            .field("path", &self.path)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::DirImageStore;
    use ludex_types::GameStatus;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> (JsonShelfStore, Arc<DirImageStore>) {
        let images = Arc::new(DirImageStore::open(dir.path().join("images")).unwrap());
        let store =
            JsonShelfStore::open(dir.path().join("games.json"), images.clone()).unwrap();
        (store, images)
    }

    fn draft(title: &str, image: Option<String>) -> GameDraft {
        GameDraft {
            image,
            title: title.to_string(),
            status: GameStatus::InProgress,
            hours: 3.0,
            extra: None,
        }
    }

    // -----------------------------------------------------------------------
    // Bootstrap
    // -----------------------------------------------------------------------

    #[test]
    fn missing_file_bootstraps_empty_and_creates_snapshot() {
        let dir = TempDir::new().unwrap();
        let (store, _images) = open_store(&dir);
        assert!(store.is_empty());
        let raw = fs::read_to_string(dir.path().join("games.json")).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("games.json"), "{not json").unwrap();
        let (store, _images) = open_store(&dir);
        assert!(store.is_empty());
        // The corrupt content was replaced by a valid empty snapshot.
        let raw = fs::read_to_string(dir.path().join("games.json")).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn counter_seeds_above_existing_ids() {
        let dir = TempDir::new().unwrap();
        let seeded = r#"[
  {
    "id": 1700000000000,
    "image": "old.png",
    "title": "Outer Wilds",
    "status": "Completed",
    "hours": 22.0
  }
]"#;
        fs::write(dir.path().join("games.json"), seeded).unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("new.png", b"img").unwrap();
        let game = store.add(draft("Tunic", Some(name))).unwrap();
        assert_eq!(game.id.get(), 1700000000001);
    }

    // -----------------------------------------------------------------------
    // Round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn reopen_yields_identical_collection() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let a = images.put("a.png", b"a").unwrap();
        let b = images.put("b.jpg", b"b").unwrap();
        store.add(draft("Celeste", Some(a))).unwrap();
        let mut second = draft("Hades", Some(b));
        second.status = GameStatus::Completed;
        second.extra = Some("escaped with Coronacht".to_string());
        store.add(second).unwrap();
        let before = store.list().unwrap();

        let reopened =
            JsonShelfStore::open(dir.path().join("games.json"), images.clone()).unwrap();
        assert_eq!(reopened.list().unwrap(), before);
    }

    #[test]
    fn snapshot_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("c.png", b"c").unwrap();
        store.add(draft("Celeste", Some(name))).unwrap();
        let raw = fs::read_to_string(dir.path().join("games.json")).unwrap();
        assert!(raw.contains("  {\n    \"id\":"));
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    #[test]
    fn list_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        store.add(draft("Celeste", Some(name))).unwrap();
        assert_eq!(store.list().unwrap(), store.list().unwrap());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        for title in ["First", "Second", "Third"] {
            let name = images.put("x.png", b"x").unwrap();
            store.add(draft(title, Some(name))).unwrap();
        }
        let titles: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    #[test]
    fn add_assigns_pairwise_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let mut ids = Vec::new();
        for i in 0..10 {
            let name = images.put("x.png", b"x").unwrap();
            let game = store.add(draft(&format!("Game {i}"), Some(name))).unwrap();
            ids.push(game.id);
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn add_without_image_fails_and_leaves_collection_unchanged() {
        let dir = TempDir::new().unwrap();
        let (store, _images) = open_store(&dir);
        let err = store.add(draft("Celeste", None)).unwrap_err();
        assert!(matches!(err, StoreError::MissingImage));
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_empty_title() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let err = store.add(draft("   ", Some(name))).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn add_rejects_negative_hours() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let mut d = draft("Celeste", Some(name));
        d.hours = -1.0;
        let err = store.add(d).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn partial_update_changes_only_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let created = store.add(draft("Celeste", Some(name))).unwrap();

        let patch = GamePatch {
            hours: Some(5.0),
            ..GamePatch::default()
        };
        let updated = store.update(created.id, patch).unwrap();
        assert_eq!(updated.hours, 5.0);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.image, created.image);
        assert_eq!(updated.extra, created.extra);
    }

    #[test]
    fn update_clears_notes_when_supplied_empty() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let mut d = draft("Celeste", Some(name));
        d.extra = Some("100%".to_string());
        let created = store.add(d).unwrap();

        let cleared = store
            .update(
                created.id,
                GamePatch {
                    extra: Some(None),
                    ..GamePatch::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.extra, None);

        // Absent extra leaves whatever is stored.
        let untouched = store
            .update(
                created.id,
                GamePatch {
                    hours: Some(4.0),
                    ..GamePatch::default()
                },
            )
            .unwrap();
        assert_eq!(untouched.extra, None);
    }

    #[test]
    fn update_replacing_image_deletes_superseded_blob() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let old = images.put("old.png", b"old").unwrap();
        let created = store.add(draft("Celeste", Some(old.clone()))).unwrap();

        let new = images.put("new.png", b"new").unwrap();
        let updated = store
            .update(
                created.id,
                GamePatch {
                    image: Some(new.clone()),
                    ..GamePatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.image, new);
        assert!(!images.exists(&old).unwrap());
        assert!(images.exists(&new).unwrap());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (store, _images) = open_store(&dir);
        let err = store
            .update(
                GameId::new(999_999),
                GamePatch {
                    hours: Some(1.0),
                    ..GamePatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == GameId::new(999_999)));
    }

    #[test]
    fn update_persists_to_disk() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let created = store.add(draft("Celeste", Some(name))).unwrap();
        store
            .update(
                created.id,
                GamePatch {
                    status: Some(GameStatus::Completed),
                    ..GamePatch::default()
                },
            )
            .unwrap();

        let reopened =
            JsonShelfStore::open(dir.path().join("games.json"), images.clone()).unwrap();
        assert_eq!(
            reopened.list().unwrap()[0].status,
            GameStatus::Completed
        );
    }

    // -----------------------------------------------------------------------
    // Remove
    // -----------------------------------------------------------------------

    #[test]
    fn remove_deletes_entry_and_blob() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let created = store.add(draft("Celeste", Some(name.clone()))).unwrap();

        store.remove(created.id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(!images.exists(&name).unwrap());
    }

    #[test]
    fn remove_survives_already_missing_blob() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let name = images.put("a.png", b"a").unwrap();
        let created = store.add(draft("Celeste", Some(name.clone()))).unwrap();
        images.delete(&name).unwrap();

        store.remove(created.id).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (store, _images) = open_store(&dir);
        let err = store.remove(GameId::new(999_999)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    // -----------------------------------------------------------------------
    // Snapshot write failure
    // -----------------------------------------------------------------------

    #[test]
    fn failed_snapshot_write_rolls_back_memory() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        // Replace the snapshot file with a directory so the rename fails.
        fs::remove_file(dir.path().join("games.json")).unwrap();
        fs::create_dir(dir.path().join("games.json")).unwrap();

        let name = images.put("a.png", b"a").unwrap();
        let err = store.add(draft("Celeste", Some(name))).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn removed_id_is_not_reused() {
        let dir = TempDir::new().unwrap();
        let (store, images) = open_store(&dir);
        let a = images.put("a.png", b"a").unwrap();
        let first = store.add(draft("First", Some(a))).unwrap();
        store.remove(first.id).unwrap();

        let b = images.put("b.png", b"b").unwrap();
        let second = store.add(draft("Second", Some(b))).unwrap();
        assert!(second.id > first.id);
    }
}
