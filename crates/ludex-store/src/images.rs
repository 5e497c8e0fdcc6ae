//! Directory-backed image blob store.
//!
//! [`DirImageStore`] keeps every uploaded image as one file in a flat
//! directory. Names are generated as
//! `<millisecond-timestamp>-<random-large-integer><original-extension>`,
//! which keeps them collision-resistant and lets a static file server guess
//! the content type from the preserved extension.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::ImageStore;

/// A flat directory of uploaded image files.
#[derive(Debug)]
pub struct DirImageStore {
    root: PathBuf,
}

impl DirImageStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory holding the stored blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored name to its path, rejecting anything that could
    /// step outside the root directory.
    fn resolve(&self, name: &str) -> StoreResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StoreError::InvalidImageName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    fn generate_name(original_name: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let noise: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{millis}-{noise}.{ext}"),
            None => format!("{millis}-{noise}"),
        }
    }
}

impl ImageStore for DirImageStore {
    fn put(&self, original_name: &str, bytes: &[u8]) -> StoreResult<String> {
        // create_new detects the (unlikely) name collision, in which case
        // we just roll a new name.
        loop {
            let name = Self::generate_name(original_name);
            let path = self.resolve(&name)?;
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)?;
                    debug!(name = %name, size = bytes.len(), "image stored");
                    return Ok(name);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let path = self.resolve(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.resolve(name)?.exists())
    }
}
