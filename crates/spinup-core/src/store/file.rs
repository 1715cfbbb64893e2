//! TOML-file backed store shared between processes.
//!
//! Every read goes to disk so writes from other processes are seen. Writers
//! serialize on an advisory lock next to the store, then replace the file
//! through a private temp file so a crash never leaves a truncated store.

use crate::{
    CoreError, CoreResult,
    store::{StoreChange, TokenStore},
};

use std::{
    collections::BTreeMap,
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    panic::Location,
    path::{Path, PathBuf},
    sync::Mutex,
};

use error_location::ErrorLocation;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

type Entries = BTreeMap<String, String>;

/// Persisted store in a single TOML file of string keys.
///
/// Remembers the last contents this handle observed, which is what
/// [`poll_changes`](Self::poll_changes) diffs against. A write through this
/// handle folds only its own key into that snapshot, so it never shows up as
/// a change while other processes' edits stay pending for the next poll.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    snapshot: Mutex<Entries>,
}

impl FileTokenStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// `PersistenceUnavailable` if the file exists but cannot be read or parsed.
    #[track_caller]
    #[instrument]
    pub fn open(path: PathBuf) -> CoreResult<Self> {
        let entries = read_entries(&path)?;
        debug!(keys = entries.len(), "Token store opened");

        Ok(Self {
            path,
            snapshot: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file and report what changed since the last snapshot.
    ///
    /// A store that went from non-empty to empty is reported as one
    /// [`StoreChange::cleared`]; otherwise one change per differing key.
    #[track_caller]
    pub fn poll_changes(&self) -> CoreResult<Vec<StoreChange>> {
        let current = read_entries(&self.path)?;
        let mut snapshot = self.lock_snapshot()?;

        if *snapshot == current {
            return Ok(Vec::new());
        }

        let changes = if current.is_empty() {
            vec![StoreChange::cleared()]
        } else {
            diff(&snapshot, &current)
        };

        *snapshot = current;
        Ok(changes)
    }

    #[track_caller]
    fn lock_snapshot(&self) -> CoreResult<std::sync::MutexGuard<'_, Entries>> {
        self.snapshot
            .lock()
            .map_err(|e| CoreError::PersistenceUnavailable {
                reason: format!("Store snapshot lock poisoned: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Read-modify-write of one key under the store lock.
    #[track_caller]
    fn update(&self, key: &str, value: Option<&str>) -> CoreResult<()> {
        let mut snapshot = self.lock_snapshot()?;
        let _lock = lock_store(&self.path)?;

        let mut entries = read_entries(&self.path)?;
        apply(&mut entries, key, value);
        write_entries(&self.path, &entries)?;

        apply(&mut snapshot, key, value);
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(read_entries(&self.path)?.remove(key))
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.update(key, Some(value))?;
        debug!(key, "Store key written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> CoreResult<()> {
        self.update(key, None)?;
        debug!(key, "Store key removed");
        Ok(())
    }
}

fn apply(entries: &mut Entries, key: &str, value: Option<&str>) {
    match value {
        Some(value) => {
            entries.insert(key.to_string(), value.to_string());
        }
        None => {
            entries.remove(key);
        }
    }
}

fn diff(before: &Entries, after: &Entries) -> Vec<StoreChange> {
    let written = after
        .iter()
        .filter(|(k, v)| before.get(*k) != Some(*v))
        .map(|(k, v)| StoreChange::key(k.clone(), Some(v.clone())));

    let removed = before
        .keys()
        .filter(|k| !after.contains_key(*k))
        .map(|k| StoreChange::key(k.clone(), None));

    written.chain(removed).collect()
}

#[track_caller]
fn read_entries(path: &Path) -> CoreResult<Entries> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => {
            return Err(CoreError::PersistenceUnavailable {
                reason: format!("Failed to read store {:?}: {}", path, e),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    toml::from_str(&contents).map_err(|e| CoreError::PersistenceUnavailable {
        reason: format!("Failed to parse store {:?}: {}", path, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn store_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Exclusive advisory lock shared by every handle and process on `path`.
///
/// Held until the returned file is dropped.
#[track_caller]
fn lock_store(path: &Path) -> CoreResult<File> {
    let unavailable = |reason: String| CoreError::PersistenceUnavailable {
        reason,
        location: ErrorLocation::from(Location::caller()),
    };

    fs::create_dir_all(store_dir(path))
        .map_err(|e| unavailable(format!("Failed to create store directory: {}", e)))?;

    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path.with_extension("toml.lock"))
        .map_err(|e| unavailable(format!("Failed to open store lock: {}", e)))?;

    lock_file
        .lock()
        .map_err(|e| unavailable(format!("Failed to lock store: {}", e)))?;

    Ok(lock_file)
}

#[track_caller]
fn write_entries(path: &Path, entries: &Entries) -> CoreResult<()> {
    let unavailable = |reason: String| CoreError::PersistenceUnavailable {
        reason,
        location: ErrorLocation::from(Location::caller()),
    };

    let contents = toml::to_string(entries)
        .map_err(|e| unavailable(format!("Failed to serialize store: {}", e)))?;

    // Same directory as the store so the rename stays on one filesystem.
    let mut temp_file = NamedTempFile::new_in(store_dir(path))
        .map_err(|e| unavailable(format!("Failed to create temp store file: {}", e)))?;

    temp_file
        .write_all(contents.as_bytes())
        .map_err(|e| unavailable(format!("Failed to write temp store file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| unavailable(format!("Failed to sync temp store file: {}", e)))?;

    temp_file
        .persist(path)
        .map_err(|e| unavailable(format!("Failed to replace store file: {}", e.error)))?;

    Ok(())
}
