//! Key-value storage for client-side state
//!
//! The API mirrors the browser `Storage` interface (`getItem`, `setItem`,
//! `removeItem`) so the same client code runs against an in-memory map, a
//! file on disk, or a host-provided store.

use crate::{CoreError, CoreResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// A string key-value store
///
/// Every call is a single synchronous operation on one key.
#[cfg_attr(any(test, feature = "tests"), mockall::automock)]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> CoreResult<()>;
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::storage_error("storage lock poisoned")
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::Storage;
    use crate::CoreResult;
    use std::collections::BTreeMap;
    use std::fs::{File, OpenOptions};
    use std::io::Write;
    use std::path::{Path, PathBuf};

    /// Storage persisted as a JSON object in a single file
    ///
    /// Each operation re-reads the file, so several processes sharing the
    /// same path observe each other's writes.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// Use `path` as the backing file; it is created on first write
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Get the backing file path
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> CoreResult<BTreeMap<String, String>> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(err) => Err(err.into()),
            }
        }

        fn save(&self, items: &BTreeMap<String, String>) -> CoreResult<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let content = serde_json::to_string_pretty(items)?;

            // Write a sibling file and rename it over the target so readers
            // never observe a truncated file
            let tmp = self.tmp_path();
            let mut file = Self::open_private(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            drop(file);
            if let Err(err) = std::fs::rename(&tmp, &self.path) {
                let _ = std::fs::remove_file(&tmp);
                return Err(err.into());
            }
            Ok(())
        }

        fn tmp_path(&self) -> PathBuf {
            let mut name = self
                .path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_default();
            name.push(".tmp");
            self.path.with_file_name(name)
        }

        /// Create (or truncate) `path` readable by the owner only
        fn open_private(path: &Path) -> std::io::Result<File> {
            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }
            let file = options.open(path)?;
            // `mode` only applies on creation; tighten a leftover file too
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
            }
            Ok(file)
        }
    }

    impl Storage for FileStorage {
        fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
            Ok(self.load()?.remove(key))
        }

        fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
            let mut items = self.load()?;
            items.insert(key.to_string(), value.to_string());
            self.save(&items)
        }

        fn remove_item(&self, key: &str) -> CoreResult<()> {
            let mut items = self.load()?;
            if items.remove(key).is_some() {
                self.save(&items)?;
            }
            Ok(())
        }
    }
}
