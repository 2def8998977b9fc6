//! Device-local key-value storage backed by a directory.
//!
//! Each key maps to `<key>.json` inside one capability-scoped directory.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{KeyValueStorage, StorageError};

const FILE_EXTENSION: &str = "json";

/// [`KeyValueStorage`] writing one JSON file per key.
#[derive(Debug)]
pub struct DirKeyValueStorage {
    dir: Dir,
    root: Utf8PathBuf,
}

impl DirKeyValueStorage {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating or opening the directory.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<String, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if valid {
            Ok(format!("{key}.{FILE_EXTENSION}"))
        } else {
            Err(StorageError::invalid_key(key))
        }
    }
}

impl KeyValueStorage for DirKeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file_name = Self::file_name(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::read(key, error.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let file_name = Self::file_name(key)?;
        write_atomic(&self.dir, &file_name, value)
            .map_err(|error| StorageError::write(key, error.to_string()))?;
        debug!(key, bytes = value.len(), root = %self.root, "storage entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let file_name = Self::file_name(key)?;
        match self.dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::write(key, error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Filesystem-backed coverage using throwaway directories.

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Fixture {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("nested").join("store"))
            .expect("utf-8 temp path");
        Fixture { _temp: temp, root }
    }

    #[rstest]
    fn creates_the_root_and_round_trips_values(workspace: Fixture) {
        let storage = DirKeyValueStorage::open(&workspace.root).expect("open");

        assert_eq!(storage.get("users").expect("read"), None);
        storage.set("users", "[]").expect("write");

        assert_eq!(storage.get("users").expect("read").as_deref(), Some("[]"));
        assert!(workspace.root.join("users.json").is_file());
        assert_eq!(storage.root(), workspace.root.as_path());
    }

    #[rstest]
    fn values_survive_reopening(workspace: Fixture) {
        DirKeyValueStorage::open(&workspace.root)
            .expect("open")
            .set("users", r#"[{"id":"1"}]"#)
            .expect("write");

        let reopened = DirKeyValueStorage::open(&workspace.root).expect("reopen");
        assert_eq!(
            reopened.get("users").expect("read").as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[rstest]
    fn remove_is_idempotent(workspace: Fixture) {
        let storage = DirKeyValueStorage::open(&workspace.root).expect("open");
        storage.set("users", "[]").expect("write");

        storage.remove("users").expect("first remove");
        storage.remove("users").expect("second remove");
        assert_eq!(storage.get("users").expect("read"), None);
    }

    #[rstest]
    #[case("")]
    #[case("../users")]
    #[case("nested/users")]
    #[case("users.json")]
    fn rejects_keys_that_are_not_plain_names(workspace: Fixture, #[case] key: &str) {
        let storage = DirKeyValueStorage::open(&workspace.root).expect("open");
        assert_eq!(
            storage.set(key, "[]"),
            Err(StorageError::invalid_key(key))
        );
    }
}
