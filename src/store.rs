// src/store.rs
//! Directory-backed key-value store.
//!
//! One pretty-printed JSON file per key (`<dir>/<key>.json`), read and
//! written whole. Writes go through [`write_atomic`], so a crash mid-save
//! leaves the previous value in place. Single writer assumed.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::consts::{AUTHORS_KEY, LAST_UPDATE_KEY},
    data::Author,
    error::StoreError,
    file::{ensure_directory, write_atomic},
};

#[derive(Clone, Debug)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        ensure_directory(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// `Ok(None)` when the key was never written.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Json { key: s!(key), source })
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|source| StoreError::Json { key: s!(key), source })?;
        let path = self.path_for(key);
        write_atomic(&path, &bytes).map_err(|source| StoreError::Io { path, source })
    }

    /// Returns whether the key existed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// All snapshots, with change markers older than the window cleared.
    pub fn load_authors(&self, now: DateTime<Utc>) -> Result<Vec<Author>, StoreError> {
        let mut authors: Vec<Author> = self.get(AUTHORS_KEY)?.unwrap_or_default();
        for a in &mut authors {
            let was_new = a.change.has_new_citations;
            a.expire_stale_change(now);
            if was_new && !a.change.has_new_citations {
                logd!("{}: change marker expired", a.user_id);
            }
        }
        Ok(authors)
    }

    pub fn save_authors(&self, authors: &[Author]) -> Result<(), StoreError> {
        self.set(AUTHORS_KEY, authors)
    }

    pub fn last_update_time(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.get(LAST_UPDATE_KEY)
    }

    pub fn set_last_update_time(&self, t: DateTime<Utc>) -> Result<(), StoreError> {
        self.set(LAST_UPDATE_KEY, &t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.get::<u32>("nope").unwrap(), None);
        assert!(!store.remove("nope").unwrap());
    }

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("s")).unwrap();
        store.set("k", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(store.get::<Vec<u32>>("k").unwrap(), Some(vec![1, 2, 3]));
        assert!(store.remove("k").unwrap());
        assert_eq!(store.get::<Vec<u32>>("k").unwrap(), None);
    }

    #[test]
    fn corrupt_value_reports_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        fs::write(dir.path().join("authors.json"), "{not json").unwrap();
        match store.load_authors(Utc::now()) {
            Err(StoreError::Json { key, .. }) => assert_eq!(key, "authors"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn last_update_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.last_update_time().unwrap(), None);
        let t = Utc::now();
        store.set_last_update_time(t).unwrap();
        assert_eq!(store.last_update_time().unwrap(), Some(t));
    }
}
