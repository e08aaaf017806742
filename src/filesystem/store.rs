use crate::filesystem::secure::write_with_backups_n;
use crate::vault::ports::{KeyValueStore, UnreadableValue};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Durable key-value store: one `<key>.json` file per key under `dir`.
pub struct FileKeyValueStore {
    dir: PathBuf,
    backups: usize,
}

impl FileKeyValueStore {
    /// Keeps the default of 2 backups per key.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, backups: 2 }
    }

    pub fn new_with_backups(dir: PathBuf, backups: usize) -> Self {
        Self { dir, backups }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed identifiers; refuse anything that could escape `dir`.
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(anyhow!("invalid store key {key:?}"));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| {
                UnreadableValue {
                    key: key.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        write_with_backups_n(&path, value.as_bytes(), self.backups)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
