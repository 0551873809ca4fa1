//! JSON file subscriber store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::SubscriberBook;
use crate::error::Result;
use crate::port::outbound::store::SubscriberStore;

/// Stores the subscriber book as pretty-printed JSON.
///
/// Writes go to a sibling `.tmp` file which is synced and renamed over the
/// target, so readers never observe a partial file.
pub struct JsonSubscriberStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSubscriberStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubscriberStore for JsonSubscriberStore {
    fn load(&self) -> Result<SubscriberBook> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No subscriber file, starting empty");
            return Ok(SubscriberBook::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, book: &SubscriberBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)?;
        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        debug!(path = %self.path.display(), subscribers = book.len(), "Saved subscribers");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SubscriberId, SubscriberRecord};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_file_loads_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSubscriberStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("subscribers.json");
        let store = JsonSubscriberStore::new(&path);

        let mut book = SubscriberBook::new();
        book.insert(
            SubscriberId::new("chat-1"),
            SubscriberRecord {
                min_usd: dec!(1000),
                started_at: Utc::now(),
                last_check: None,
                alert_count: 4,
            },
        );
        store.save(&book).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(store.load().unwrap(), book);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscribers.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonSubscriberStore::new(&path).load().is_err());
    }
}
