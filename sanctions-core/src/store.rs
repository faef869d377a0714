use crate::error::Result;
use crate::extractor;
use crate::types::Dataset;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct Snapshot {
    dataset: Arc<Dataset>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Holds the currently loaded dataset and swaps it whole on refresh.
///
/// Readers take an `Arc` to the current dataset and search it without
/// holding the lock, so a concurrent refresh never exposes a partial list.
pub struct DatasetStore {
    current: RwLock<Snapshot>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Snapshot {
                dataset: Arc::new(Dataset::default()),
                loaded_at: None,
            }),
        }
    }

    pub fn current(&self) -> Arc<Dataset> {
        self.current.read().dataset.clone()
    }

    /// When the current dataset was installed; `None` until the first load.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.current.read().loaded_at
    }

    pub fn replace(&self, dataset: Dataset) {
        let records = dataset.len();
        *self.current.write() = Snapshot {
            dataset: Arc::new(dataset),
            loaded_at: Some(Utc::now()),
        };
        info!("Installed SDN dataset with {} records", records);
    }

    /// Extract `document` and install it. On failure the previous dataset
    /// stays in place and the error is returned.
    pub fn refresh_from_bytes(&self, document: &[u8]) -> Result<usize> {
        match extractor::extract(document) {
            Ok(dataset) => {
                let records = dataset.len();
                self.replace(dataset);
                Ok(records)
            }
            Err(e) => {
                warn!(
                    "SDN refresh rejected, keeping {} previously loaded records: {}",
                    self.current().len(),
                    e
                );
                Err(e)
            }
        }
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SanctionsError;
    use crate::matcher::search;

    const DOCUMENT: &[u8] = br#"<sdnList>
  <sdnEntry><firstName>JOHN</firstName><lastName>DOE</lastName></sdnEntry>
  <sdnEntry><lastName>DRAGON ROAD LTD</lastName></sdnEntry>
</sdnList>"#;

    #[test]
    fn test_starts_empty() {
        let store = DatasetStore::new();
        assert!(store.current().is_empty());
        assert!(store.loaded_at().is_none());
    }

    #[test]
    fn test_refresh_installs_dataset() {
        let store = DatasetStore::new();
        assert_eq!(store.refresh_from_bytes(DOCUMENT).unwrap(), 2);
        assert_eq!(store.current().len(), 2);
        assert!(store.loaded_at().is_some());
    }

    #[test]
    fn test_failed_refresh_keeps_previous_dataset() {
        let store = DatasetStore::new();
        store.refresh_from_bytes(DOCUMENT).unwrap();
        let before = store.current();
        let loaded_at = store.loaded_at();

        let result = store.refresh_from_bytes(b"<sdnList><sdnEntry></sdnList>");
        assert!(matches!(result, Err(SanctionsError::Parse(_))));

        let after = store.current();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(store.loaded_at(), loaded_at);
        assert_eq!(search(&after, "doe").unwrap().len(), 1);
    }

    #[test]
    fn test_held_snapshot_survives_replace() {
        let store = DatasetStore::new();
        store.refresh_from_bytes(DOCUMENT).unwrap();
        let held = store.current();

        store.replace(Dataset::default());

        assert_eq!(held.len(), 2);
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let store = Arc::new(DatasetStore::new());
        store.refresh_from_bytes(DOCUMENT).unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let len = store.current().len();
                        assert!(len == 0 || len == 2);
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            store.replace(Dataset::default());
            store.refresh_from_bytes(DOCUMENT).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
