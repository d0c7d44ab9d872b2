use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use shared::{DetectError, DetectionRecord, HistoryStore, prepend_capped};

/// `localStorage` key holding the serialized scan log.
const HISTORY_KEY: &str = "scan_history";

/// Scan history persisted in the browser, newest first. The whole log is
/// rewritten on every append.
pub struct LocalStorageHistory;

impl LocalStorageHistory {
    fn read(&self) -> Vec<DetectionRecord> {
        match LocalStorage::get::<Vec<DetectionRecord>>(HISTORY_KEY) {
            Ok(records) => records,
            Err(StorageError::KeyNotFound(_)) => Vec::new(),
            Err(e) => {
                log::warn!("Stored scan history is unreadable, starting fresh: {}", e);
                Vec::new()
            }
        }
    }
}

impl HistoryStore for LocalStorageHistory {
    fn append(&self, record: &DetectionRecord) -> Result<(), DetectError> {
        let mut records = self.read();
        prepend_capped(&mut records, record.clone());
        LocalStorage::set(HISTORY_KEY, &records).map_err(|e| DetectError::Storage(e.to_string()))
    }

    fn all(&self) -> Vec<DetectionRecord> {
        self.read()
    }

    fn clear(&self) {
        LocalStorage::delete(HISTORY_KEY);
    }
}
