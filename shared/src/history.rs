use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CropType;
use crate::error::DetectError;

/// Upper bound on stored scans; older entries fall off the end.
pub const HISTORY_CAP: usize = 20;

/// One completed detection, as kept in the scan history. Immutable once
/// created; removed only by clearing the whole log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub crop_type: CropType,
    pub disease_label: String,
    pub confidence: f32,
    pub suggestion_text: String,
}

impl DetectionRecord {
    pub fn new(
        crop_type: CropType,
        disease_label: String,
        confidence: f32,
        suggestion_text: String,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            id: next_record_id(&created_at),
            created_at,
            crop_type,
            disease_label,
            confidence,
            suggestion_text,
        }
    }
}

/// Millisecond clock plus a per-process counter, so ids stay unique and
/// ordered even when scans land within the same millisecond.
pub fn next_record_id(at: &DateTime<Utc>) -> u64 {
    static ID_COUNTER: AtomicU64 = AtomicU64::new(0);
    let millis = at.timestamp_millis().max(0) as u64;
    let count = ID_COUNTER.fetch_add(1, Ordering::SeqCst);
    millis * 1000 + (count % 1000)
}

/// Puts `record` at the front and drops anything past the cap.
pub fn prepend_capped(log: &mut Vec<DetectionRecord>, record: DetectionRecord) {
    log.insert(0, record);
    log.truncate(HISTORY_CAP);
}

/// Storage for past detections, newest first.
pub trait HistoryStore {
    fn append(&self, record: &DetectionRecord) -> Result<(), DetectError>;
    fn all(&self) -> Vec<DetectionRecord>;
    fn clear(&self);
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryHistory {
    records: RefCell<Vec<DetectionRecord>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&self, record: &DetectionRecord) -> Result<(), DetectError> {
        prepend_capped(&mut self.records.borrow_mut(), record.clone());
        Ok(())
    }

    fn all(&self) -> Vec<DetectionRecord> {
        self.records.borrow().clone()
    }

    fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str) -> DetectionRecord {
        DetectionRecord::new(CropType::Potato, label.to_string(), 0.8, "rotate crops".into())
    }

    #[test]
    fn history_is_capped_newest_first() {
        let store = MemoryHistory::new();

        for i in 0..25 {
            store.append(&record(&format!("disease-{i}"))).unwrap();
        }

        let all = store.all();
        assert_eq!(all.len(), HISTORY_CAP);
        assert_eq!(all[0].disease_label, "disease-24");
        assert_eq!(all[19].disease_label, "disease-5");
    }

    #[test]
    fn record_ids_increase_with_creation_order() {
        let earlier = record("a");
        let later = record("b");

        assert!(later.id > earlier.id);
        assert!(later.created_at >= earlier.created_at);
    }

    #[test]
    fn id_embeds_the_millisecond_timestamp() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        let id = next_record_id(&at);
        assert_eq!(id / 1000, 1_700_000_000_000);
    }

    #[test]
    fn clearing_an_empty_store_is_a_no_op() {
        let store = MemoryHistory::new();
        store.clear();
        assert!(store.all().is_empty());
    }

    #[test]
    fn clearing_drops_every_record() {
        let store = MemoryHistory::new();
        store.append(&record("a")).unwrap();
        store.append(&record("b")).unwrap();

        store.clear();
        assert!(store.all().is_empty());
    }

    #[test]
    fn records_serialize_camel_case() {
        let json = serde_json::to_value(record("Potato___Late_blight")).unwrap();

        assert!(json.get("createdAt").is_some());
        assert_eq!(json["cropType"], "Potato");
        assert_eq!(json["diseaseLabel"], "Potato___Late_blight");
        assert!(json.get("suggestionText").is_some());
    }
}
