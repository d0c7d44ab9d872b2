//! Platform-neutral core of the LeafScan detection pipeline: catalogs, wire
//! types, the error taxonomy, and the orchestration that ties the prediction
//! service, the advisory model, and the scan history together.

pub mod advisory;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod history;

pub use advisory::{
    AdvisoryConfig, AdvisoryRequest, AdvisoryResult, ConfidenceBand, build_advisory_prompt,
    extract_suggestion,
};
pub use catalog::{
    CropType, DISEASE_DISCLAIMER, DISEASE_LABELS, LEAF_IMAGE_DESCRIPTION, treatment_advice,
};
pub use classify::{
    ClassificationResult, ImageDataUri, PredictRequest, PredictResponse, select_prediction,
};
pub use config::DetectorConfig;
pub use detect::{AdvisoryProvider, DiseaseClassifier, run_detection};
pub use error::{DetectError, Stage};
pub use history::{
    DetectionRecord, HISTORY_CAP, HistoryStore, MemoryHistory, next_record_id, prepend_capped,
};
