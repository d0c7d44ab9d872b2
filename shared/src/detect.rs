use log::{info, warn};

use crate::advisory::{AdvisoryRequest, AdvisoryResult};
use crate::catalog::{CropType, LEAF_IMAGE_DESCRIPTION};
use crate::classify::{ClassificationResult, ImageDataUri};
use crate::error::{DetectError, Stage};
use crate::history::{DetectionRecord, HistoryStore};

/// Classification side of the pipeline, implemented over HTTP in the
/// frontend and by fakes in tests.
#[allow(async_fn_in_trait)]
pub trait DiseaseClassifier {
    async fn classify(
        &self,
        image: &ImageDataUri,
        crop: CropType,
    ) -> Result<ClassificationResult, DetectError>;
}

/// Suggestion side of the pipeline.
#[allow(async_fn_in_trait)]
pub trait AdvisoryProvider {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResult, DetectError>;
}

/// Runs one full detection: classify the image, fetch the suggestion,
/// persist the record. Nothing is written to history unless both calls
/// succeed; a failed history write is logged and the record still returned.
pub async fn run_detection<C, A, H>(
    classifier: &C,
    advisor: &A,
    history: &H,
    crop: Option<CropType>,
    image: Option<&ImageDataUri>,
) -> Result<DetectionRecord, DetectError>
where
    C: DiseaseClassifier,
    A: AdvisoryProvider,
    H: HistoryStore,
{
    let (crop, image) = match (crop, image) {
        (Some(crop), Some(image)) if !image.is_empty() => (crop, image),
        _ => {
            return Err(DetectError::Input(
                "Please select a crop and upload an image.".into(),
            ));
        }
    };

    info!(
        "Running detection for crop {} (image data {} chars)",
        crop,
        image.len()
    );

    let classification = classifier
        .classify(image, crop)
        .await
        .map_err(|e| e.staged(Stage::Detection))?;
    info!(
        "Prediction: {} ({:.3})",
        classification.disease_label, classification.confidence
    );

    let advisory_request = AdvisoryRequest {
        disease_name: classification.disease_label.clone(),
        confidence: classification.confidence,
        image_description: LEAF_IMAGE_DESCRIPTION.to_string(),
        crop_type: crop,
    };
    let advisory = advisor
        .advise(&advisory_request)
        .await
        .map_err(|e| e.staged(Stage::Advisory))?;

    let record = DetectionRecord::new(
        crop,
        classification.disease_label,
        classification.confidence,
        advisory.suggestion,
    );

    if let Err(e) = history.append(&record) {
        warn!("Could not save scan {} to history: {}", record.id, e);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::select_prediction;
    use crate::history::MemoryHistory;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const LABELS: [&str; 3] = ["scab", "rot", "healthy"];

    /// Replays a canned prediction response through the real selection
    /// logic.
    struct FakeClassifier {
        predictions: Vec<Vec<f32>>,
    }

    impl DiseaseClassifier for FakeClassifier {
        async fn classify(
            &self,
            _image: &ImageDataUri,
            _crop: CropType,
        ) -> Result<ClassificationResult, DetectError> {
            let row = self.predictions.first().map(Vec::as_slice).unwrap_or(&[]);
            select_prediction(row, &LABELS)
        }
    }

    struct FakeAdvisor {
        suggestion: Option<&'static str>,
        seen: RefCell<Option<AdvisoryRequest>>,
    }

    impl FakeAdvisor {
        fn answering(suggestion: &'static str) -> Self {
            Self {
                suggestion: Some(suggestion),
                seen: RefCell::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                suggestion: None,
                seen: RefCell::new(None),
            }
        }
    }

    impl AdvisoryProvider for FakeAdvisor {
        async fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResult, DetectError> {
            *self.seen.borrow_mut() = Some(request.clone());
            match self.suggestion {
                Some(text) => Ok(AdvisoryResult {
                    suggestion: text.to_string(),
                }),
                None => Err(DetectError::Advisory("endpoint unavailable".into())),
            }
        }
    }

    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn append(&self, _record: &DetectionRecord) -> Result<(), DetectError> {
            Err(DetectError::Storage("quota exceeded".into()))
        }

        fn all(&self) -> Vec<DetectionRecord> {
            Vec::new()
        }

        fn clear(&self) {}
    }

    fn image() -> ImageDataUri {
        ImageDataUri::new("data:image/png;base64,AAAA")
    }

    #[test]
    fn full_detection_selects_the_argmax_label_and_persists() {
        let classifier = FakeClassifier {
            predictions: vec![vec![0.1, 0.8, 0.1]],
        };
        let advisor = FakeAdvisor::answering("Remove the affected leaves.");
        let history = MemoryHistory::new();

        let record = block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            Some(CropType::Apple),
            Some(&image()),
        ))
        .unwrap();

        assert_eq!(record.disease_label, "rot");
        assert_eq!(record.confidence, 0.8);
        assert_eq!(record.suggestion_text, "Remove the affected leaves.");
        assert_eq!(record.crop_type, CropType::Apple);

        let stored = history.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], record);
    }

    #[test]
    fn advisory_receives_the_classification_output() {
        let classifier = FakeClassifier {
            predictions: vec![vec![0.1, 0.8, 0.1]],
        };
        let advisor = FakeAdvisor::answering("ok");
        let history = MemoryHistory::new();

        block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            Some(CropType::Apple),
            Some(&image()),
        ))
        .unwrap();

        let seen = advisor.seen.borrow();
        let request = seen.as_ref().unwrap();
        assert_eq!(request.disease_name, "rot");
        assert_eq!(request.confidence, 0.8);
        assert_eq!(request.image_description, LEAF_IMAGE_DESCRIPTION);
        assert_eq!(request.crop_type, CropType::Apple);
    }

    #[test]
    fn missing_inputs_fail_fast() {
        let classifier = FakeClassifier {
            predictions: vec![vec![0.1, 0.8, 0.1]],
        };
        let advisor = FakeAdvisor::answering("ok");
        let history = MemoryHistory::new();

        let err = block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            None,
            Some(&image()),
        ))
        .unwrap_err();
        assert!(matches!(err, DetectError::Input(_)));

        let err = block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            Some(CropType::Apple),
            None,
        ))
        .unwrap_err();
        assert!(matches!(err, DetectError::Input(_)));

        let empty = ImageDataUri::new("");
        let err = block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            Some(CropType::Apple),
            Some(&empty),
        ))
        .unwrap_err();
        assert!(matches!(err, DetectError::Input(_)));

        assert!(history.all().is_empty());
    }

    #[test]
    fn classifier_mismatch_is_staged_and_leaves_history_untouched() {
        let classifier = FakeClassifier {
            predictions: vec![vec![0.5, 0.5]],
        };
        let advisor = FakeAdvisor::answering("ok");
        let history = MemoryHistory::new();

        let err = block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            Some(CropType::Apple),
            Some(&image()),
        ))
        .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Detection));
        match err {
            DetectError::Staged { source, .. } => {
                assert!(matches!(*source, DetectError::Config(_)))
            }
            other => panic!("expected a staged error, got {other:?}"),
        }
        assert!(history.all().is_empty());
        assert!(advisor.seen.borrow().is_none());
    }

    #[test]
    fn advisory_failure_is_staged_and_leaves_history_untouched() {
        let classifier = FakeClassifier {
            predictions: vec![vec![0.1, 0.8, 0.1]],
        };
        let advisor = FakeAdvisor::failing();
        let history = MemoryHistory::new();

        let err = block_on(run_detection(
            &classifier,
            &advisor,
            &history,
            Some(CropType::Apple),
            Some(&image()),
        ))
        .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Advisory));
        assert!(history.all().is_empty());
    }

    #[test]
    fn history_write_failure_does_not_void_the_detection() {
        let classifier = FakeClassifier {
            predictions: vec![vec![0.1, 0.8, 0.1]],
        };
        let advisor = FakeAdvisor::answering("ok");

        let record = block_on(run_detection(
            &classifier,
            &advisor,
            &FailingStore,
            Some(CropType::Apple),
            Some(&image()),
        ))
        .unwrap();

        assert_eq!(record.disease_label, "rot");
    }
}
