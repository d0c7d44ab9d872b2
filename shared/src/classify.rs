use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::catalog::CropType;
use crate::error::DetectError;

/// Base64 `data:` URI of the uploaded leaf photo, produced by the browser's
/// file reader. Consumed once per detection and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub struct ImageDataUri(String);

impl ImageDataUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Request body for the external prediction endpoint.
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub image_data_uri: String,
    pub crop_type: CropType,
}

/// Response body of the prediction endpoint: one probability vector per
/// submitted image, aligned with [`DISEASE_LABELS`](crate::catalog::DISEASE_LABELS).
#[derive(Serialize, Deserialize, Clone)]
pub struct PredictResponse {
    pub predictions: Vec<Vec<f32>>,
}

impl PredictResponse {
    /// The probability vector for the submitted image.
    pub fn probabilities(&self) -> Result<&[f32], DetectError> {
        self.predictions.first().map(Vec::as_slice).ok_or_else(|| {
            DetectError::Format(
                "expected {\"predictions\": [[...probabilities...]]}".to_string(),
            )
        })
    }
}

/// Arg-max outcome over one probability vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub disease_label: String,
    pub confidence: f32,
}

/// Maps a probability vector onto the label catalog. Ties keep the earliest
/// index; a vector with no entry above zero yields an inference error.
pub fn select_prediction(
    probabilities: &[f32],
    labels: &[&str],
) -> Result<ClassificationResult, DetectError> {
    if labels.is_empty() {
        return Err(DetectError::Config(
            "the disease label catalog is empty, model output cannot be mapped to names".into(),
        ));
    }
    if probabilities.len() != labels.len() {
        return Err(DetectError::Config(format!(
            "model returned {} classes but the label catalog defines {}",
            probabilities.len(),
            labels.len()
        )));
    }

    let mut highest = 0.0_f32;
    let mut predicted = None;

    for (index, &probability) in probabilities.iter().enumerate() {
        if probability > highest {
            highest = probability;
            predicted = Some(index);
        }
    }

    match predicted {
        Some(index) => Ok(ClassificationResult {
            disease_label: labels[index].to_string(),
            confidence: highest,
        }),
        None => Err(DetectError::Inference(
            "all probabilities were zero or invalid".into(),
        )),
    }
}
