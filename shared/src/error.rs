use strum_macros::Display;
use thiserror::Error;

/// Pipeline stage an error escaped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Detection,
    Advisory,
}

/// Everything that can go wrong between the detect click and the rendered
/// result. Each variant carries a message that is already safe to show.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("{0}")]
    Input(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Model API request failed: {0}")]
    Upstream(String),
    #[error("Invalid model API response: {0}")]
    Format(String),
    #[error("Could not determine a prediction: {0}")]
    Inference(String),
    #[error("AI suggestion failed: {0}")]
    Advisory(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{stage} failed: {source}")]
    Staged {
        stage: Stage,
        #[source]
        source: Box<DetectError>,
    },
}

impl DetectError {
    /// Tags an error with the pipeline stage it escaped from. An error that
    /// already carries a tag keeps it.
    pub fn staged(self, stage: Stage) -> Self {
        match self {
            staged @ DetectError::Staged { .. } => staged,
            other => DetectError::Staged {
                stage,
                source: Box::new(other),
            },
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            DetectError::Staged { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
