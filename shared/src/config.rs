use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryConfig;

fn default_predict_endpoint() -> String {
    "http://localhost:5000/predict".to_string()
}

/// Endpoint configuration for one detection session. Serde defaults let a
/// partially-specified config deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Prediction service URL, speaking the `{"predictions": [[...]]}`
    /// contract.
    #[serde(default = "default_predict_endpoint")]
    pub predict_endpoint: String,
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            predict_endpoint: default_predict_endpoint(),
            advisory: AdvisoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: DetectorConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.predict_endpoint, "http://localhost:5000/predict");
        assert_eq!(config.advisory.model, "qwen2.5:7b");
    }

    #[test]
    fn overrides_survive_round_trip() {
        let config: DetectorConfig = serde_json::from_str(
            r#"{"predict_endpoint": "http://model:9000/predict", "advisory": {"endpoint": "http://llm:8000/v1", "model": "local"}}"#,
        )
        .unwrap();

        assert_eq!(config.predict_endpoint, "http://model:9000/predict");
        assert_eq!(config.advisory.endpoint, "http://llm:8000/v1");
    }
}
