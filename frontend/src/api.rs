use gloo_console::error;
use gloo_net::http::Request;
use shared::{
    AdvisoryConfig, AdvisoryProvider, AdvisoryRequest, AdvisoryResult, ClassificationResult,
    CropType, DISEASE_LABELS, DetectError, DiseaseClassifier, ImageDataUri, PredictRequest,
    PredictResponse, build_advisory_prompt, extract_suggestion, select_prediction,
};

const UNREADABLE_BODY: &str = "<could not retrieve the error body>";

/// Client for the external prediction service.
pub struct HttpClassifier {
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

impl DiseaseClassifier for HttpClassifier {
    async fn classify(
        &self,
        image: &ImageDataUri,
        crop: CropType,
    ) -> Result<ClassificationResult, DetectError> {
        if self.endpoint.trim().is_empty() {
            return Err(DetectError::Config(
                "the prediction endpoint is not configured".into(),
            ));
        }

        log::info!("Sending prediction request to {} for crop {}", self.endpoint, crop);

        let payload = PredictRequest {
            image_data_uri: image.as_str().to_string(),
            crop_type: crop,
        };

        let response = Request::post(&self.endpoint)
            .json(&payload)
            .map_err(|e| DetectError::Upstream(format!("could not build the request: {}", e)))?
            .send()
            .await
            .map_err(|e| {
                error!(format!("Prediction fetch error: {:?}", e));
                DetectError::Upstream(format!(
                    "network error reaching {}: {}. Ensure the prediction server is running, \
                     accessible, and not blocked by CORS.",
                    self.endpoint, e
                ))
            })?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| UNREADABLE_BODY.to_string());
            return Err(DetectError::Upstream(format!("status {}: {}", status, body)));
        }

        let parsed = response.json::<PredictResponse>().await.map_err(|e| {
            DetectError::Format(format!("could not parse the prediction response: {}", e))
        })?;

        let probabilities = parsed.probabilities()?;
        select_prediction(probabilities, &DISEASE_LABELS)
    }
}

/// Client for the OpenAI-compatible suggestion endpoint.
pub struct HttpAdvisor {
    config: AdvisoryConfig,
}

impl HttpAdvisor {
    pub fn new(config: AdvisoryConfig) -> Self {
        Self { config }
    }
}

impl AdvisoryProvider for HttpAdvisor {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResult, DetectError> {
        if self.config.endpoint.trim().is_empty() {
            return Err(DetectError::Config(
                "the advisory endpoint is not configured".into(),
            ));
        }

        let prompt = build_advisory_prompt(request);
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": prompt
            }],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature
        });

        let url = format!("{}/chat/completions", self.config.endpoint);
        log::info!("Requesting AI suggestion from {}", url);

        let mut builder = Request::post(&url);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("Authorization", &format!("Bearer {}", key));
        }

        let response = builder
            .json(&body)
            .map_err(|e| DetectError::Advisory(format!("could not build the request: {}", e)))?
            .send()
            .await
            .map_err(|e| {
                error!(format!("Advisory fetch error: {:?}", e));
                DetectError::Advisory(format!("network error reaching {}: {}", url, e))
            })?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| UNREADABLE_BODY.to_string());
            return Err(DetectError::Advisory(format!("status {}: {}", status, text)));
        }

        let completion = response.json::<serde_json::Value>().await.map_err(|e| {
            DetectError::Advisory(format!("could not parse the completion response: {}", e))
        })?;

        let content = completion["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("");

        extract_suggestion(content)
    }
}
