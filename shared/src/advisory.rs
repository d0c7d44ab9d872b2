use serde::{Deserialize, Serialize};

use crate::catalog::CropType;
use crate::error::DetectError;

/// Confidence ranges driving the advisory prompt strategy. The boundaries
/// 0.3 and 0.6 both belong to the moderate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Low,
    Moderate,
    High,
}

impl ConfidenceBand {
    pub fn for_confidence(confidence: f32) -> Self {
        if confidence < 0.3 {
            ConfidenceBand::Low
        } else if confidence <= 0.6 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::High
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => {
                "The confidence is very low. Guide the farmer to capture a clearer image by \
                 providing specific instructions based on the image description."
            }
            ConfidenceBand::Moderate => {
                "The confidence is moderate. Suggest alternative diseases that might be \
                 affecting the crop, based on the initially detected disease and crop type."
            }
            ConfidenceBand::High => {
                "The confidence is relatively high. Acknowledge the result is still somewhat \
                 uncertain, and provide additional information that might help the farmer seek \
                 further assistance."
            }
        }
    }
}

/// Typed input for one advisory call.
#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    pub disease_name: String,
    pub confidence: f32,
    pub image_description: String,
    pub crop_type: CropType,
}

/// Typed output of one advisory call. Never empty on success.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryResult {
    pub suggestion: String,
}

/// Connection settings for the OpenAI-compatible suggestion endpoint.
/// Defaults target a local Ollama instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    pub endpoint: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.4
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:11434/v1".to_string(),
            model: "qwen2.5:7b".to_string(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl AdvisoryConfig {
    pub fn ollama(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Default::default()
        }
    }

    pub fn openai(api_key: &str, model: &str) -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: model.to_string(),
            api_key: Some(api_key.to_string()),
            ..Default::default()
        }
    }
}

/// Builds the chat prompt for one advisory request, with the instruction
/// selected by the confidence band.
pub fn build_advisory_prompt(request: &AdvisoryRequest) -> String {
    let band = ConfidenceBand::for_confidence(request.confidence);

    format!(
        r#"You are an AI assistant that helps farmers diagnose crop diseases based on image analysis.
The farmer has taken a picture of their crop and an image classifier produced an initial detection.
{instruction}

Here are the details of the image analysis:
- Disease Name: {disease}
- Confidence Level: {confidence}
- Image Description: {description}
- Crop Type: {crop}

Provide a concise and helpful suggestion to the farmer, as a single short paragraph.
Respond with only a JSON object of the form {{"suggestion": "..."}}."#,
        instruction = band.instruction(),
        disease = request.disease_name,
        confidence = request.confidence,
        description = request.image_description,
        crop = request.crop_type.label(),
    )
}

/// Pulls the suggestion out of a completion. Accepts the requested JSON
/// object, the same object inside a Markdown fence, or plain text. A
/// completion with no usable text is an advisory failure.
pub fn extract_suggestion(content: &str) -> Result<AdvisoryResult, DetectError> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    if trimmed.is_empty() {
        return Err(DetectError::Advisory(
            "the model returned an empty completion".into(),
        ));
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => {
            let suggestion = match &value {
                serde_json::Value::Object(fields) => fields
                    .get("suggestion")
                    .and_then(|field| field.as_str())
                    .unwrap_or(""),
                serde_json::Value::String(text) => text.as_str(),
                _ => "",
            };

            let suggestion = suggestion.trim();
            if suggestion.is_empty() {
                return Err(DetectError::Advisory(
                    "the model returned no usable suggestion".into(),
                ));
            }

            Ok(AdvisoryResult {
                suggestion: suggestion.to_string(),
            })
        }
        // Not JSON at all: take the raw completion as the suggestion.
        Err(_) => Ok(AdvisoryResult {
            suggestion: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(confidence: f32) -> AdvisoryRequest {
        AdvisoryRequest {
            disease_name: "Tomato___Late_blight".into(),
            confidence,
            image_description: "A close-up image of a plant leaf".into(),
            crop_type: CropType::Tomato,
        }
    }

    #[test]
    fn bands_split_at_the_documented_boundaries() {
        assert_eq!(ConfidenceBand::for_confidence(0.0), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::for_confidence(0.29), ConfidenceBand::Low);
        assert_eq!(
            ConfidenceBand::for_confidence(0.3),
            ConfidenceBand::Moderate
        );
        assert_eq!(
            ConfidenceBand::for_confidence(0.45),
            ConfidenceBand::Moderate
        );
        assert_eq!(
            ConfidenceBand::for_confidence(0.6),
            ConfidenceBand::Moderate
        );
        assert_eq!(ConfidenceBand::for_confidence(0.61), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::for_confidence(1.0), ConfidenceBand::High);
    }

    #[test]
    fn prompt_carries_the_band_instruction() {
        assert!(build_advisory_prompt(&request(0.1)).contains("capture a clearer image"));
        assert!(build_advisory_prompt(&request(0.5)).contains("alternative diseases"));
        assert!(build_advisory_prompt(&request(0.9)).contains("seek further assistance"));
    }

    #[test]
    fn prompt_carries_every_input_field() {
        let prompt = build_advisory_prompt(&request(0.42));

        assert!(prompt.contains("Tomato___Late_blight"));
        assert!(prompt.contains("0.42"));
        assert!(prompt.contains("A close-up image of a plant leaf"));
        assert!(prompt.contains("Crop Type: Tomato"));
    }

    #[test]
    fn extracts_the_requested_json_object() {
        let result = extract_suggestion(r#"{"suggestion": "Rotate your crops."}"#).unwrap();
        assert_eq!(result.suggestion, "Rotate your crops.");
    }

    #[test]
    fn extracts_from_a_fenced_block() {
        let content = "```json\n{\"suggestion\": \"Retake the photo in daylight.\"}\n```";
        let result = extract_suggestion(content).unwrap();
        assert_eq!(result.suggestion, "Retake the photo in daylight.");
    }

    #[test]
    fn plain_text_completions_are_accepted() {
        let result = extract_suggestion("Check the underside of the leaves for mold.").unwrap();
        assert_eq!(
            result.suggestion,
            "Check the underside of the leaves for mold."
        );
    }

    #[test]
    fn empty_or_null_suggestions_fail() {
        assert!(matches!(
            extract_suggestion(""),
            Err(DetectError::Advisory(_))
        ));
        assert!(matches!(
            extract_suggestion("   \n"),
            Err(DetectError::Advisory(_))
        ));
        assert!(matches!(
            extract_suggestion(r#"{"suggestion": ""}"#),
            Err(DetectError::Advisory(_))
        ));
        assert!(matches!(
            extract_suggestion(r#"{"suggestion": null}"#),
            Err(DetectError::Advisory(_))
        ));
        assert!(matches!(
            extract_suggestion(r#"{"advice": "wrong field"}"#),
            Err(DetectError::Advisory(_))
        ));
    }

    #[test]
    fn config_defaults_and_presets() {
        let default = AdvisoryConfig::default();
        assert!(default.endpoint.contains("11434"));
        assert!(default.api_key.is_none());

        let ollama = AdvisoryConfig::ollama("llama3.1:8b");
        assert_eq!(ollama.model, "llama3.1:8b");
        assert!(ollama.api_key.is_none());

        let openai = AdvisoryConfig::openai("sk-test", "gpt-4o-mini");
        assert!(openai.endpoint.contains("openai.com"));
        assert!(openai.api_key.is_some());
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: AdvisoryConfig =
            serde_json::from_str(r#"{"endpoint": "http://llm:8000/v1", "model": "local"}"#)
                .unwrap();

        assert_eq!(config.endpoint, "http://llm:8000/v1");
        assert_eq!(config.max_tokens, default_max_tokens());
        assert_eq!(config.temperature, default_temperature());
    }
}
