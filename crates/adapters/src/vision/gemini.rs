//! Google Gemini vision adapter

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use wardrobe_stylist_domain::{AnalyzeError, AnalyzeInput, ItemAnalysis, ItemAnalyzer};

use super::{VisionConfig, build_analysis_prompt, parse_analysis_response};

/// Gemini-backed item analyzer
pub struct GeminiAnalyzer {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: VisionConfig,
}

impl GeminiAnalyzer {
    pub fn new(api_key: SecretString, config: VisionConfig) -> Self {
        Self::with_base_url(
            api_key,
            "https://generativelanguage.googleapis.com".to_string(),
            config,
        )
    }

    /// Create an analyzer against a custom endpoint (for testing)
    pub fn with_base_url(api_key: SecretString, base_url: String, config: VisionConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
            config,
        }
    }

    async fn call_api(&self, input: &AnalyzeInput) -> Result<String, AnalyzeError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: input.mime_type.clone(),
                            data: BASE64.encode(&input.image),
                        },
                    },
                    Part::Text {
                        text: build_analysis_prompt(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.config.temperature),
                max_output_tokens: Some(self.config.max_output_tokens),
            }),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.config.model,
            self.api_key.expose_secret()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyzeError::Timeout
                } else {
                    AnalyzeError::Api(e.to_string())
                }
            })?;

        if response.status() == 429 {
            return Err(AnalyzeError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Api(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AnalyzeError::InvalidFormat(e.to_string()))?;

        let text = api_response
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(AnalyzeError::InvalidFormat("Empty response".to_string()));
        }

        Ok(text)
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "maxOutputTokens")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ItemAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, input: AnalyzeInput) -> Result<ItemAnalysis, AnalyzeError> {
        let mut last_error = None;
        for attempt in 0..=self.config.retries {
            if attempt > 0 {
                tracing::warn!(attempt = attempt, "Retrying analysis");
                tokio::time::sleep(Duration::from_millis(500 * 2_u64.pow(attempt))).await;
            }

            match self.call_api(&input).await {
                Ok(response_text) => match parse_analysis_response(&response_text) {
                    Ok(analysis) => return Ok(analysis),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to parse response, will retry");
                        last_error = Some(AnalyzeError::InvalidFormat(e));
                    }
                },
                Err(AnalyzeError::RateLimited) => {
                    return Err(AnalyzeError::RateLimited);
                }
                Err(e) => {
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AnalyzeError::Api("Unknown error".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_input() -> AnalyzeInput {
        AnalyzeInput {
            image: vec![0xFF, 0xD8, 0xFF, 0xE0],
            mime_type: "image/jpeg".to_string(),
            filename: Some("jeans.jpg".to_string()),
        }
    }

    fn mock_success_response() -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {
                                "text": "DESCRIPTION: Blue, jeans, bottomwear, slim fit, casual\nTAGS: jeans, blue, Bottomwear, Casual"
                            }
                        ]
                    }
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_success_response()))
            .mount(&mock_server)
            .await;

        let analyzer = GeminiAnalyzer::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            VisionConfig::default(),
        );

        let analysis = analyzer.analyze(sample_input()).await.unwrap();

        assert_eq!(
            analysis.description,
            "Blue, jeans, bottomwear, slim fit, casual"
        );
        assert_eq!(analysis.tags, vec!["jeans", "blue", "Bottomwear", "Casual"]);
    }

    #[tokio::test]
    async fn test_analyze_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let analyzer = GeminiAnalyzer::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            VisionConfig {
                retries: 0,
                ..Default::default()
            },
        );

        let result = analyzer.analyze(sample_input()).await;

        assert!(matches!(result, Err(AnalyzeError::RateLimited)));
    }

    #[tokio::test]
    async fn test_analyze_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
            .mount(&mock_server)
            .await;

        let analyzer = GeminiAnalyzer::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            VisionConfig {
                retries: 0,
                ..Default::default()
            },
        );

        let result = analyzer.analyze(sample_input()).await;

        assert!(matches!(result, Err(AnalyzeError::Api(_))));
    }

    #[tokio::test]
    async fn test_analyze_malformed_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    {"content": {"parts": [{"text": "A nice pair of jeans."}]}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let analyzer = GeminiAnalyzer::with_base_url(
            SecretString::new("test-key".into()),
            mock_server.uri(),
            VisionConfig {
                retries: 0,
                ..Default::default()
            },
        );

        let result = analyzer.analyze(sample_input()).await;

        assert!(matches!(result, Err(AnalyzeError::InvalidFormat(_))));
    }
}
