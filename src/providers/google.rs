use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::model::{GroundingLink, RawModelResponse};
use crate::providers::{check_status, ItineraryProvider, PromptRequest};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or(ProviderError::MissingApiKey("GOOGLE_API_KEY"))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(GoogleProvider {
            client: builder.build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body(&self, request: &PromptRequest) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "tools": [{ "googleMaps": {} }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        });

        if let Some(location) = request.location {
            body["toolConfig"] = json!({
                "retrievalConfig": {
                    "latLng": {
                        "latitude": location.latitude,
                        "longitude": location.longitude
                    }
                }
            });
        }

        body
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    maps: Option<MapsSource>,
}

#[derive(Debug, Deserialize)]
struct MapsSource {
    #[serde(default)]
    title: String,
    #[serde(default)]
    uri: String,
}

impl GenerateContentResponse {
    fn into_raw(self) -> Result<RawModelResponse, ProviderError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        // Only map chunks carry place links; web chunks are ignored
        let links = candidate
            .grounding_metadata
            .map(|m| {
                m.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.maps)
                    .map(|maps| GroundingLink::new(maps.title, maps.uri))
                    .collect()
            })
            .unwrap_or_default();

        Ok(RawModelResponse { text, links })
    }
}

#[async_trait]
impl ItineraryProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, request: &PromptRequest) -> Result<RawModelResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: GenerateContentResponse = response.json().await?;
        debug!("{:?}", body);

        body.into_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::LatLng;
    use mockito::{Matcher, Server};

    fn test_config(base_url: Option<String>) -> ProviderConfig {
        ProviderConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            ..ProviderConfig::new("gemini-2.5-flash")
        }
    }

    fn prompt(location: Option<LatLng>) -> PromptRequest {
        PromptRequest {
            system_instruction: "be lazy".to_string(),
            prompt: "Region: Seoul".to_string(),
            location,
        }
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = GoogleProvider::new(&test_config(None), None).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_request_body_location() {
        let provider = GoogleProvider::new(&test_config(None), None).unwrap();

        let body = provider.request_body(&prompt(None));
        assert!(body.get("toolConfig").is_none());
        assert_eq!(body["tools"][0], json!({ "googleMaps": {} }));
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be lazy");

        let body = provider.request_body(&prompt(Some(LatLng {
            latitude: 37.5,
            longitude: 127.0,
        })));
        assert_eq!(
            body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"],
            37.5
        );
    }

    #[tokio::test]
    async fn test_generate_extracts_text_and_map_links() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({ "tools": [{ "googleMaps": {} }] })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": { "parts": [
                            { "text": "[TITLE] Trip\n" },
                            { "text": "[DAY 1]\n[PLACE] Cafe A" }
                        ]},
                        "groundingMetadata": { "groundingChunks": [
                            { "maps": { "title": "Cafe A", "uri": "https://maps/a" } },
                            { "web": { "title": "Blog", "uri": "https://blog" } }
                        ]}
                    }]
                }"#,
            )
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(Some(server.url())), None).unwrap();
        let raw = provider.generate(&prompt(None)).await.unwrap();

        assert_eq!(raw.text, "[TITLE] Trip\n[DAY 1]\n[PLACE] Cafe A");
        assert_eq!(raw.links, vec![GroundingLink::new("Cafe A", "https://maps/a")]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_overloaded_is_transient() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(429)
            .with_body(r#"{"error": {"message": "Resource exhausted"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(Some(server.url())), None).unwrap();
        let err = provider.generate(&prompt(None)).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_generate_api_error_is_terminal() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(Some(server.url())), None).unwrap();
        let err = provider.generate(&prompt(None)).await.unwrap_err();
        assert!(!err.is_transient());
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad request");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(Some(server.url())), None).unwrap();
        let err = provider.generate(&prompt(None)).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }
}
