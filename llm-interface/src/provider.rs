use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use snooscope_core::{CoreError, LlmError};
use tracing::{debug, info};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const PROVIDER_NAME: &str = "gemini";

/// Seam between the analysis pipeline and the generative-language API.
/// The server holds this as a trait object so tests can substitute a
/// canned provider.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Sends one prompt and returns the raw model text. Single exchange,
    /// no retry, no streaming.
    async fn generate_insights(&self, prompt: &str) -> Result<String, CoreError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<ContentBlock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentBlock {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentBlock,
}

/// Client for Google's Gemini generateContent endpoint.
///
/// One key is drawn from the configured pool at construction and reused
/// for the process lifetime; quota spreading happens across horizontally
/// scaled instances, not across requests.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn from_pool(pool: &[String]) -> Result<Self, CoreError> {
        if pool.is_empty() {
            return Err(LlmError::EmptyKeyPool.into());
        }
        let api_key = pool[fastrand::usize(..pool.len())].clone();
        info!("Selected one of {} configured Gemini API keys", pool.len());

        Ok(Self {
            http_client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Points the provider at a different base URL. Used by tests to
    /// target a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl InsightProvider for GeminiProvider {
    async fn generate_insights(&self, prompt: &str) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );
        let body = GenerateContentRequest {
            contents: vec![ContentBlock {
                parts: vec![ContentPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Requesting insights from {} ({})", PROVIDER_NAME, GEMINI_MODEL);
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::ServerError {
                status_code: response.status().as_u16(),
            }
            .into());
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|_| LlmError::InvalidResponseFormat {
                provider: PROVIDER_NAME.to_string(),
            })?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| LlmError::InvalidResponseFormat {
                provider: PROVIDER_NAME.to_string(),
            })?;

        debug!("Received {} bytes of model text", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gemini_reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ], "role": "model" } }
            ]
        })
    }

    #[test]
    fn test_empty_key_pool_is_rejected() {
        let err = GeminiProvider::from_pool(&[]).unwrap_err();
        assert!(matches!(err, CoreError::Llm(LlmError::EmptyKeyPool)));
    }

    #[tokio::test]
    async fn test_generate_insights_returns_model_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(gemini_reply("```json\n{\"age\":\"30\"}\n```")),
            )
            .mount(&server)
            .await;

        let provider = GeminiProvider::from_pool(&["test-key".to_string()])
            .unwrap()
            .with_base_url(server.uri());

        let text = provider.generate_insights("analyze this").await.unwrap();
        assert_eq!(text, "```json\n{\"age\":\"30\"}\n```");
    }

    #[tokio::test]
    async fn test_provider_error_status_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = GeminiProvider::from_pool(&["test-key".to_string()])
            .unwrap()
            .with_base_url(server.uri());

        let err = provider.generate_insights("analyze this").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Llm(LlmError::ServerError { status_code: 429 })
        ));
    }

    #[tokio::test]
    async fn test_missing_candidates_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::from_pool(&["test-key".to_string()])
            .unwrap()
            .with_base_url(server.uri());

        let err = provider.generate_insights("analyze this").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Llm(LlmError::InvalidResponseFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_key_is_drawn_from_pool() {
        let pool = vec!["k1".to_string(), "k2".to_string(), "k3".to_string()];
        let provider = GeminiProvider::from_pool(&pool).unwrap();
        assert!(pool.contains(&provider.api_key));
    }
}
