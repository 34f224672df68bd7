//! Google Gemini responder for Lafia Chat
//!
//! Sends the user message to `models/{model}:generateContent` and returns the
//! first candidate's text. One attempt per message, no retries. The API key
//! travels in the `x-goog-api-key` header and never appears in the URL.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod types;

use async_trait::async_trait;
use lafia_core::{get_env_int, get_env_or, get_optional_env, LafiaError, Responder, Result};
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use types::{GenerateContentRequest, GenerateContentResponse};

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when `GEMINI_MODEL` is unset
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Request timeout used when `GEMINI_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// Secret key; calls fail with a config error while unset
    pub api_key: Option<String>,
    /// Model id, e.g. `gemini-2.0-flash`
    pub model: String,
    /// API root without trailing slash
    pub base_url: String,
    /// Whole-request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

// keeps the key out of Debug output
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL` and
    /// `GEMINI_TIMEOUT_SECS`; a timeout of 0 disables it
    pub fn from_env() -> Self {
        let timeout_secs = get_env_int("GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        Self {
            api_key: get_optional_env("GEMINI_API_KEY"),
            model: get_env_or("GEMINI_MODEL", DEFAULT_MODEL),
            base_url: get_env_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point at another API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use another model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full `generateContent` URL
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Log the effective settings without revealing the key
    pub fn log_settings(&self) {
        let api_key = if self.api_key.is_some() { "set" } else { "<not set>" };
        let timeout_secs = self.timeout.map(|t| t.as_secs()).unwrap_or(0);
        tracing::info!(
            model = %self.model,
            base_url = %self.base_url,
            timeout_secs,
            api_key,
            "Gemini responder settings"
        );
        if self.api_key.is_none() {
            tracing::warn!(
                "GEMINI_API_KEY is not set; messages without a lexicon match will get the fallback reply"
            );
        }
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client with its own connection pool
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(300))
            .tcp_keepalive(Duration::from_secs(60));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Settings in use
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Ask the model about `message` and return the first candidate's text
    ///
    /// Any non-2xx status is a network failure and its body is not read.
    pub async fn generate_content(&self, message: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LafiaError::config("GEMINI_API_KEY is not set"))?;

        let start_time = Instant::now();
        let resp = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::from_message(message))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LafiaError::network(format!(
                "Gemini API returned HTTP {}",
                status
            )));
        }

        let body = resp.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| LafiaError::malformed(format!("invalid Gemini JSON: {}", e)))?;
        let text = parsed.first_text().map_err(LafiaError::malformed)?;

        tracing::debug!(
            model = %self.config.model,
            latency_ms = start_time.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "Gemini reply received"
        );
        Ok(text)
    }
}

#[async_trait]
impl Responder for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn respond(&self, message: &str) -> Result<String> {
        self.generate_content(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use lafia_core::{default_lexicon, ReplySource, Resolver, FALLBACK_REPLY};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Seen {
        action: String,
        api_key: Option<String>,
        query: Option<String>,
        body: Value,
    }

    /// Fake `generateContent` endpoint answering with `status` and `body`
    async fn fake_gemini(status: StatusCode, body: String) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let app = Router::new().route(
            "/v1beta/models/:action",
            post(
                move |Path(action): Path<String>,
                      uri: Uri,
                      headers: HeaderMap,
                      Json(payload): Json<Value>| {
                    let log = log.clone();
                    let body = body.clone();
                    async move {
                        log.lock().unwrap().push(Seen {
                            action,
                            api_key: headers
                                .get("x-goog-api-key")
                                .and_then(|v| v.to_str().ok())
                                .map(String::from),
                            query: uri.query().map(String::from),
                            body: payload,
                        });
                        (status, [("content-type", "application/json")], body).into_response()
                    }
                },
            ),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1beta", addr), seen)
    }

    fn client_for(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            GeminiConfig::default()
                .with_api_key("test-key-123")
                .with_base_url(base_url),
        )
        .unwrap()
    }

    fn candidate(text: &str) -> String {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ], "role": "model" }, "finishReason": "STOP" }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_endpoint_and_defaults() {
        let config = GeminiConfig::default().with_base_url("http://localhost:1/v1beta/");
        assert_eq!(
            config.endpoint(),
            "http://localhost:1/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = GeminiConfig::default().with_api_key("super-secret-value");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("<set>"));
    }

    #[tokio::test]
    async fn test_success_returns_candidate_text() {
        let (base, seen) = fake_gemini(StatusCode::OK, candidate("Quantum states are linked.")).await;
        let client = client_for(&base);

        let text = client.respond("quantum entanglement explained").await.unwrap();
        assert_eq!(text, "Quantum states are linked.");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].action, "gemini-2.0-flash:generateContent");
        assert_eq!(seen[0].api_key.as_deref(), Some("test-key-123"));
        assert_eq!(seen[0].query, None);
        assert_eq!(
            seen[0].body,
            json!({ "contents": [ { "parts": [ { "text": "quantum entanglement explained" } ] } ] })
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_is_malformed() {
        let (base, _) = fake_gemini(StatusCode::OK, json!({ "candidates": [] }).to_string()).await;
        let err = client_for(&base).respond("anything").await.unwrap_err();
        assert!(matches!(err, LafiaError::MalformedResponse(_)), "{err}");
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let (base, _) = fake_gemini(StatusCode::OK, "<html>oops</html>".to_string()).await;
        let err = client_for(&base).respond("anything").await.unwrap_err();
        assert!(matches!(err, LafiaError::MalformedResponse(_)), "{err}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_failure() {
        // body would parse fine; status alone decides
        let (base, _) = fake_gemini(StatusCode::TOO_MANY_REQUESTS, candidate("ignored")).await;
        let err = client_for(&base).respond("anything").await.unwrap_err();
        match err {
            LafiaError::Network(msg) => assert!(msg.contains("429")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}/v1beta", addr))
            .respond("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, LafiaError::Network(_)), "{err}");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let (base, seen) = fake_gemini(StatusCode::OK, candidate("unused")).await;
        let client = GeminiClient::new(GeminiConfig::default().with_base_url(&base)).unwrap();

        let err = client.respond("anything").await.unwrap_err();
        assert!(matches!(err, LafiaError::Config(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolver_falls_back_on_gemini_failure() {
        let (base, seen) = fake_gemini(StatusCode::OK, json!({ "candidates": [] }).to_string()).await;
        let resolver = Resolver::new(default_lexicon(), Arc::new(client_for(&base)));

        let reply = resolver.resolve("quantum entanglement explained").await.unwrap();
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolver_uses_lexicon_before_gemini() {
        let (base, seen) = fake_gemini(StatusCode::OK, candidate("unused")).await;
        let resolver = Resolver::new(default_lexicon(), Arc::new(client_for(&base)));

        let reply = resolver.resolve("fulafia location").await.unwrap();
        assert!(reply.source.is_local());
        assert!(seen.lock().unwrap().is_empty());
    }
}
