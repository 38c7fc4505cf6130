//! HTTP text-classification endpoint
//!
//! Speaks the Hugging Face inference wire format: `POST {"inputs": text}`
//! answered by a list of `{label, score}` candidates (optionally nested
//! one level for batched inputs).

use super::{ClassifierError, DiseaseClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MODEL: &str = "Nawras03/olive-disease-diagnosis";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the classifier endpoint
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: format!("https://api-inference.huggingface.co/models/{DEFAULT_MODEL}"),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("CLASSIFIER_URL").unwrap_or(defaults.url),
            api_key: std::env::var("CLASSIFIER_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            timeout: std::env::var("CLASSIFIER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }
}

/// Classifier backed by a remote inference endpoint
pub struct HttpClassifier {
    client: Client,
    config: ClassifierConfig,
    model_id: String,
}

impl HttpClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::unknown(format!("Failed to create HTTP client: {e}")))?;

        let model_id = config
            .url
            .rsplit("/models/")
            .next()
            .unwrap_or(&config.url)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            config,
            model_id,
        })
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> ClassifierError {
        let message = body.to_string();
        match status.as_u16() {
            401 | 403 => ClassifierError::auth(format!("Authentication failed: {message}")),
            429 => ClassifierError::rate_limit(format!("Rate limited: {message}")),
            400 | 422 => ClassifierError::invalid_request(format!("Invalid request: {message}")),
            503 => {
                // Model still loading; the endpoint reports an estimate
                let mut err = ClassifierError::server_error(format!("Model unavailable: {message}"));
                if let Some(wait) = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("estimated_time").and_then(serde_json::Value::as_f64))
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                {
                    err = err.with_retry_after(wait);
                }
                err
            }
            500..=599 => ClassifierError::server_error(format!("Server error: {message}")),
            _ => ClassifierError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl DiseaseClassifier for HttpClassifier {
    async fn classify(&self, transcript: &str) -> Result<String, ClassifierError> {
        let mut request = self
            .client
            .post(&self.config.url)
            .header("content-type", "application/json")
            .json(&InferenceRequest { inputs: transcript });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::network(format!("Request timeout: {e}"))
            } else if e.is_connect() {
                ClassifierError::network(format!("Connection failed: {e}"))
            } else {
                ClassifierError::unknown(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        parse_label(&body)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Pick the highest-scoring label from an inference response body
pub(crate) fn parse_label(body: &str) -> Result<String, ClassifierError> {
    let parsed: InferenceResponse = serde_json::from_str(body).map_err(|e| {
        ClassifierError::malformed(format!("Failed to parse response: {e} - body: {body}"))
    })?;

    let candidates = match parsed {
        InferenceResponse::Flat(c) => c,
        InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
    };

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|c| normalize_label(&c.label))
        .ok_or_else(|| ClassifierError::malformed(format!("No labels in response: {body}")))
}

/// `LABEL_3` becomes `3`, matching how the metadata table is keyed.
/// Named labels pass through unchanged.
fn normalize_label(label: &str) -> String {
    label
        .strip_prefix("LABEL_")
        .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(label)
        .to_string()
}

// Inference API types

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}
