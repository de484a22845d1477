use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use counsel_core::model::{GenerateRequest, ModelBackend};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Calls a locally-hosted Ollama model via its native chat API.
///
/// Intended for privacy-sensitive deployments where document text must not
/// leave the local machine. Vision flows (OCR, form fill) work only when
/// the configured model accepts images; otherwise the host rejects the
/// request and the error propagates like any other failed call.
pub struct OllamaBackend {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout_secs: 300,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

#[async_trait]
impl ModelBackend for OllamaBackend {
    async fn generate(&self, req: GenerateRequest) -> Result<String> {
        let mut messages = Vec::new();
        if !req.system.is_empty() {
            messages.push(OllamaMessage {
                role: "system".into(),
                content: req.system.clone(),
                images: None,
            });
        }

        let images = (!req.images.is_empty()).then(|| {
            req.images
                .iter()
                .map(|i| base64::engine::general_purpose::STANDARD.encode(&i.data))
                .collect()
        });
        messages.push(OllamaMessage {
            role: "user".into(),
            content: req.prompt.clone(),
            images,
        });

        let request_body = OllamaChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            format: req.json.then_some("json"),
        };

        info!(
            model = %self.model,
            base_url = %self.base_url,
            images = req.images.len(),
            json = req.json,
            "calling ollama chat API"
        );

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()?;

        let response = match client.post(&url).json(&request_body).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(timeout_secs = self.timeout_secs, "ollama request timed out");
                anyhow::bail!("Ollama request timed out after {}s", self.timeout_secs);
            },
            Err(e) => {
                warn!("ollama request failed: {}", e);
                anyhow::bail!("Ollama request failed: {e}");
            },
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "ollama returned non-200: {}", body);
            anyhow::bail!("Ollama error {status}: {body}");
        }

        let parsed: OllamaChatResponse = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("failed to parse ollama response: {}", e);
                anyhow::bail!("Failed to parse Ollama response: {e}");
            },
        };

        let output = parsed.message.content;
        info!(output_len = output.len(), "ollama response received");
        Ok(output)
    }
}
