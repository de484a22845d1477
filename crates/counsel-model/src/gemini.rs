use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use counsel_core::model::{GenerateRequest, ModelBackend};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Calls the hosted Gemini generateContent API.
///
/// Vision-capable: attached images ride along as inline base64 parts. When
/// a request asks for JSON, the response MIME type is constrained so the
/// model cannot wrap the payload in prose.
pub struct GeminiBackend {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: model.into(),
            timeout_secs: 120,
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn generate(&self, req: GenerateRequest) -> Result<String> {
        let mut parts = Vec::with_capacity(req.images.len() + 1);
        for image in &req.images {
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: image.media_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                }),
            });
        }
        parts.push(Part::text(&req.prompt));

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            system_instruction: (!req.system.is_empty()).then(|| Content {
                parts: vec![Part::text(&req.system)],
            }),
            generation_config: req.json.then(|| GenerationConfig {
                response_mime_type: "application/json".into(),
            }),
        };

        info!(
            model = %self.model,
            images = req.images.len(),
            json = req.json,
            prompt_len = req.prompt.len(),
            "calling gemini generateContent"
        );

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()?;

        let response = match client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(timeout_secs = self.timeout_secs, "gemini request timed out");
                anyhow::bail!("Gemini request timed out after {}s", self.timeout_secs);
            },
            Err(e) => {
                warn!("gemini request failed: {}", e);
                anyhow::bail!("Gemini request failed: {e}");
            },
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "gemini returned non-200: {}", body);
            anyhow::bail!("Gemini error {status}: {body}");
        }

        let parsed: GenerateContentResponse = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("failed to parse gemini response: {}", e);
                anyhow::bail!("Failed to parse Gemini response: {e}");
            },
        };

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("Gemini returned no candidate text");
        }

        info!(output_len = text.len(), "gemini response received");
        Ok(text)
    }
}
