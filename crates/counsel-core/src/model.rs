use anyhow::Result;
use async_trait::async_trait;

use crate::types::ImagePayload;

/// One request to the model service: a rendered instruction template plus
/// any image attachments.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// System / persona instruction. Empty = none.
    pub system: String,
    /// The prompt with all input fields interpolated.
    pub prompt: String,
    /// Images attached to the prompt (vision flows).
    pub images: Vec<ImagePayload>,
    /// Constrain the reply to JSON.
    pub json: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.images.push(image);
        self
    }

    pub fn expect_json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// The AI-service boundary. Implementations render the request into their
/// wire format, invoke the hosted model, and return the raw reply text;
/// parsing the reply against a schema is the calling flow's job.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, req: GenerateRequest) -> Result<String>;
}
