use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use counsel_core::types::ImagePayload;
use serde::Deserialize;
use tracing::info;

const OCR_PROMPT: &str = "\
You are an Optical Character Recognition (OCR) expert.\n\
Your task is to accurately extract all text from the provided image of a document.\n\
Preserve the original formatting, including line breaks and paragraphs, as best as possible.\n\
\n\
Respond with a JSON object: {\"extractedText\": \"<the full text content extracted from the document image>\"}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OcrReply {
    extracted_text: String,
}

/// Extract plain text from one document image.
pub async fn extract_text(backend: &dyn ModelBackend, image: ImagePayload) -> Result<String> {
    info!(
        media_type = %image.media_type,
        bytes = image.data.len(),
        "extracting text from image"
    );
    let req = GenerateRequest::new(OCR_PROMPT)
        .with_image(image)
        .expect_json();
    let reply: OcrReply = crate::call_json(backend, "text extraction", req).await?;
    Ok(reply.extracted_text)
}
