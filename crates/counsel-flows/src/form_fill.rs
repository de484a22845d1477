use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use counsel_core::types::{FormSegment, ImagePayload};
use serde::Deserialize;
use tracing::info;

const FORM_FILL_PROMPT: &str = "\
You are an AI assistant that helps users by filling out forms from an image. Your primary goal is to maintain the exact visual structure of the original form.\n\
\n\
Your task is to:\n\
1. Analyze Structure First: Look at the provided image and understand its spatial layout. Pay close attention to columns, tables, sections, and the relative positioning of text and blank fields.\n\
2. Perform OCR: Read all the text from the image.\n\
3. Identify Blanks: Locate all fillable areas. These might be underscores, empty boxes, bracketed text (e.g., [Client Name]), or just empty space next to a label.\n\
4. Generate Realistic Data: For each blank field, generate a realistic and context-appropriate example answer.\n\
5. Reconstruct with Structure: Break the entire document down into a sequence of segments. Each segment is either a piece of original text or an AI-generated answer. Crucially, the sequence of these segments must perfectly mirror the original document's structure, including line breaks, spacing, and layout. If the original form has two columns, your output text should reflect that structure.\n\
\n\
Example: If the form is \"Name: _____, Date: _____\", the output should be:\n\
[\n\
    { \"type\": \"original\", \"text\": \"Name: \" },\n\
    { \"type\": \"answer\", \"text\": \"Jane Doe\" },\n\
    { \"type\": \"original\", \"text\": \", Date: \" },\n\
    { \"type\": \"answer\", \"text\": \"25/08/2025\" }\n\
]\n\
\n\
Respond with a JSON object: {\"filledFormSegments\": [{\"type\": \"original\" | \"answer\", \"text\": \"...\"}]}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormFillReply {
    filled_form_segments: Vec<FormSegment>,
}

/// Fill a form image with suggested answers, returning the ordered
/// original/answer segments that reconstruct the form's layout.
pub async fn fill_form(
    backend: &dyn ModelBackend,
    image: ImagePayload,
) -> Result<Vec<FormSegment>> {
    info!(
        media_type = %image.media_type,
        bytes = image.data.len(),
        "filling form from image"
    );
    let req = GenerateRequest::new(FORM_FILL_PROMPT)
        .with_image(image)
        .expect_json();
    let reply: FormFillReply = crate::call_json(backend, "form fill", req).await?;
    Ok(reply.filled_form_segments)
}
