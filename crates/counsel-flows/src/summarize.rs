use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use counsel_core::types::DocumentSummary;
use serde::Deserialize;

const SUMMARIZE_PROMPT: &str = "\
You are an AI assistant specialized in summarizing legal documents.\n\
\n\
Given the text of a legal document, your task is to provide a concise summary, extracting key information and organizing it into the following sections:\n\
\n\
- Facts: Briefly describe the essential facts and background information presented in the document.\n\
- Obligations: Summarize the key obligations and responsibilities of each party involved.\n\
- Rights: Outline the rights and entitlements granted to each party by the document.\n\
- Deadlines: List any critical deadlines or time-sensitive requirements mentioned in the document.\n\
\n\
Respond with a JSON object: {\"summary\": {\"facts\": \"...\", \"obligations\": \"...\", \"rights\": \"...\", \"deadlines\": \"...\"}}";

#[derive(Deserialize)]
struct SummaryReply {
    summary: DocumentSummary,
}

/// Summarize a document into facts, obligations, rights, and deadlines.
pub async fn summarize(
    backend: &dyn ModelBackend,
    document_text: &str,
) -> Result<DocumentSummary> {
    let prompt = format!("{SUMMARIZE_PROMPT}\n\nDocument Text:\n{document_text}");
    let reply: SummaryReply =
        crate::call_json(backend, "summarization", GenerateRequest::new(prompt).expect_json())
            .await?;
    Ok(reply.summary)
}
