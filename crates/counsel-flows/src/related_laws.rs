use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use serde::Deserialize;

const RELATED_LAWS_PROMPT: &str = "\
You are a legal expert. Given the following legal document text, suggest relevant laws, acts, clauses, and bills that may be related to the document.\n\
\n\
Respond with a JSON object: {\"laws\": [\"...\"]}";

#[derive(Deserialize)]
struct RelatedLawsReply {
    laws: Vec<String>,
}

/// Suggest laws, acts, clauses, and bills related to a document.
pub async fn related_laws(backend: &dyn ModelBackend, document_text: &str) -> Result<Vec<String>> {
    let prompt = format!("{RELATED_LAWS_PROMPT}\n\nDocument Text:\n{document_text}");
    let reply: RelatedLawsReply =
        crate::call_json(backend, "related laws", GenerateRequest::new(prompt).expect_json())
            .await?;
    Ok(reply.laws)
}
