use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use serde::{Deserialize, Serialize};

const CASES_PROMPT: &str = "\
You are a legal research expert. Based on the following legal document, find 3-5 relevant or similar court cases from Indian law.\n\
\n\
For each case, provide the case name, the court, the year it was decided, a brief summary, and an explanation of its relevance to the provided document.\n\
\n\
Respond with a JSON object: {\"cases\": [{\"caseName\": \"Smith v. Jones\", \"court\": \"...\", \"year\": 2015, \"summary\": \"...\", \"relevance\": \"...\"}]}";

/// One similar court case. Pure request/response output, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub case_name: String,
    pub court: String,
    pub year: i32,
    pub summary: String,
    pub relevance: String,
}

#[derive(Deserialize)]
struct CasesReply {
    cases: Vec<CaseRecord>,
}

/// Find court cases similar to a document. Targets 3-5 entries; the count
/// is not structurally enforced.
pub async fn similar_cases(
    backend: &dyn ModelBackend,
    document_text: &str,
) -> Result<Vec<CaseRecord>> {
    let prompt = format!("{CASES_PROMPT}\n\nDocument Text:\n{document_text}");
    let reply: CasesReply =
        crate::call_json(backend, "similar cases", GenerateRequest::new(prompt).expect_json())
            .await?;
    Ok(reply.cases)
}
