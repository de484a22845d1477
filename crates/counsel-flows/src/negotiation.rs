use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use counsel_core::types::NegotiationPoints;
use serde::Deserialize;

const NEGOTIATION_PROMPT: &str = "\
You are an expert legal contract negotiator.\n\
\n\
Given the following contract text, identify potential negotiation points and suggest improvements to the clauses.\n\
\n\
Respond with a JSON object: {\"negotiationPoints\": [\"...\"], \"suggestedImprovements\": [\"...\"]}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NegotiationReply {
    negotiation_points: Vec<String>,
    suggested_improvements: Vec<String>,
}

/// Generate negotiation points and clause improvements for a contract.
/// `clause` narrows the focus to a single clause when present.
pub async fn negotiation_points(
    backend: &dyn ModelBackend,
    contract_text: &str,
    clause: Option<&str>,
) -> Result<NegotiationPoints> {
    let mut prompt = format!("{NEGOTIATION_PROMPT}\n\nContract Text:\n{contract_text}");
    if let Some(clause) = clause {
        prompt.push_str(&format!(
            "\n\nFocus specifically on the following clause:\n{clause}"
        ));
    }
    let reply: NegotiationReply =
        crate::call_json(backend, "negotiation points", GenerateRequest::new(prompt).expect_json())
            .await?;
    Ok(NegotiationPoints {
        points: reply.negotiation_points,
        improvements: reply.suggested_improvements,
    })
}
