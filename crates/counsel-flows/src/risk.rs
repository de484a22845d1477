use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use counsel_core::types::RiskLevel;
use serde::Deserialize;

const RISK_PROMPT: &str = "\
You are an AI legal assistant that predicts potential risks associated with a legal document and provides \"What if\" scenarios.\n\
\n\
Based on your analysis, determine the risk level (High, Medium, or Low) and provide a list of \"What if\" scenarios and their potential impact.\n\
\n\
Respond with a JSON object: {\"riskLevel\": \"High\" | \"Medium\" | \"Low\", \"whatIfScenarios\": [\"...\"]}";

/// Outcome of the risk-assessment flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub what_if_scenarios: Vec<String>,
}

/// Predict a document's risk level and enumerate what-if scenarios.
pub async fn assess_risk(
    backend: &dyn ModelBackend,
    document_text: &str,
) -> Result<RiskAssessment> {
    let prompt = format!("{RISK_PROMPT}\n\nAnalyze the following legal document:\n{document_text}");
    crate::call_json(backend, "risk assessment", GenerateRequest::new(prompt).expect_json()).await
}
