//! Prompt flows. Each module owns one instruction template: it interpolates
//! the input fields, invokes the model backend, and validates the JSON
//! reply into its typed output. A reply that fails validation is an error;
//! no flow retries.

pub mod cases;
pub mod chatbot;
pub mod form_fill;
pub mod negotiation;
pub mod ocr;
pub mod related_laws;
pub mod risk;
pub mod summarize;

use anyhow::{Context, Result};
use counsel_core::model::{GenerateRequest, ModelBackend};
use serde::de::DeserializeOwned;

/// Slice the first top-level JSON object out of a model reply. Models in
/// JSON mode still occasionally wrap the payload in code fences or prose.
pub fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end >= start).then(|| &reply[start..=end])
}

/// One schema-validated model call: generate, slice out the JSON object,
/// deserialize into the flow's reply type.
pub(crate) async fn call_json<T: DeserializeOwned>(
    backend: &dyn ModelBackend,
    flow: &'static str,
    req: GenerateRequest,
) -> Result<T> {
    let reply = backend
        .generate(req)
        .await
        .with_context(|| format!("{flow} call failed"))?;
    let json = extract_json(&reply)
        .with_context(|| format!("{flow} reply contained no JSON object"))?;
    serde_json::from_str(json)
        .with_context(|| format!("{flow} reply failed schema validation"))
}
