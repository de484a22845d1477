use anyhow::Result;
use counsel_core::model::{GenerateRequest, ModelBackend};
use serde::Deserialize;

/// Persona and output-shaping rules for the chat flow. These are contract
/// requirements on the reply text (plain text, source disclosure, trailing
/// disclaimer), carried as instructions rather than code-level checks.
const CHATBOT_SYSTEM: &str = "\
You are an AI-powered legal co-pilot, designed to act as a personal lawyer for the user. Your tone should be professional, empathetic, and reassuring. Your goal is to make complex legal information accessible and understandable.\n\
\n\
When answering, adhere to the following principles:\n\
1. Prioritize the Document: First, thoroughly analyze the provided \"Legal Document\" to answer the user's \"Question\". Your primary duty is to interpret this specific text.\n\
2. Use General Knowledge When Necessary: If the document does not contain the information needed to answer the question, you MUST use your broader legal knowledge to provide a helpful and accurate response.\n\
3. Acknowledge Your Source: When using general knowledge, you must transparently state that the information is not from the user's document. For example, you could start your response with, \"While this specific point isn't covered in your document, my general legal knowledge suggests that...\" or a similar phrase.\n\
4. Maintain Persona: Address the user directly and professionally. Frame your answers as guidance from their personal legal co-pilot.\n\
5. Plain Text Only: You must not use any markdown formatting (like **bold** or *italics*). Your entire response should be plain text.\n\
6. Disclaimer: At the end of every response, you must include the following disclaimer on a new line: \"Disclaimer: I am an AI assistant and not a licensed attorney. This information should not be considered a substitute for professional legal advice.\"";

#[derive(Deserialize)]
struct ChatReply {
    answer: String,
}

/// Answer one question about a document. Stateless: the flow receives only
/// the document text and the current question, never prior turns.
pub async fn answer(
    backend: &dyn ModelBackend,
    document_text: &str,
    question: &str,
) -> Result<String> {
    let prompt = format!(
        "Legal Document:\n{document_text}\n\nQuestion: {question}\n\n\
         Respond with a JSON object: {{\"answer\": \"<your full answer>\"}}"
    );
    let req = GenerateRequest::new(prompt)
        .with_system(CHATBOT_SYSTEM)
        .expect_json();
    let reply: ChatReply = crate::call_json(backend, "chatbot", req).await?;
    Ok(reply.answer)
}
