use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

// ── Documents ────────────────────────────────────────────────────────────

/// Predicted risk level of an analyzed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// Section summary produced by the summarization flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub facts: String,
    pub obligations: String,
    pub rights: String,
    pub deadlines: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Ordered "What if" scenarios and their potential impact.
    pub what_if_scenarios: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationPoints {
    pub points: Vec<String>,
    pub improvements: Vec<String>,
}

/// An analyzed legal document as stored on disk.
///
/// Immutable once written: the store never updates a document in place, the
/// only supported mutation is deletion. Wire names are camelCase to match
/// the stored JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub risk_level: RiskLevel,
    pub summary: DocumentSummary,
    pub risks: RiskReport,
    pub related_laws: Vec<String>,
    pub negotiation_points: NegotiationPoints,
    /// Concatenated OCR output of every uploaded page, in upload order.
    /// Context for all downstream model calls against this document.
    pub full_text: String,
}

/// Generate a document id: `doc-<unix millis>-<8 random alphanumerics>`.
pub fn generate_document_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!(
        "doc-{}-{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

// ── Chat ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// One turn of a chat session. Sessions live entirely on the client; the
/// chatbot adapter only ever sees the document text and the current
/// question, never prior turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// ── Form fill ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Original,
    Answer,
}

/// One segment of a reconstructed form: verbatim source text, or a
/// generated answer filling a blank. Concatenating segment text in order
/// reproduces the form's layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub text: String,
}

// ── Uploads ──────────────────────────────────────────────────────────────

/// A self-describing binary image: declared media type plus raw bytes.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_shape() {
        let id = generate_document_id();
        assert!(id.starts_with("doc-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn document_ids_are_unique() {
        let a = generate_document_id();
        let b = generate_document_id();
        assert_ne!(a, b);
    }

    #[test]
    fn risk_level_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"Medium\""
        );
    }

    #[test]
    fn form_segment_wire_names() {
        let segment = FormSegment {
            kind: SegmentKind::Answer,
            text: "Jane Doe".into(),
        };
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, r#"{"type":"answer","text":"Jane Doe"}"#);
    }

    #[test]
    fn image_payload_type_check() {
        assert!(ImagePayload::new("image/png", vec![1]).is_image());
        assert!(!ImagePayload::new("application/pdf", vec![1]).is_image());
    }
}
