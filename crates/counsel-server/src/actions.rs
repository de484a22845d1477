//! The action layer: plain request-handler functions taking an explicit
//! input struct and returning an explicit result struct. The HTTP routes
//! are thin extractors around these, so every behavior here is testable
//! without a running server.

use chrono::Utc;
use counsel_core::error::{Error, FieldError};
use counsel_core::types::{
    generate_document_id, Document, FormSegment, ImagePayload, RiskReport,
};
use counsel_flows as flows;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AppState;

pub const MAX_UPLOAD_FILES: usize = 10;
pub const MIN_TITLE_CHARS: usize = 3;

// ── Inputs ────────────────────────────────────────────────────────────────

pub struct UploadRequest {
    pub title: String,
    pub files: Vec<ImagePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub document_text: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarCasesRequest {
    pub document_text: String,
}

// ── Outcomes ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub document_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFillOutcome {
    pub success: bool,
    pub message: String,
    pub filled_form: Vec<FormSegment>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatOutcome {
    pub success: bool,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct CasesOutcome {
    pub success: bool,
    pub data: Vec<flows::cases::CaseRecord>,
}

// ── Validation ────────────────────────────────────────────────────────────

/// Validate an upload before any model call is made. Fail fast: a rejected
/// upload costs nothing.
fn validate_upload(req: &UploadRequest) -> Result<(), Error> {
    let mut errors = Vec::new();

    if req.title.chars().count() < MIN_TITLE_CHARS {
        errors.push(FieldError::new(
            "title",
            "Title must be at least 3 characters long.",
        ));
    }
    if req.files.is_empty() {
        errors.push(FieldError::new("files", "At least one file is required."));
    } else if req.files.len() > MAX_UPLOAD_FILES {
        errors.push(FieldError::new(
            "files",
            "You can upload a maximum of 10 images.",
        ));
    }
    if req.files.iter().any(|f| f.data.is_empty()) {
        errors.push(FieldError::new("files", "Files are required."));
    }
    if !req.files.iter().all(ImagePayload::is_image) {
        errors.push(FieldError::new("files", "All files must be images."));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

// ── Upload pipeline ───────────────────────────────────────────────────────

/// The upload-and-analyze pipeline: validate, OCR each page in submission
/// order, fan out the four analysis calls concurrently, persist the
/// assembled document. All-or-nothing: any failure leaves the store
/// untouched.
pub async fn upload(state: &AppState, req: UploadRequest) -> Result<UploadOutcome, Error> {
    validate_upload(&req)?;

    let backend = state.backend.as_ref();

    // Page order in fullText must match upload order, so OCR is sequential.
    let mut combined = String::new();
    for (page, file) in req.files.into_iter().enumerate() {
        let text = flows::ocr::extract_text(backend, file)
            .await
            .map_err(|e| Error::Model(format!("text extraction failed on page {}: {e:#}", page + 1)))?;
        combined.push_str(&text);
        combined.push_str("\n\n");
    }
    let full_text = combined.trim().to_string();

    if full_text.is_empty() {
        return Err(Error::Extraction(
            "Could not extract any text from the uploaded images. Please ensure they are clear \
             and legible."
                .into(),
        ));
    }

    info!(chars = full_text.len(), "text extracted, starting analysis fan-out");

    // Fail-fast join: the first rejection aborts the whole fan-out.
    let (summary, risk, related_laws, negotiation_points) = tokio::try_join!(
        flows::summarize::summarize(backend, &full_text),
        flows::risk::assess_risk(backend, &full_text),
        flows::related_laws::related_laws(backend, &full_text),
        flows::negotiation::negotiation_points(backend, &full_text, None),
    )
    .map_err(|e| Error::Analysis(format!("{e:#}")))?;

    let document = Document {
        id: generate_document_id(),
        title: req.title.clone(),
        created_at: Utc::now(),
        risk_level: risk.risk_level,
        summary,
        risks: RiskReport {
            what_if_scenarios: risk.what_if_scenarios,
        },
        related_laws,
        negotiation_points,
        full_text,
    };
    let document_id = document.id.clone();

    state.store.append(document).await?;
    info!(id = %document_id, title = %req.title, "document analyzed and stored");

    Ok(UploadOutcome {
        success: true,
        message: format!("Document \"{}\" analyzed successfully!", req.title),
        redirect: Some("/documents".into()),
        document_id,
    })
}

// ── Form fill ─────────────────────────────────────────────────────────────

pub async fn form_fill(
    state: &AppState,
    file: Option<ImagePayload>,
) -> Result<FormFillOutcome, Error> {
    let file = match file {
        Some(f) if !f.data.is_empty() && f.is_image() => f,
        _ => {
            return Err(Error::Validation(vec![FieldError::new(
                "file",
                "An image file is required.",
            )]))
        },
    };

    let segments = flows::form_fill::fill_form(state.backend.as_ref(), file)
        .await
        .map_err(|e| {
            let detail = format!("{e:#}");
            if detail.contains("schema validation") {
                Error::Model(
                    "The AI could not process this image. Please ensure the document is a \
                     fillable form."
                        .into(),
                )
            } else {
                Error::Model(detail)
            }
        })?;

    Ok(FormFillOutcome {
        success: true,
        message: "AI has filled the form with suggestions!".into(),
        filled_form: segments,
    })
}

// ── Documents ─────────────────────────────────────────────────────────────

pub async fn list_documents(state: &AppState) -> Result<Vec<Document>, Error> {
    state.store.list_all().await
}

pub async fn get_document(state: &AppState, id: &str) -> Result<Document, Error> {
    state.store.get(id).await
}

pub async fn delete_document(state: &AppState, id: &str) -> Result<DeleteOutcome, Error> {
    state.store.delete(id).await?;
    Ok(DeleteOutcome {
        success: true,
        message: "Document deleted successfully.".into(),
    })
}

// ── Chat / similar cases ──────────────────────────────────────────────────

pub async fn chat(state: &AppState, req: ChatRequest) -> Result<ChatOutcome, Error> {
    let answer = flows::chatbot::answer(state.backend.as_ref(), &req.document_text, &req.question)
        .await
        .map_err(|e| {
            warn!("chatbot call failed: {e:#}");
            Error::Model("Failed to get response from chatbot.".into())
        })?;
    Ok(ChatOutcome {
        success: true,
        data: answer,
    })
}

pub async fn similar_cases(
    state: &AppState,
    req: SimilarCasesRequest,
) -> Result<CasesOutcome, Error> {
    let cases = flows::cases::similar_cases(state.backend.as_ref(), &req.document_text)
        .await
        .map_err(|e| Error::Model(format!("{e:#}")))?;
    Ok(CasesOutcome {
        success: true,
        data: cases,
    })
}
