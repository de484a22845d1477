use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use counsel_core::error::{Error, FieldError};
use counsel_core::types::{Document, ImagePayload};
use serde::Serialize;
use serde_json::{json, Value};

use crate::actions::{self, ChatRequest, SimilarCasesRequest, UploadRequest};
use crate::AppState;

// ── Error mapping ─────────────────────────────────────────────────────────

/// Wrapper so every adapter error renders as a structured
/// `{success: false, message}` body with a fitting status code.
pub(crate) struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ProtectedRecord(_) => StatusCode::FORBIDDEN,
            Error::Conflict => StatusCode::CONFLICT,
            Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Extraction(_) | Error::Analysis(_) | Error::Model(_) => StatusCode::BAD_GATEWAY,
        };
        let errors = match &self.0 {
            Error::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        let body = ErrorBody {
            success: false,
            message: self.0.to_string(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}

fn malformed_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError(Error::Validation(vec![FieldError::new(
        "body",
        format!("malformed multipart request: {e}"),
    )]))
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(actions::list_documents(&state).await?))
}

pub(crate) async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(actions::get_document(&state, &id).await?))
}

pub(crate) async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<actions::DeleteOutcome>, ApiError> {
    Ok(Json(actions::delete_document(&state, &id).await?))
}

pub(crate) async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<actions::UploadOutcome>, ApiError> {
    let mut title = String::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(malformed_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => title = field.text().await.map_err(malformed_multipart)?,
            Some("files") | Some("file") => {
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(malformed_multipart)?;
                files.push(ImagePayload::new(media_type, bytes.to_vec()));
            },
            _ => {},
        }
    }

    Ok(Json(
        actions::upload(&state, UploadRequest { title, files }).await?,
    ))
}

pub(crate) async fn form_fill(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<actions::FormFillOutcome>, ApiError> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed_multipart)? {
        if field.name() == Some("file") {
            let media_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(malformed_multipart)?;
            file = Some(ImagePayload::new(media_type, bytes.to_vec()));
        }
    }

    Ok(Json(actions::form_fill(&state, file).await?))
}

pub(crate) async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<actions::ChatOutcome>, ApiError> {
    Ok(Json(actions::chat(&state, body).await?))
}

pub(crate) async fn similar_cases(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SimilarCasesRequest>,
) -> Result<Json<actions::CasesOutcome>, ApiError> {
    Ok(Json(actions::similar_cases(&state, body).await?))
}
