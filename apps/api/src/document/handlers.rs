use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::document::model::CvDocument;
use crate::document::normalize::{normalize, normalize_with_gaps};
use crate::document::ops::EditOp;
use crate::errors::AppError;
use crate::style::catalog::{all_templates, Template};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub document: CvDocument,
    /// JSON paths that were missing or malformed and got their default.
    pub defaulted: Vec<String>,
}

/// POST /api/v1/documents/normalize
///
/// Never fails on document shape: anything unusable is defaulted and listed.
pub async fn handle_normalize(Json(raw): Json<Value>) -> Json<NormalizeResponse> {
    let (document, defaulted) = normalize_with_gaps(&raw);
    Json(NormalizeResponse {
        document,
        defaulted,
    })
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub document: Value,
    pub ops: Vec<EditOp>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub document: CvDocument,
}

/// POST /api/v1/documents/edit
///
/// Applies the operations in order. The first one that cannot apply fails the
/// whole request with 400 and names its index.
pub async fn handle_edit(Json(req): Json<EditRequest>) -> Result<Json<EditResponse>, AppError> {
    let mut document = normalize(&req.document);
    let count = req.ops.len();
    for (index, op) in req.ops.into_iter().enumerate() {
        let name = op.name();
        document
            .apply(op)
            .map_err(|e| AppError::Validation(format!("ops[{index}] ({name}): {e}")))?;
    }
    debug!(ops = count, "Document edited");
    Ok(Json(EditResponse { document }))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [Template]> {
    Json(all_templates())
}
