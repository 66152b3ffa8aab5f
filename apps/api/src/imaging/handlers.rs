use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::document::model::CvDocument;
use crate::document::normalize::normalize;
use crate::errors::AppError;
use crate::imaging::transparency::{self, FilterError};
use crate::render::assets::{decode_data_url, is_remote};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub document: Value,
    pub enabled: bool,
    #[serde(default)]
    pub threshold: Option<u8>,
    /// The untreated image URL, sent back when turning transparency off.
    #[serde(default)]
    pub original_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub document: CvDocument,
    /// Present when transparency was just enabled; the host keeps it to undo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

fn bad_multipart(e: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("malformed multipart body: {e}"))
}

async fn filter_blocking(
    bytes: Vec<u8>,
    threshold: u8,
    max_pixels: u64,
) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || {
        transparency::apply_transparency(&bytes, threshold, max_pixels)
    })
    .await
    .map_err(|e| AppError::ImageProcessing(e.to_string()))?
    .map_err(AppError::from)
}

/// POST /api/v1/images/transparency
///
/// Multipart form with an `image` file and an optional `threshold` field.
/// Responds with the keyed PNG.
pub async fn handle_transparency(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut threshold = state.config.transparency_threshold;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                image = Some(field.bytes().await.map_err(bad_multipart)?.to_vec());
            }
            Some("threshold") => {
                let raw = field.text().await.map_err(bad_multipart)?;
                threshold = raw.trim().parse().map_err(|_| {
                    AppError::Validation(format!("threshold must be 0-255, got '{raw}'"))
                })?;
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("missing 'image' field".to_string()))?;
    if image.len() > state.config.max_image_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "image is {} bytes, limit is {}",
            image.len(),
            state.config.max_image_bytes
        )));
    }

    let png = filter_blocking(image, threshold, state.config.max_image_pixels).await?;
    info!(bytes = png.len(), threshold, "Background removed");
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/png"))],
        png,
    )
        .into_response())
}

/// Raw bytes of the image currently on the document.
async fn current_image_bytes(state: &AppState, url: &str) -> Result<Vec<u8>, AppError> {
    if url.starts_with("data:") {
        return decode_data_url(url).map_err(|e| AppError::ImageProcessing(e.to_string()));
    }
    if is_remote(url) {
        let body = state
            .assets
            .fetch(url)
            .await
            .map_err(|e| AppError::ImageProcessing(format!("could not fetch '{url}': {e}")))?;
        return Ok(body.to_vec());
    }
    Err(AppError::ImageProcessing(format!(
        "image source '{url}' cannot be read by the server"
    )))
}

/// POST /api/v1/documents/profile-image/transparency
///
/// Flips the profile image's transparency flag. Enabling runs the filter and
/// swaps the image for the keyed PNG; any failure leaves the flag off and the
/// document unchanged on the caller's side.
pub async fn handle_toggle_transparency(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let doc = normalize(&req.document);
    let current = doc
        .personal_info
        .profile_image
        .as_ref()
        .ok_or(FilterError::NoProfileImage)?;

    if !req.enabled {
        let updated = transparency::disable_on_document(&doc, req.original_url.as_deref())?;
        return Ok(Json(ToggleResponse {
            document: updated,
            original_url: None,
        }));
    }

    if current.is_transparent {
        return Ok(Json(ToggleResponse {
            document: doc,
            original_url: req.original_url,
        }));
    }

    let original_url = current.url.clone();
    let bytes = current_image_bytes(&state, &original_url).await?;
    let threshold = req.threshold.unwrap_or(state.config.transparency_threshold);
    let max_pixels = state.config.max_image_pixels;
    let updated = tokio::task::spawn_blocking(move || {
        transparency::enable_on_document(&doc, &bytes, threshold, max_pixels)
    })
    .await
    .map_err(|e| AppError::ImageProcessing(e.to_string()))?
    .map_err(|e| {
        warn!("Transparency left off: {e}");
        AppError::from(e)
    })?;

    Ok(Json(ToggleResponse {
        document: updated,
        original_url: Some(original_url),
    }))
}
