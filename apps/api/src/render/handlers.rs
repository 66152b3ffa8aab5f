use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::document::normalize::normalize;
use crate::errors::AppError;
use crate::layout::tree::RenderTree;
use crate::layout::{build_render_tree, LayoutOptions, Locale};
use crate::render::assets::{decode_images, fetch_image_bytes};
use crate::render::conformance::{self, ConformanceReport};
use crate::render::preview::{self, PreviewOutput};
use crate::render::{export, RenderError};
use crate::state::AppState;

/// Body shared by every render route: the raw document plus view options.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub document: Value,
    #[serde(default)]
    pub locale: Option<String>,
}

impl RenderRequest {
    fn options(&self, default_locale: Locale) -> Result<LayoutOptions, AppError> {
        let locale = match self.locale.as_deref() {
            Some(raw) => Locale::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("unknown locale '{raw}'")))?,
            None => default_locale,
        };
        Ok(LayoutOptions { locale })
    }

    fn tree(&self, default_locale: Locale) -> Result<RenderTree, AppError> {
        let options = self.options(default_locale)?;
        let document = normalize(&self.document);
        Ok(build_render_tree(&document, &options))
    }
}

/// Runs CPU-bound backend work off the async runtime. A panic inside the
/// backend comes back as an explicit failure.
async fn run_blocking<T, F>(backend: &'static str, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, RenderError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RenderError::Aborted(e.to_string()))
        .and_then(|r| r)
        .map_err(|e| e.into_app_error(backend))
}

/// POST /api/v1/render/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<PreviewOutput>, AppError> {
    let tree = req.tree(state.config.default_locale)?;
    let output = run_blocking("preview", move || preview::render(&tree)).await?;
    Ok(Json(output))
}

/// POST /api/v1/render/export
///
/// Responds with the PDF bytes. `x-cv-overflowed: true` marks a page whose
/// content ran past the bottom edge.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let tree = req.tree(state.config.default_locale)?;
    let raw = fetch_image_bytes(&tree, state.assets.as_ref())
        .await
        .map_err(|e| e.into_app_error("export"))?;
    let max_pixels = state.config.max_image_pixels;
    let artifact = run_blocking("export", move || {
        let assets = decode_images(raw, max_pixels)?;
        export::render(&tree, &assets)
    })
    .await?;

    info!(
        bytes = artifact.pdf.len(),
        overflowed = artifact.overflowed,
        "Export rendered"
    );
    let overflowed = HeaderValue::from_static(if artifact.overflowed { "true" } else { "false" });
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"cv.pdf\""),
            ),
            (HeaderName::from_static("x-cv-overflowed"), overflowed),
        ],
        artifact.pdf,
    )
        .into_response())
}

/// POST /api/v1/render/conformance
pub async fn handle_conformance(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<ConformanceReport>, AppError> {
    let tree = req.tree(state.config.default_locale)?;
    let raw = fetch_image_bytes(&tree, state.assets.as_ref())
        .await
        .map_err(|e| e.into_app_error("export"))?;
    let max_pixels = state.config.max_image_pixels;
    let report = run_blocking("conformance", move || {
        let assets = decode_images(raw, max_pixels)?;
        conformance::check(&tree, &assets)
    })
    .await?;
    if !report.conforms {
        tracing::warn!(
            mismatches = report.mismatches.len(),
            "Preview and export diverged"
        );
    }
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_locale_overrides_default() {
        let req = RenderRequest {
            document: json!({}),
            locale: Some("en-GB".to_string()),
        };
        assert_eq!(req.options(Locale::Sv).unwrap().locale, Locale::En);

        let req = RenderRequest {
            document: json!({}),
            locale: None,
        };
        assert_eq!(req.options(Locale::En).unwrap().locale, Locale::En);
    }

    #[test]
    fn test_unknown_locale_is_a_validation_error() {
        let req = RenderRequest {
            document: json!({}),
            locale: Some("tlh".to_string()),
        };
        assert!(matches!(req.options(Locale::Sv), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_panicking_backend_is_a_render_failure() {
        let result: Result<(), AppError> =
            run_blocking("export", || -> Result<(), RenderError> { panic!("boom") }).await;
        assert!(matches!(
            result,
            Err(AppError::RenderBackend {
                backend: "export",
                ..
            })
        ));
    }
}
