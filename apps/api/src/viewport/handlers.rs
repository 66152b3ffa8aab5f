use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::viewport::fit::{Mode, RenderContext, ZoomStep};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitRequest {
    pub container_width: f32,
    pub viewport_width: f32,
    pub mode: Mode,
    /// Current scale to step from; defaults to the fitted scale.
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub step: Option<ZoomStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    pub container_width: f32,
    pub viewport_width: f32,
}

fn default_mode() -> Mode {
    Mode::Preview
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub context: RenderContext,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeRequest {
    pub container_width: f32,
    pub viewport_width: f32,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: Mode,
}

#[derive(Debug, Deserialize)]
pub struct ZoomRequest {
    pub step: ZoomStep,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    #[serde(default)]
    pub section_id: Option<String>,
}

fn check_width(name: &str, value: f32) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{name} must be a non-negative number"
        )))
    }
}

fn check_widths(container_width: f32, viewport_width: f32) -> Result<(), AppError> {
    check_width("containerWidth", container_width)?;
    check_width("viewportWidth", viewport_width)
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("View session {id} not found"))
}

/// POST /api/v1/viewport/fit
pub async fn handle_fit(Json(req): Json<FitRequest>) -> Result<Json<RenderContext>, AppError> {
    check_widths(req.container_width, req.viewport_width)?;
    let mut context = RenderContext::new(req.mode, req.container_width, req.viewport_width);
    if let Some(step) = req.step {
        if let Some(scale) = req.scale {
            check_width("scale", scale)?;
            context.scale = scale;
        }
        context = context.zoomed(step);
    }
    Ok(Json(context))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    check_widths(req.container_width, req.viewport_width)?;
    let context = RenderContext::new(req.mode, req.container_width, req.viewport_width);
    let id = state.sessions.create(context.clone()).await;
    Ok((StatusCode::CREATED, Json(SessionResponse { id, context })))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderContext>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/resize
///
/// Debounced; the recompute lands after the window unless another resize
/// replaces it.
pub async fn handle_resize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResizeRequest>,
) -> Result<StatusCode, AppError> {
    check_widths(req.container_width, req.viewport_width)?;
    if state
        .sessions
        .schedule_resize(id, req.container_width, req.viewport_width)
        .await
    {
        Ok(StatusCode::ACCEPTED)
    } else {
        Err(session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/mode
pub async fn handle_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ModeRequest>,
) -> Result<Json<RenderContext>, AppError> {
    state
        .sessions
        .update(id, |ctx| ctx.with_mode(req.mode))
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/zoom
pub async fn handle_zoom(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ZoomRequest>,
) -> Result<Json<RenderContext>, AppError> {
    state
        .sessions
        .update(id, |ctx| ctx.zoomed(req.step))
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/section
pub async fn handle_select_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SectionRequest>,
) -> Result<Json<RenderContext>, AppError> {
    let section_id = req
        .section_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    state
        .sessions
        .update(id, |ctx| ctx.with_active_section(section_id))
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}
