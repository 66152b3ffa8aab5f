pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::document::handlers as document;
use crate::imaging::handlers as imaging;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::viewport::handlers as viewport;

pub fn build_router(state: AppState) -> Router {
    // Documents carry portraits as base64 data URLs, a third larger than the raw image.
    let body_limit = state.config.max_image_bytes * 2;

    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog and documents
        .route("/api/v1/templates", get(document::handle_list_templates))
        .route("/api/v1/documents/normalize", post(document::handle_normalize))
        .route("/api/v1/documents/edit", post(document::handle_edit))
        .route(
            "/api/v1/documents/profile-image/transparency",
            post(imaging::handle_toggle_transparency),
        )
        // Rendering
        .route("/api/v1/render/preview", post(render::handle_preview))
        .route("/api/v1/render/export", post(render::handle_export))
        .route("/api/v1/render/conformance", post(render::handle_conformance))
        // Viewport
        .route("/api/v1/viewport/fit", post(viewport::handle_fit))
        .route("/api/v1/sessions", post(viewport::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(viewport::handle_get_session).delete(viewport::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/resize", post(viewport::handle_resize))
        .route("/api/v1/sessions/:id/mode", post(viewport::handle_mode))
        .route("/api/v1/sessions/:id/zoom", post(viewport::handle_zoom))
        .route(
            "/api/v1/sessions/:id/section",
            post(viewport::handle_select_section),
        )
        // Images
        .route("/api/v1/images/transparency", post(imaging::handle_transparency))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
