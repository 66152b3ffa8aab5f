use std::sync::Arc;

use crate::config::Config;
use crate::render::assets::AssetResolver;
use crate::viewport::session::ViewSessions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Open preview surfaces. In-memory only; lost on restart.
    pub sessions: ViewSessions,
    /// Remote image fetcher used by export and the transparency toggle.
    pub assets: Arc<dyn AssetResolver>,
}

impl AppState {
    pub fn new(config: Config, assets: Arc<dyn AssetResolver>) -> Self {
        let sessions = ViewSessions::new(config.resize_debounce, config.session_idle_ttl);
        Self {
            config,
            sessions,
            assets,
        }
    }
}
