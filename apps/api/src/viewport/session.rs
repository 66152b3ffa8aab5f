//! Transient view sessions: one `RenderContext` per open preview surface.
//! Nothing here is persisted. A session untouched for longer than the idle TTL
//! is gone: lookups treat it as unknown and the sweeper drops it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::viewport::debounce::Debouncer;
use crate::viewport::fit::RenderContext;

struct Session {
    context: RenderContext,
    resize: Debouncer,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct ViewSessions {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
    debounce: Duration,
    idle_ttl: Duration,
}

/// The session under `id`, refreshed, unless it has been idle past `ttl`.
/// An expired session is removed on the spot.
fn live(sessions: &mut HashMap<Uuid, Session>, id: Uuid, ttl: Duration) -> Option<&mut Session> {
    let now = Instant::now();
    if sessions
        .get(&id)
        .is_some_and(|s| now.duration_since(s.last_seen) > ttl)
    {
        sessions.remove(&id);
        debug!(%id, "View session expired");
        return None;
    }
    let session = sessions.get_mut(&id)?;
    session.last_seen = now;
    Some(session)
}

impl ViewSessions {
    pub fn new(debounce: Duration, idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            debounce,
            idle_ttl,
        }
    }

    pub async fn create(&self, context: RenderContext) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            context,
            resize: Debouncer::new(self.debounce),
            last_seen: Instant::now(),
        };
        self.inner.lock().await.insert(id, session);
        debug!(%id, "View session created");
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<RenderContext> {
        let mut sessions = self.inner.lock().await;
        live(&mut sessions, id, self.idle_ttl).map(|s| s.context.clone())
    }

    /// Drops the session and any pending resize.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.lock().await.remove(&id).is_some()
    }

    /// Applies `f` immediately and returns the new context.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Option<RenderContext>
    where
        F: FnOnce(RenderContext) -> RenderContext,
    {
        let mut sessions = self.inner.lock().await;
        let session = live(&mut sessions, id, self.idle_ttl)?;
        session.context = f(session.context.clone());
        Some(session.context.clone())
    }

    /// Schedules a debounced resize. A newer resize for the same session
    /// replaces one that has not fired yet. Returns false for an unknown id.
    pub async fn schedule_resize(&self, id: Uuid, container_width: f32, viewport_width: f32) -> bool {
        let mut sessions = self.inner.lock().await;
        let Some(session) = live(&mut sessions, id, self.idle_ttl) else {
            return false;
        };
        let inner = self.inner.clone();
        let superseded = session.resize.schedule(async move {
            if let Some(session) = inner.lock().await.get_mut(&id) {
                session.context = session
                    .context
                    .clone()
                    .resized(container_width, viewport_width);
                debug!(%id, scale = session.context.scale, "Resize applied");
            }
        });
        if superseded {
            debug!(%id, "Pending resize superseded");
        }
        true
    }

    pub async fn count(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Drops every session idle past the TTL, with its pending resize.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_seen) <= self.idle_ttl);
        before - sessions.len()
    }

    /// Runs `evict_idle` in the background for as long as the runtime lives.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let sessions = self.clone();
        let every = (self.idle_ttl / 4).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = sessions.evict_idle().await;
                if evicted > 0 {
                    info!(evicted, "Idle view sessions evicted");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::fit::{fit_scale, DeviceClass, Mode, ZoomStep};

    const WINDOW: Duration = Duration::from_millis(150);
    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_resizes_applies_the_last() {
        let sessions = ViewSessions::new(WINDOW, TTL);
        let id = sessions
            .create(RenderContext::new(Mode::Preview, 1000.0, 1400.0))
            .await;

        for width in [600.0, 700.0, 500.0] {
            assert!(sessions.schedule_resize(id, width, 1400.0).await);
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(sessions.get(id).await.unwrap().container_width, 1000.0);

        tokio::time::sleep(WINDOW * 2).await;
        let ctx = sessions.get(id).await.unwrap();
        assert_eq!(ctx.container_width, 500.0);
        assert_eq!(ctx.scale, fit_scale(500.0, Mode::Preview, DeviceClass::Desktop));
    }

    #[tokio::test]
    async fn test_update_is_immediate() {
        let sessions = ViewSessions::new(WINDOW, TTL);
        let id = sessions
            .create(RenderContext::new(Mode::Preview, 1000.0, 1400.0))
            .await;
        let before = sessions.get(id).await.unwrap().scale;
        let after = sessions
            .update(id, |ctx| ctx.zoomed(ZoomStep::Out))
            .await
            .unwrap();
        assert!(after.scale < before);
        assert_eq!(sessions.get(id).await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let sessions = ViewSessions::new(WINDOW, TTL);
        let id = Uuid::new_v4();
        assert!(sessions.get(id).await.is_none());
        assert!(!sessions.schedule_resize(id, 100.0, 100.0).await);
        assert!(sessions.update(id, |c| c).await.is_none());
        assert!(!sessions.remove(id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires_and_active_one_stays() {
        let sessions = ViewSessions::new(WINDOW, TTL);
        let idle = sessions
            .create(RenderContext::new(Mode::Preview, 1000.0, 1400.0))
            .await;
        let active = sessions
            .create(RenderContext::new(Mode::Preview, 800.0, 1400.0))
            .await;

        for _ in 0..3 {
            tokio::time::sleep(TTL / 2).await;
            assert!(sessions.get(active).await.is_some());
        }
        assert!(sessions.get(idle).await.is_none());
        assert!(sessions.update(idle, |c| c).await.is_none());
        assert_eq!(sessions.count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_untouched_sessions() {
        let sessions = ViewSessions::new(WINDOW, TTL);
        for _ in 0..3 {
            sessions
                .create(RenderContext::new(Mode::Editor, 1000.0, 1400.0))
                .await;
        }
        let sweeper = sessions.spawn_sweeper();
        tokio::time::sleep(TTL / 2).await;
        assert_eq!(sessions.count().await, 3);

        tokio::time::sleep(TTL * 2).await;
        assert_eq!(sessions.count().await, 0);
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_session_drops_pending_resize() {
        let sessions = ViewSessions::new(WINDOW, TTL);
        let id = sessions
            .create(RenderContext::new(Mode::Editor, 1000.0, 1400.0))
            .await;
        sessions.schedule_resize(id, 300.0, 300.0).await;
        assert!(sessions.remove(id).await);
        tokio::time::sleep(WINDOW * 2).await;
        assert_eq!(sessions.count().await, 0);
    }
}
