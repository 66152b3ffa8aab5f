// Viewport fit calculator and the transient view sessions built on it.
// Only the preview surface is scaled; the export page is always 1:1.

pub mod debounce;
pub mod fit;
pub mod handlers;
pub mod session;
