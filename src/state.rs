//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
///
/// Constructed once at startup; handlers receive it as an injected
/// dependency rather than reaching for process-wide globals.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Persistent chat-message store.
    pub store: Arc<SqliteStore>,
}
