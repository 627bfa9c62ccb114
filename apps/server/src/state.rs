//! Shared application state for axum handlers.

use dukaan_db::Database;

/// State available to every handler via `State<AppState>`.
///
/// `Database` clones are cheap (a pooled handle), so the whole struct
/// derives Clone as axum requires.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
